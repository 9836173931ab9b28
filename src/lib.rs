//! Terminal dashboard for the AI news backend.
//!
//! Articles come from `GET /api/articles`, are filtered by source or by the
//! user's saved list, and are drawn as cards. The saved list lives in a
//! small on-disk key-value store.

pub mod app;
pub mod card;
pub mod config;
pub mod filter;
pub mod input;
pub mod logging;
pub mod model;
pub mod repository;
pub mod saved;
pub mod time_ago;
pub mod ui;

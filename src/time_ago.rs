use chrono::{DateTime, Utc};

const UNITS: [(i64, &str); 5] = [
    (31_536_000, "year"),
    (2_592_000, "month"),
    (86_400, "day"),
    (3_600, "hour"),
    (60, "minute"),
];

/// Coarse relative age such as "3 hours ago".
///
/// A unit is used only once strictly more than one of it has elapsed, so
/// 60 seconds still reads "60 seconds ago". Future timestamps clamp to
/// "a second ago".
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - published).num_seconds();

    for (size, unit) in UNITS {
        if seconds > size {
            let value = seconds / size;
            return if value == 1 {
                format!("1 {unit} ago")
            } else {
                format!("{value} {unit}s ago")
            };
        }
    }

    if seconds <= 5 {
        return "a second ago".to_string();
    }
    format!("{seconds} seconds ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(secs: i64) -> String {
        let now = Utc::now();
        time_ago(now - Duration::seconds(secs), now)
    }

    #[test]
    fn boundaries() {
        assert_eq!(ago(45), "45 seconds ago");
        assert_eq!(ago(90), "1 minute ago");
        assert_eq!(ago(3_700), "1 hour ago");
        assert_eq!(ago(90_000), "1 day ago");
    }

    #[test]
    fn whole_unit_is_not_enough() {
        assert_eq!(ago(60), "60 seconds ago");
        assert_eq!(ago(121), "2 minutes ago");
        assert_eq!(ago(7_200), "2 hours ago");
    }

    #[test]
    fn small_and_large() {
        assert_eq!(ago(0), "a second ago");
        assert_eq!(ago(5), "a second ago");
        assert_eq!(ago(6), "6 seconds ago");
        assert_eq!(ago(-30), "a second ago");
        assert_eq!(ago(3 * 2_592_000 + 10), "3 months ago");
        assert_eq!(ago(2 * 31_536_000 + 10), "2 years ago");
    }
}

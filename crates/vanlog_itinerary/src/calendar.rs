use jiff::{ToSpan, civil::Date};

/// `date` moved by `days`, or `date` itself if that leaves the supported range.
pub fn add_days(date: Date, days: i64) -> Date {
    date.checked_add(days.days()).unwrap_or(date)
}

/// Whole days from `from` to `to`, negative when `to` comes first.
pub fn days_between(from: Date, to: Date) -> i64 {
    to.duration_since(from).as_hours() / 24
}

/// Day number of `date` within a trip starting on `first`, rendered `J+N`.
pub fn day_label(date: Option<Date>, first: Option<Date>) -> String {
    match (date, first) {
        (Some(date), Some(first)) => format!("J+{}", days_between(first, date)),
        _ => String::from("—"),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date(2026, 6, 30), 1), date(2026, 7, 1));
        assert_eq!(add_days(date(2026, 12, 31), 1), date(2027, 1, 1));
        assert_eq!(add_days(date(2028, 2, 28), 1), date(2028, 2, 29));
        assert_eq!(add_days(Date::MAX, 1), Date::MAX);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2026, 6, 15), date(2026, 6, 17)), 2);
        assert_eq!(days_between(date(2026, 6, 17), date(2026, 6, 15)), -2);
        assert_eq!(days_between(date(2026, 3, 28), date(2026, 3, 30)), 2);
    }

    #[test]
    fn test_day_label() {
        let first = Some(date(2026, 6, 15));

        assert_eq!(day_label(first, first), "J+0");
        assert_eq!(day_label(Some(date(2026, 6, 22)), first), "J+7");
        assert_eq!(day_label(None, first), "—");
    }
}

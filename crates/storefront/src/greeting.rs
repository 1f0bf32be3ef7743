//! Homepage greeting and footer year.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Time-of-day greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Greeting for an hour of the day (0-23).
    #[must_use]
    pub const fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 18 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }

    /// Display text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Evening => "Good evening",
        }
    }
}

/// Greeting line for the homepage, e.g. `Good morning, today is Fri Oct 16 2026`.
///
/// The date uses the `Www Mmm DD YYYY` layout of `Date.toDateString()`.
#[must_use]
pub fn greeting_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}, today is {}",
        Greeting::for_hour(now.hour()).as_str(),
        now.format("%a %b %d %Y")
    )
}

/// Year shown in the footer.
#[must_use]
pub fn footer_year<Tz: TimeZone>(now: &DateTime<Tz>) -> i32 {
    now.year()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(18), Greeting::Evening);
        assert_eq!(Greeting::for_hour(23), Greeting::Evening);
    }

    #[test]
    fn test_greeting_line_format() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        assert_eq!(greeting_line(&now), "Good morning, today is Fri Oct 16 2026");
    }

    #[test]
    fn test_greeting_line_pads_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 19, 0, 0).unwrap();
        assert_eq!(greeting_line(&now), "Good evening, today is Mon Mar 02 2026");
    }

    #[test]
    fn test_greeting_uses_local_hour() {
        let offset = FixedOffset::east_opt(10 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2026, 10, 16, 13, 0, 0).unwrap();
        assert!(greeting_line(&now).starts_with("Good afternoon"));
    }

    #[test]
    fn test_footer_year() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(footer_year(&now), 2026);
    }
}

use time::{macros::format_description, Date, Duration, OffsetDateTime};

/// Monday to Sunday accounting period, both ends inclusive.
///
/// The whole system reads calendar dates in UTC, so a window always covers the
/// instants `[start 00:00Z, end + 1 day 00:00Z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    pub start: Date,
    pub end: Date,
}

impl WeekWindow {
    /// The week that contains `day`.
    ///
    /// Total over every valid date. At the very edges of the supported
    /// calendar the window saturates instead of overflowing.
    pub fn containing(day: Date) -> Self {
        let offset = i64::from(day.weekday().number_days_from_monday());
        let start = day.saturating_sub(Duration::days(offset));
        let end = start.saturating_add(Duration::days(6));
        Self { start, end }
    }

    pub fn current() -> Self {
        Self::containing(today_utc())
    }

    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }

    /// Half-open instant range for store queries.
    pub fn utc_bounds(&self) -> (OffsetDateTime, OffsetDateTime) {
        let from = self.start.midnight().assume_utc();
        let until = self
            .end
            .midnight()
            .assume_utc()
            .saturating_add(Duration::days(1));
        (from, until)
    }
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Accounting date of an instant.
pub fn accounting_date(at: OffsetDateTime) -> Date {
    at.to_offset(time::UtcOffset::UTC).date()
}

/// Parses the `YYYY-MM-DD` form used by `week_of` query parameters.
pub fn parse_day(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}

//! Time-of-day arithmetic for ordering windows.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::civil;
use serde::{Deserialize, Serialize};

use crate::meals::ScheduleError;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock minute, `0..1440` minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight, 00:00.
    pub const MIDNIGHT: Self = Self(0);

    /// Build a minute of day from an hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTime`] when the hour is not below 24 or
    /// the minute is not below 60.
    pub fn new(hour: u16, minute: u16) -> Result<Self, ScheduleError> {
        if hour >= 24 || minute >= 60 {
            return Err(ScheduleError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }

        Ok(Self(hour * 60 + minute))
    }

    pub(crate) const fn hm(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component, `0..24`.
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component, `0..60`.
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Convert into a [`civil::Time`] with zero seconds.
    #[must_use]
    pub fn to_civil(self) -> civil::Time {
        // Both components are range-checked on construction.
        let hour = i8::try_from(self.hour()).unwrap_or(0);
        let minute = i8::try_from(self.minute()).unwrap_or(0);

        civil::time(hour, minute, 0, 0)
    }
}

impl From<civil::Time> for MinuteOfDay {
    fn from(time: civil::Time) -> Self {
        let hour = u16::from(time.hour().unsigned_abs());
        let minute = u16::from(time.minute().unsigned_abs());

        Self::hm(hour, minute)
    }
}

impl From<civil::DateTime> for MinuteOfDay {
    fn from(datetime: civil::DateTime) -> Self {
        Self::from(datetime.time())
    }
}

impl Display for MinuteOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u16>().map_err(|_err| invalid())?;
        let minute = minute.parse::<u16>().map_err(|_err| invalid())?;

        Self::new(hour, minute).map_err(|_err| invalid())
    }
}

/// Hours and minutes left before a window boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Whole hours.
    pub hours: u16,

    /// Remaining minutes, `0..60`.
    pub minutes: u16,
}

impl Countdown {
    /// Split a minute count into hours and minutes.
    #[must_use]
    pub const fn from_minutes(total: u16) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Total number of minutes represented.
    #[must_use]
    pub const fn total_minutes(self) -> u16 {
        self.hours * 60 + self.minutes
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.hours, self.minutes) {
            (0, 0) => write!(f, "under a minute"),
            (0, minutes) => write!(f, "{minutes}m"),
            (hours, minutes) => write!(f, "{hours}h {minutes}m"),
        }
    }
}

/// Half-open clock interval `[start, end)`.
///
/// A span whose start is later than its end crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSpan {
    start: MinuteOfDay,
    end: MinuteOfDay,
}

impl TimeSpan {
    /// Create a new span.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyWindow`] when `start` equals `end`.
    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Result<Self, ScheduleError> {
        if start == end {
            return Err(ScheduleError::EmptyWindow(start));
        }

        Ok(Self { start, end })
    }

    pub(crate) const fn from_parts(start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self { start, end }
    }

    /// First minute inside the span.
    #[must_use]
    pub const fn start(self) -> MinuteOfDay {
        self.start
    }

    /// First minute after the span.
    #[must_use]
    pub const fn end(self) -> MinuteOfDay {
        self.end
    }

    /// Whether the span crosses midnight.
    #[must_use]
    pub fn wraps(self) -> bool {
        self.start > self.end
    }

    /// Length of the span in minutes.
    #[must_use]
    pub fn duration_minutes(self) -> u16 {
        if self.wraps() {
            MINUTES_PER_DAY - self.start.minutes() + self.end.minutes()
        } else {
            self.end.minutes() - self.start.minutes()
        }
    }

    /// Whether `now` falls inside the span.
    #[must_use]
    pub fn contains(self, now: MinuteOfDay) -> bool {
        if self.wraps() {
            now >= self.start || now < self.end
        } else {
            self.start <= now && now < self.end
        }
    }

    /// Minutes from `now` until the span closes, or `None` when `now` is outside it.
    #[must_use]
    pub fn minutes_until_end(self, now: MinuteOfDay) -> Option<u16> {
        if !self.contains(now) {
            return None;
        }

        let end = self.end.minutes();
        let now = now.minutes();

        if self.wraps() && now >= self.start.minutes() {
            Some(end + MINUTES_PER_DAY - now)
        } else {
            Some(end - now)
        }
    }

    /// Minutes from `now` until the span next opens, or `None` when `now` is inside it.
    #[must_use]
    pub fn minutes_until_start(self, now: MinuteOfDay) -> Option<u16> {
        if self.contains(now) {
            return None;
        }

        let start = self.start.minutes();
        let now = now.minutes();

        if start <= now {
            Some(start + MINUTES_PER_DAY - now)
        } else {
            Some(start - now)
        }
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeSpan {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ScheduleError::InvalidTime(s.to_string()))?;

        Self::new(start.parse()?, end.parse()?)
    }
}

impl TryFrom<String> for TimeSpan {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSpan> for String {
    fn from(value: TimeSpan) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minute_of_day_rejects_out_of_range_components() {
        assert!(matches!(
            MinuteOfDay::new(24, 0),
            Err(ScheduleError::InvalidTime(_))
        ));
        assert!(matches!(
            MinuteOfDay::new(7, 60),
            Err(ScheduleError::InvalidTime(_))
        ));
    }

    #[test]
    fn minute_of_day_parses_clock_text() -> TestResult {
        let parsed: MinuteOfDay = "18:45".parse()?;

        assert_eq!(parsed.minutes(), 18 * 60 + 45);
        assert_eq!(parsed.to_string(), "18:45");

        Ok(())
    }

    #[test]
    fn minute_of_day_from_civil_time_drops_seconds() {
        let minute = MinuteOfDay::from(civil::time(23, 59, 59, 999));

        assert_eq!(minute, MinuteOfDay::hm(23, 59));
        assert_eq!(minute.to_civil(), civil::time(23, 59, 0, 0));
    }

    #[test]
    fn countdown_splits_minutes() {
        let countdown = Countdown::from_minutes(1030);

        assert_eq!(countdown, Countdown { hours: 17, minutes: 10 });
        assert_eq!(countdown.total_minutes(), 1030);
        assert_eq!(countdown.to_string(), "17h 10m");
        assert_eq!(Countdown::from_minutes(5).to_string(), "5m");
    }

    #[test]
    fn span_rejects_zero_length() {
        let noon = MinuteOfDay::hm(12, 0);

        assert!(matches!(
            TimeSpan::new(noon, noon),
            Err(ScheduleError::EmptyWindow(at)) if at == noon
        ));
    }

    #[test]
    fn plain_span_is_half_open() -> TestResult {
        let span: TimeSpan = "12:00-18:45".parse()?;

        assert!(!span.wraps());
        assert!(span.contains(MinuteOfDay::hm(12, 0)));
        assert!(span.contains(MinuteOfDay::hm(18, 44)));
        assert!(!span.contains(MinuteOfDay::hm(18, 45)));
        assert!(!span.contains(MinuteOfDay::hm(11, 59)));
        assert_eq!(span.duration_minutes(), 405);

        Ok(())
    }

    #[test]
    fn wrapping_span_counts_across_midnight() -> TestResult {
        let span: TimeSpan = "19:00-06:00".parse()?;

        assert!(span.wraps());
        assert_eq!(span.duration_minutes(), 660);
        assert_eq!(span.minutes_until_end(MinuteOfDay::hm(23, 59)), Some(361));
        assert_eq!(span.minutes_until_end(MinuteOfDay::hm(0, 1)), Some(359));
        assert_eq!(span.minutes_until_start(MinuteOfDay::hm(12, 0)), Some(420));
        assert_eq!(span.minutes_until_start(MinuteOfDay::hm(23, 0)), None);

        Ok(())
    }

    #[test]
    fn span_text_round_trips_through_serde_string() -> TestResult {
        let span: TimeSpan = "06:00-10:00".parse()?;

        assert_eq!(String::from(span), "06:00-10:00");
        assert!(matches!(
            "0600-1000".parse::<TimeSpan>(),
            Err(ScheduleError::InvalidTime(_))
        ));

        Ok(())
    }
}

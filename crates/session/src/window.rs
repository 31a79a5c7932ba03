//! Session window: the minute range a prediction run covers.
//!
//! All instants in a window, epoch included, share one unzoned wall-clock
//! reference; nothing in the pipeline converts timezones.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Reference date of the cyclical calendar: the exchange's first trading
/// session.
pub fn market_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1992, 7, 1, 9, 15, 0)
        .single()
        .expect("epoch literal is a valid calendar time")
}

/// Regular session open, exchange wall clock.
pub fn session_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 15, 0).expect("time literal is valid")
}

/// Regular session close, exchange wall clock.
pub fn session_close() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 30, 0).expect("time literal is valid")
}

/// The inclusive minute range `[start, end]` of one prediction run plus
/// the cycle epoch it is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub epoch: DateTime<Utc>,
}

impl SessionWindow {
    /// Window over an explicit range and epoch.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, epoch: DateTime<Utc>) -> Self {
        Self { start, end, epoch }
    }

    /// Regular trading session of `date` against the market epoch.
    pub fn trading_day(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(session_open()).and_utc(),
            end: date.and_time(session_close()).and_utc(),
            epoch: market_epoch(),
        }
    }

    /// Override the session bounds on a trading-day window.
    pub fn with_times(mut self, open: NaiveTime, close: NaiveTime) -> Self {
        let date = self.start.date_naive();
        self.start = date.and_time(open).and_utc();
        self.end = date.and_time(close).and_utc();
        self
    }

    /// Every whole minute of `[start, end]`, ascending.
    ///
    /// Empty when `start > end`; an inverted window is a legitimate
    /// zero-length request, not an error.
    pub fn minutes(&self) -> Vec<DateTime<Utc>> {
        let mut minutes = Vec::with_capacity(self.len_minutes());
        let mut instant = self.start;
        while instant <= self.end {
            minutes.push(instant);
            instant += Duration::minutes(1);
        }
        minutes
    }

    /// Number of whole minutes in the window (0 when inverted).
    pub fn len_minutes(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).num_minutes() as usize + 1
        }
    }
}

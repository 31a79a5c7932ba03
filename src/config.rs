//! Central configuration for the Nakshatra Desk dashboard.
//!
//! All presentation-shell parameters live here; the engine itself takes
//! its inputs per call.

use chrono::{DateTime, NaiveTime, Utc};
use session::{market_epoch, session_close, session_open};

/// Master configuration for one dashboard run.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Session Control
    // ─────────────────────────────────────────────────────────────────────────
    /// Instrument label shown in the header and reports.
    pub symbol: String,
    /// Session open, exchange wall clock.
    pub open: NaiveTime,
    /// Session close, exchange wall clock.
    pub close: NaiveTime,
    /// Cyclical-calendar reference instant.
    pub epoch: DateTime<Utc>,
    /// Force sequential record evaluation.
    pub sequential: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // TUI Parameters
    // ─────────────────────────────────────────────────────────────────────────
    /// Delay between played minutes in milliseconds (0 = fastest).
    pub step_delay_ms: u64,
    /// TUI frame rate (frames per second).
    pub tui_frame_rate: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            // Session Control
            symbol: "NIFTY".to_string(),
            open: session_open(),
            close: session_close(),
            epoch: market_epoch(),
            sequential: false,

            // TUI Parameters
            step_delay_ms: 25,
            tui_frame_rate: 30,
        }
    }
}

impl DeskConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder-style setters for fluent configuration
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the instrument label.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the session bounds.
    pub fn session_times(mut self, open: NaiveTime, close: NaiveTime) -> Self {
        self.open = open;
        self.close = close;
        self
    }

    /// Set the playback step delay.
    pub fn step_delay_ms(mut self, delay: u64) -> Self {
        self.step_delay_ms = delay;
        self
    }
}

/// Parse an exchange wall-clock time in "HH:MM" form.
pub fn parse_time(input: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|err| format!("invalid time {:?} (expected HH:MM): {}", input, err))
}

/// Parse a session date in "YYYY-MM-DD" form.
pub fn parse_date(input: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|err| format!("invalid date {:?} (expected YYYY-MM-DD): {}", input, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_bounds() {
        let config = DeskConfig::default();
        assert_eq!(config.open.format("%H:%M").to_string(), "09:15");
        assert_eq!(config.close.format("%H:%M").to_string(), "15:30");
        assert_eq!(config.symbol, "NIFTY");
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("10:30").unwrap().format("%H:%M").to_string(), "10:30");
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("abc").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-03-15").is_ok());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_builder_setters() {
        let open = parse_time("10:00").unwrap();
        let close = parse_time("14:00").unwrap();
        let config = DeskConfig::new()
            .symbol("BANKNIFTY")
            .session_times(open, close)
            .step_delay_ms(0);
        assert_eq!(config.symbol, "BANKNIFTY");
        assert_eq!(config.open, open);
        assert_eq!(config.step_delay_ms, 0);
    }
}

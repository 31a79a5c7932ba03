//! SessionUpdate message type for dashboard updates.
//!
//! Sent from the playback thread to the TUI thread via channel. Carries
//! everything one frame needs, so the TUI never reaches into the engine.

use serde::Serialize;
use types::{PredictionRecord, SessionSummary};

/// One entry of the event feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEntry {
    /// Wall-clock label of the minute the event fired ("HH:MM").
    pub time: String,
    /// Display label of the event.
    pub label: String,
}

/// Update message sent from playback to the TUI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionUpdate {
    /// Session title, e.g. "NIFTY 2024-03-15".
    pub session_label: String,
    /// Minutes played so far.
    pub minute: usize,
    /// Total minutes in the session.
    pub total_minutes: usize,
    /// Influence score per played minute, oldest first.
    pub influence_history: Vec<f64>,
    /// Blended volatility per played minute, oldest first.
    pub volatility_history: Vec<f64>,
    /// The most recently played record.
    pub latest: Option<PredictionRecord>,
    /// Cumulative event feed, oldest first.
    pub events: Vec<EventEntry>,
    /// Session summary, present once playback completes.
    pub summary: Option<SessionSummary>,
    /// Playback is complete.
    pub finished: bool,
}

impl SessionUpdate {
    /// Fraction of the session played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_minutes == 0 {
            0.0
        } else {
            self.minute as f64 / self.total_minutes as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_empty() {
        assert_eq!(SessionUpdate::default().progress(), 0.0);
    }

    #[test]
    fn test_progress_fraction() {
        let update = SessionUpdate {
            minute: 94,
            total_minutes: 376,
            ..Default::default()
        };
        assert!((update.progress() - 0.25).abs() < 1e-12);
    }
}

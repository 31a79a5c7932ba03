//! Terminal dashboard for session playback.
//!
//! The compute thread streams [`SessionUpdate`] messages over a channel;
//! the TUI renders the latest state and sends [`SessionCommand`] messages
//! back to control playback. The dashboard starts paused.

pub mod app;
pub mod widgets;

pub use app::TuiApp;
pub use widgets::{EventEntry, SessionUpdate};

/// Commands sent from the TUI to the playback thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin or resume playback.
    Start,
    /// Pause playback.
    Pause,
    /// Toggle the running state.
    Toggle,
    /// Stop playback and exit.
    Quit,
}

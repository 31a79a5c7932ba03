//! Session pipeline: drives the prediction engine across a trading
//! session and reduces the result.
//!
//! [`generate`] produces the ordered per-minute [`PredictionRecord`]
//! sequence for a [`SessionWindow`]; [`summarize`] folds a sequence into a
//! [`SessionSummary`]. Both are pure functions of their inputs.
//!
//! [`PredictionRecord`]: types::PredictionRecord
//! [`SessionSummary`]: types::SessionSummary

pub mod aggregate;
pub mod generator;
pub mod window;

pub use aggregate::summarize;
pub use generator::{generate, generate_with};
pub use window::{market_epoch, session_close, session_open, SessionWindow};

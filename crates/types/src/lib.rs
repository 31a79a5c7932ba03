//! Core types for the Nakshatra Desk prediction engine.
//!
//! This crate provides the shared vocabulary used across the engine,
//! session pipeline, and dashboard: period rulers, longitude segments,
//! per-minute prediction records, and session summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Number of longitude segments partitioning the ecliptic.
pub const SEGMENT_COUNT: usize = 27;

/// Number of period rulers in the dasha cycle.
pub const RULER_COUNT: usize = 9;

/// Angular span of one segment in degrees (360 / 27).
pub const SEGMENT_SPAN_DEG: f64 = 360.0 / SEGMENT_COUNT as f64;

// =============================================================================
// Rulers
// =============================================================================

/// The nine period rulers, declared in traditional dasha order.
///
/// The declaration order is load-bearing: it is the fixed order in which
/// major periods succeed one another, the order sub-periods are assigned
/// within a major period, and the index used by the attribute tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruler {
    Ketu,
    Venus,
    Sun,
    Moon,
    Mars,
    Rahu,
    Jupiter,
    Saturn,
    Mercury,
}

impl Ruler {
    /// All rulers in the fixed dasha order.
    pub const ALL: [Ruler; RULER_COUNT] = [
        Ruler::Ketu,
        Ruler::Venus,
        Ruler::Sun,
        Ruler::Moon,
        Ruler::Mars,
        Ruler::Rahu,
        Ruler::Jupiter,
        Ruler::Saturn,
        Ruler::Mercury,
    ];

    /// Position of this ruler in the fixed dasha order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Ruler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ruler::Ketu => "Ketu",
            Ruler::Venus => "Venus",
            Ruler::Sun => "Sun",
            Ruler::Moon => "Moon",
            Ruler::Mars => "Mars",
            Ruler::Rahu => "Rahu",
            Ruler::Jupiter => "Jupiter",
            Ruler::Saturn => "Saturn",
            Ruler::Mercury => "Mercury",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Predicted market direction attributed to a ruler or a scored minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
    Uncertain,
}

impl Direction {
    /// Tie-break priority for direction votes: the first bucket in this
    /// order to reach the maximum vote count wins.
    pub const VOTE_PRIORITY: [Direction; 4] = [
        Direction::Bullish,
        Direction::Bearish,
        Direction::Neutral,
        Direction::Uncertain,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Bullish => "Bullish",
            Direction::Bearish => "Bearish",
            Direction::Neutral => "Neutral",
            Direction::Uncertain => "Uncertain",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Longitude
// =============================================================================

/// Ecliptic longitude in degrees.
///
/// `Longitude::new` reduces any angle into `[0, 360)`. The raw field is
/// public so callers that already hold a normalized value (or deliberately
/// probe the degenerate 360 boundary) can construct one directly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct Longitude(pub f64);

impl Longitude {
    /// Create a longitude, reducing the angle modulo 360 into `[0, 360)`.
    #[inline]
    pub fn new(degrees: f64) -> Self {
        Longitude(degrees.rem_euclid(360.0))
    }

    /// Raw value in degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°", self.0)
    }
}

// =============================================================================
// Segments
// =============================================================================

/// One of the 27 fixed ecliptic segments (nakshatras).
///
/// The half-open ranges `[start_deg, end_deg)` of the 27 segments partition
/// `[0, 360)` exactly, each spanning 360/27 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Traditional segment name.
    pub name: &'static str,
    /// Ruling body of this segment.
    pub ruler: Ruler,
    /// Inclusive start of the range, degrees.
    pub start_deg: f64,
    /// Exclusive end of the range, degrees.
    pub end_deg: f64,
}

impl Segment {
    /// Whether the longitude falls inside this segment's half-open range.
    #[inline]
    pub fn contains(&self, longitude: Longitude) -> bool {
        longitude.0 >= self.start_deg && longitude.0 < self.end_deg
    }

    /// Fractional progress of a longitude through this segment, clamped
    /// to `[0, 1]` so the degenerate fallback case stays in range.
    #[inline]
    pub fn progress(&self, longitude: Longitude) -> f64 {
        ((longitude.0 - self.start_deg) / (self.end_deg - self.start_deg)).clamp(0.0, 1.0)
    }

    /// Angular span in degrees.
    #[inline]
    pub fn span(&self) -> f64 {
        self.end_deg - self.start_deg
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ruler)
    }
}

// =============================================================================
// Ruler Attributes
// =============================================================================

/// Market-influence attributes of a single ruler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RulerAttributes {
    /// Ruler these attributes describe.
    pub ruler: Ruler,
    /// Volatility contribution in `[0, 1]`.
    pub volatility: f64,
    /// Directional bias.
    pub direction: Direction,
    /// Short tag describing the character of the influence.
    pub impact: &'static str,
}

// =============================================================================
// Cycle State
// =============================================================================

/// Active major/sub period of the dasha cycle at a query instant.
///
/// Derived per instant, never persisted. Both progress values live in
/// `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleState {
    /// Ruler of the active major period.
    pub major: Ruler,
    /// Ruler of the active sub-period within the major period.
    pub sub: Ruler,
    /// Fractional progress through the major period.
    pub major_progress: f64,
    /// Fractional progress through the sub-period.
    pub sub_progress: f64,
}

// =============================================================================
// Market Events
// =============================================================================

/// A notable condition flagged for a single minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketEvent {
    /// The moon is in the last stretch of its current segment.
    SegmentEnding { segment: &'static str },
    /// The active major period is about to hand over.
    MajorPeriodEnding,
    /// The active sub-period is about to hand over.
    SubPeriodEnding,
    /// A named ruler combination is in effect.
    Combination { label: &'static str },
}

impl fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketEvent::SegmentEnding { segment } => {
                write!(f, "Approaching {} end", segment)
            }
            MarketEvent::MajorPeriodEnding => write!(f, "Major period change imminent"),
            MarketEvent::SubPeriodEnding => write!(f, "Sub-period change imminent"),
            MarketEvent::Combination { label } => write!(f, "{}", label),
        }
    }
}

/// Event list attached to a minute. Most minutes carry none.
pub type EventList = SmallVec<[MarketEvent; 4]>;

// =============================================================================
// Prediction Record
// =============================================================================

/// One scored minute of the session timeline.
///
/// Immutable once produced; sequences are ordered ascending by instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    /// The minute this record describes.
    pub instant: DateTime<Utc>,
    /// Moon ecliptic longitude at the instant.
    pub longitude: Longitude,
    /// Segment owning the longitude.
    pub segment: Segment,
    /// Fractional progress through the segment.
    pub segment_progress: f64,
    /// Active dasha cycle state.
    pub cycle: CycleState,
    /// Blended volatility in `[0, 1]`.
    pub volatility: f64,
    /// Voted direction.
    pub direction: Direction,
    /// Combined influence score in `[0, 1]`.
    pub influence: f64,
    /// Conditions flagged for this minute.
    pub events: EventList,
}

impl PredictionRecord {
    /// Wall-clock label for display and window reporting ("HH:MM").
    pub fn time_label(&self) -> String {
        self.instant.format("%H:%M").to_string()
    }
}

// =============================================================================
// Session Summary
// =============================================================================

/// Risk bucket for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Fixed advisory string attached to this bucket.
    pub const fn advice(self) -> &'static str {
        match self {
            RiskLevel::High => "Reduce position sizing",
            RiskLevel::Medium => "Normal caution advised",
            RiskLevel::Low => "Favorable for trading",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        };
        write!(f, "{}", name)
    }
}

/// Risk bucket plus its advisory string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub advice: &'static str,
}

impl RiskAssessment {
    /// Build an assessment from a bucket, attaching its advisory string.
    pub const fn from_level(level: RiskLevel) -> Self {
        Self {
            level,
            advice: level.advice(),
        }
    }
}

/// Category of a notable window within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowKind {
    HighVolatility,
    StrongBullish,
    StrongBearish,
}

impl WindowKind {
    /// Display intensity tag.
    pub const fn intensity(self) -> &'static str {
        match self {
            WindowKind::HighVolatility => "Very High",
            WindowKind::StrongBullish | WindowKind::StrongBearish => "High",
        }
    }

    /// Fixed trading recommendation for this window category.
    pub const fn recommendation(self) -> &'static str {
        match self {
            WindowKind::HighVolatility => "Caution - tight stop losses",
            WindowKind::StrongBullish => "Good for long entries",
            WindowKind::StrongBearish => "Consider short positions",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowKind::HighVolatility => "High Volatility",
            WindowKind::StrongBullish => "Strong Bullish Bias",
            WindowKind::StrongBearish => "Strong Bearish Bias",
        };
        write!(f, "{}", name)
    }
}

/// A reported window of notable minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotableWindow {
    /// Window category.
    pub kind: WindowKind,
    /// Time labels of the first matching minutes.
    pub minutes: Vec<String>,
}

/// Share of one ruler in the session's combined influence tally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RulerShare {
    pub ruler: Ruler,
    /// Occurrences across all three ruler slots of every record.
    pub count: usize,
    /// Percentage of the total tally.
    pub percentage: f64,
}

/// Aggregated view of a full record sequence.
///
/// Recomputed on each session request; owns derived copies only and shares
/// no mutable state with the sequence it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Number of minutes summarized.
    pub total_minutes: usize,
    /// Majority direction across the session.
    pub direction: Direction,
    /// Winning vote count divided by total records.
    pub confidence: f64,
    /// Mean volatility across the session.
    pub average_volatility: f64,
    /// Human-readable session character label.
    pub character: String,
    /// Notable windows, in reporting order. Empty categories are omitted.
    pub windows: Vec<NotableWindow>,
    /// Top rulers by tally, descending.
    pub dominant_rulers: Vec<RulerShare>,
    /// Session risk bucket.
    pub risk: RiskAssessment,
}

impl SessionSummary {
    /// The defined degenerate summary for an empty record sequence.
    pub fn empty() -> Self {
        Self {
            total_minutes: 0,
            direction: Direction::Neutral,
            confidence: 0.0,
            average_volatility: 0.0,
            character: "No data".to_string(),
            windows: Vec::new(),
            dominant_rulers: Vec::new(),
            risk: RiskAssessment::from_level(RiskLevel::Low),
        }
    }

    /// Whether this is the degenerate no-data summary.
    pub fn is_empty(&self) -> bool {
        self.total_minutes == 0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dasha_order_head_and_length() {
        assert_eq!(Ruler::ALL.len(), RULER_COUNT);
        assert_eq!(Ruler::ALL[0], Ruler::Ketu);
        assert_eq!(Ruler::ALL[8], Ruler::Mercury);
    }

    #[test]
    fn test_ruler_index_matches_order() {
        for (i, ruler) in Ruler::ALL.iter().enumerate() {
            assert_eq!(ruler.index(), i);
        }
    }

    #[test]
    fn test_vote_priority_order() {
        assert_eq!(
            Direction::VOTE_PRIORITY,
            [
                Direction::Bullish,
                Direction::Bearish,
                Direction::Neutral,
                Direction::Uncertain,
            ]
        );
    }

    #[test]
    fn test_longitude_normalization() {
        assert_eq!(Longitude::new(0.0).degrees(), 0.0);
        assert_eq!(Longitude::new(360.0).degrees(), 0.0);
        assert_eq!(Longitude::new(361.5).degrees(), 1.5);
        assert_eq!(Longitude::new(-10.0).degrees(), 350.0);
        assert!(Longitude::new(719.9).degrees() < 360.0);
    }

    #[test]
    fn test_segment_contains_half_open() {
        let seg = Segment {
            name: "Ashwini",
            ruler: Ruler::Ketu,
            start_deg: 0.0,
            end_deg: SEGMENT_SPAN_DEG,
        };
        assert!(seg.contains(Longitude(0.0)));
        assert!(seg.contains(Longitude(13.0)));
        assert!(!seg.contains(Longitude(SEGMENT_SPAN_DEG)));
    }

    #[test]
    fn test_segment_progress_clamped() {
        let seg = Segment {
            name: "Ashwini",
            ruler: Ruler::Ketu,
            start_deg: 0.0,
            end_deg: SEGMENT_SPAN_DEG,
        };
        assert_eq!(seg.progress(Longitude(0.0)), 0.0);
        let mid = seg.progress(Longitude(SEGMENT_SPAN_DEG / 2.0));
        assert!((mid - 0.5).abs() < 1e-12);
        // Out-of-range probe stays clamped.
        assert_eq!(seg.progress(Longitude(360.0)), 1.0);
    }

    #[test]
    fn test_event_display_labels() {
        let e = MarketEvent::SegmentEnding { segment: "Rohini" };
        assert_eq!(e.to_string(), "Approaching Rohini end");
        assert_eq!(
            MarketEvent::MajorPeriodEnding.to_string(),
            "Major period change imminent"
        );
        assert_eq!(
            MarketEvent::SubPeriodEnding.to_string(),
            "Sub-period change imminent"
        );
    }

    #[test]
    fn test_risk_advice_strings() {
        assert_eq!(RiskLevel::High.advice(), "Reduce position sizing");
        assert_eq!(RiskLevel::Medium.advice(), "Normal caution advised");
        assert_eq!(RiskLevel::Low.advice(), "Favorable for trading");
    }

    #[test]
    fn test_empty_summary() {
        let summary = SessionSummary::empty();
        assert!(summary.is_empty());
        assert_eq!(summary.total_minutes, 0);
        assert_eq!(summary.risk.level, RiskLevel::Low);
        assert!(summary.windows.is_empty());
        assert!(summary.dominant_rulers.is_empty());
    }
}

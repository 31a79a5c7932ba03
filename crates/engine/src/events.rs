//! Event detector: boundary-approach and notable-combination flags.
//!
//! Pure and stateless; each call evaluates independent boolean conditions
//! against a single minute and returns a label for each that holds. The
//! combination tables are static data, extendable without touching the
//! detection logic.

use types::{CycleState, EventList, MarketEvent, Ruler, Segment};

/// Segment progress beyond which a segment-end pre-alert fires.
///
/// The last 5% of a segment is roughly the final 2-3 minutes of its
/// ~53-minute average dwell at mean lunar motion.
pub const SEGMENT_ENDING_THRESHOLD: f64 = 0.95;

/// Period progress beyond which a change-imminent alert fires.
pub const PERIOD_ENDING_THRESHOLD: f64 = 0.98;

/// Named (major ruler, sub ruler) combinations.
pub const DASHA_COMBINATIONS: &[(Ruler, Ruler, &str)] = &[(
    Ruler::Rahu,
    Ruler::Mars,
    "Rahu-Mars combination - high volatility expected",
)];

/// Named (segment ruler, major ruler) combinations.
pub const SEGMENT_COMBINATIONS: &[(Ruler, Ruler, &str)] = &[(
    Ruler::Jupiter,
    Ruler::Jupiter,
    "Double Jupiter influence - bullish bias",
)];

/// Detect notable conditions for one minute.
///
/// The returned order is display order only; conditions are independent.
pub fn detect(segment: &Segment, segment_progress: f64, cycle: &CycleState) -> EventList {
    let mut events = EventList::new();

    if segment_progress > SEGMENT_ENDING_THRESHOLD {
        events.push(MarketEvent::SegmentEnding {
            segment: segment.name,
        });
    }

    if cycle.major_progress > PERIOD_ENDING_THRESHOLD {
        events.push(MarketEvent::MajorPeriodEnding);
    }

    if cycle.sub_progress > PERIOD_ENDING_THRESHOLD {
        events.push(MarketEvent::SubPeriodEnding);
    }

    for (major, sub, label) in DASHA_COMBINATIONS {
        if cycle.major == *major && cycle.sub == *sub {
            events.push(MarketEvent::Combination { label });
        }
    }

    for (segment_ruler, major, label) in SEGMENT_COMBINATIONS {
        if segment.ruler == *segment_ruler && cycle.major == *major {
            events.push(MarketEvent::Combination { label });
        }
    }

    events
}

//! Session aggregator: reduces a record sequence to summary statistics.

use tracing::debug;
use types::{
    Direction, NotableWindow, PredictionRecord, RiskAssessment, RiskLevel, RulerShare,
    SessionSummary, WindowKind, RULER_COUNT,
};

/// Volatility above which a minute counts as high-volatility.
pub const HIGH_VOLATILITY_THRESHOLD: f64 = 0.7;

/// Influence score above which a directional minute counts as strong.
pub const STRONG_INFLUENCE_THRESHOLD: f64 = 0.7;

/// Average volatility above which the session reads moderately volatile.
pub const MODERATE_VOLATILITY_THRESHOLD: f64 = 0.5;

/// High-volatility ratio strictly above this is HIGH risk.
pub const HIGH_RISK_RATIO: f64 = 0.3;

/// High-volatility ratio strictly above this (and not HIGH) is MEDIUM risk.
pub const MEDIUM_RISK_RATIO: f64 = 0.15;

/// How many high-volatility minutes a window reports.
const HIGH_VOLATILITY_WINDOW_LIMIT: usize = 3;

/// How many strong directional minutes a window reports.
const DIRECTIONAL_WINDOW_LIMIT: usize = 2;

/// How many dominant rulers the summary reports.
const DOMINANT_RULER_LIMIT: usize = 3;

/// Summarize a full record sequence.
///
/// An empty sequence is a legitimate outcome of a zero-length window and
/// yields the defined empty summary rather than an error.
pub fn summarize(records: &[PredictionRecord]) -> SessionSummary {
    if records.is_empty() {
        debug!("summarizing empty record sequence");
        return SessionSummary::empty();
    }

    let (direction, confidence) = overall_direction(records);
    let average_volatility =
        records.iter().map(|r| r.volatility).sum::<f64>() / records.len() as f64;

    SessionSummary {
        total_minutes: records.len(),
        direction,
        confidence,
        average_volatility,
        character: session_character(direction, average_volatility),
        windows: notable_windows(records),
        dominant_rulers: dominant_rulers(records),
        risk: assess_risk(records),
    }
}

/// Majority direction across all records plus its vote share.
///
/// Ties break to the first bucket in `Direction::VOTE_PRIORITY` reaching
/// the maximum count, the same rule the per-minute scorer uses.
fn overall_direction(records: &[PredictionRecord]) -> (Direction, f64) {
    let mut winner = Direction::VOTE_PRIORITY[0];
    let mut best = 0;
    for candidate in Direction::VOTE_PRIORITY {
        let count = records.iter().filter(|r| r.direction == candidate).count();
        if count > best {
            best = count;
            winner = candidate;
        }
    }
    (winner, best as f64 / records.len() as f64)
}

/// Human-readable session character label.
fn session_character(direction: Direction, average_volatility: f64) -> String {
    if average_volatility > HIGH_VOLATILITY_THRESHOLD {
        "Highly Volatile".to_string()
    } else if average_volatility > MODERATE_VOLATILITY_THRESHOLD {
        format!("Moderately Volatile {}", direction)
    } else {
        format!("Stable {}", direction)
    }
}

/// Collect the notable windows, omitting categories with no matches.
fn notable_windows(records: &[PredictionRecord]) -> Vec<NotableWindow> {
    let mut windows = Vec::new();

    let high_volatility: Vec<String> = records
        .iter()
        .filter(|r| r.volatility > HIGH_VOLATILITY_THRESHOLD)
        .take(HIGH_VOLATILITY_WINDOW_LIMIT)
        .map(|r| r.time_label())
        .collect();
    if !high_volatility.is_empty() {
        windows.push(NotableWindow {
            kind: WindowKind::HighVolatility,
            minutes: high_volatility,
        });
    }

    let strong_bullish = strong_directional(records, Direction::Bullish);
    if !strong_bullish.is_empty() {
        windows.push(NotableWindow {
            kind: WindowKind::StrongBullish,
            minutes: strong_bullish,
        });
    }

    let strong_bearish = strong_directional(records, Direction::Bearish);
    if !strong_bearish.is_empty() {
        windows.push(NotableWindow {
            kind: WindowKind::StrongBearish,
            minutes: strong_bearish,
        });
    }

    windows
}

fn strong_directional(records: &[PredictionRecord], direction: Direction) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.direction == direction && r.influence > STRONG_INFLUENCE_THRESHOLD)
        .take(DIRECTIONAL_WINDOW_LIMIT)
        .map(|r| r.time_label())
        .collect()
}

/// Tally every (major, sub, segment) ruler occurrence and rank the top
/// rulers by frequency. Equal counts keep dasha order.
fn dominant_rulers(records: &[PredictionRecord]) -> Vec<RulerShare> {
    let mut counts = [0usize; RULER_COUNT];
    for record in records {
        counts[record.cycle.major.index()] += 1;
        counts[record.cycle.sub.index()] += 1;
        counts[record.segment.ruler.index()] += 1;
    }

    let total = records.len() * 3;
    let mut shares: Vec<RulerShare> = types::Ruler::ALL
        .iter()
        .map(|ruler| RulerShare {
            ruler: *ruler,
            count: counts[ruler.index()],
            percentage: counts[ruler.index()] as f64 / total as f64 * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares.truncate(DOMINANT_RULER_LIMIT);
    shares.retain(|share| share.count > 0);
    shares
}

/// Risk bucket from the high-volatility minute ratio.
///
/// Both thresholds are strict: a ratio of exactly 0.3 is MEDIUM and
/// exactly 0.15 is LOW.
fn assess_risk(records: &[PredictionRecord]) -> RiskAssessment {
    let high = records
        .iter()
        .filter(|r| r.volatility > HIGH_VOLATILITY_THRESHOLD)
        .count();
    let ratio = high as f64 / records.len() as f64;

    let level = if ratio > HIGH_RISK_RATIO {
        RiskLevel::High
    } else if ratio > MEDIUM_RISK_RATIO {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    RiskAssessment::from_level(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use types::{CycleState, EventList, Longitude, Ruler};

    /// Fabricate a record with the given scalar outcome; the astrological
    /// fields are fixed and irrelevant to aggregation except the rulers.
    fn record(minute: i64, volatility: f64, direction: Direction, influence: f64) -> PredictionRecord {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 9, 15, 0).unwrap();
        PredictionRecord {
            instant: start + Duration::minutes(minute),
            longitude: Longitude(5.0),
            segment: engine::tables::SEGMENTS[0],
            segment_progress: 0.4,
            cycle: CycleState {
                major: Ruler::Venus,
                sub: Ruler::Sun,
                major_progress: 0.5,
                sub_progress: 0.5,
            },
            volatility,
            direction,
            influence,
            events: EventList::new(),
        }
    }

    fn flat_records(n: usize, volatility: f64, direction: Direction) -> Vec<PredictionRecord> {
        (0..n)
            .map(|i| record(i as i64, volatility, direction, volatility))
            .collect()
    }

    #[test]
    fn test_empty_sequence_yields_empty_summary() {
        assert_eq!(summarize(&[]), SessionSummary::empty());
    }

    #[test]
    fn test_overall_direction_and_confidence() {
        let mut records = flat_records(60, 0.4, Direction::Bullish);
        records.extend(flat_records(40, 0.4, Direction::Bearish));
        let summary = summarize(&records);
        assert_eq!(summary.direction, Direction::Bullish);
        assert!((summary.confidence - 0.6).abs() < 1e-12);
        assert_eq!(summary.total_minutes, 100);
    }

    #[test]
    fn test_direction_tie_breaks_by_priority() {
        let mut records = flat_records(50, 0.4, Direction::Bearish);
        records.extend(flat_records(50, 0.4, Direction::Bullish));
        let summary = summarize(&records);
        assert_eq!(summary.direction, Direction::Bullish);
        assert!((summary.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_session_character_labels() {
        assert_eq!(
            summarize(&flat_records(10, 0.8, Direction::Bullish)).character,
            "Highly Volatile"
        );
        assert_eq!(
            summarize(&flat_records(10, 0.6, Direction::Bearish)).character,
            "Moderately Volatile Bearish"
        );
        assert_eq!(
            summarize(&flat_records(10, 0.3, Direction::Bullish)).character,
            "Stable Bullish"
        );
    }

    #[test]
    fn test_character_thresholds_are_strict() {
        // Exactly 0.5 average (exact in binary) is still stable; just
        // above 0.7 flips to highly volatile.
        assert!(summarize(&flat_records(10, 0.5, Direction::Neutral))
            .character
            .starts_with("Stable"));
        assert_eq!(
            summarize(&flat_records(10, 0.71, Direction::Neutral)).character,
            "Highly Volatile"
        );
    }

    #[test]
    fn test_high_volatility_window_reports_first_three() {
        let mut records = flat_records(10, 0.4, Direction::Neutral);
        for minute in [2, 4, 6, 8] {
            records[minute] = record(minute as i64, 0.9, Direction::Neutral, 0.5);
        }
        let summary = summarize(&records);
        let window = summary
            .windows
            .iter()
            .find(|w| w.kind == WindowKind::HighVolatility)
            .unwrap();
        assert_eq!(window.minutes, vec!["09:17", "09:19", "09:21"]);
    }

    #[test]
    fn test_directional_windows_report_first_two() {
        let mut records = flat_records(10, 0.4, Direction::Neutral);
        records[1] = record(1, 0.4, Direction::Bullish, 0.8);
        records[3] = record(3, 0.4, Direction::Bullish, 0.9);
        records[5] = record(5, 0.4, Direction::Bullish, 0.95);
        records[7] = record(7, 0.4, Direction::Bearish, 0.8);
        let summary = summarize(&records);

        let bullish = summary
            .windows
            .iter()
            .find(|w| w.kind == WindowKind::StrongBullish)
            .unwrap();
        assert_eq!(bullish.minutes, vec!["09:16", "09:18"]);

        let bearish = summary
            .windows
            .iter()
            .find(|w| w.kind == WindowKind::StrongBearish)
            .unwrap();
        assert_eq!(bearish.minutes, vec!["09:22"]);
    }

    #[test]
    fn test_weak_directional_minutes_are_not_windows() {
        // Bullish but below the influence threshold: no window category.
        let summary = summarize(&flat_records(10, 0.4, Direction::Bullish));
        assert!(summary
            .windows
            .iter()
            .all(|w| w.kind != WindowKind::StrongBullish));
    }

    #[test]
    fn test_dominant_rulers_rank_and_percentage() {
        let records = flat_records(10, 0.4, Direction::Neutral);
        let summary = summarize(&records);
        // Every record contributes Venus (major), Sun (sub), Ketu (segment).
        assert_eq!(summary.dominant_rulers.len(), 3);
        for share in &summary.dominant_rulers {
            assert_eq!(share.count, 10);
            assert!((share.percentage - 100.0 / 3.0).abs() < 1e-9);
        }
        // Equal counts keep dasha order: Ketu, Venus, Sun.
        assert_eq!(summary.dominant_rulers[0].ruler, Ruler::Ketu);
        assert_eq!(summary.dominant_rulers[1].ruler, Ruler::Venus);
        assert_eq!(summary.dominant_rulers[2].ruler, Ruler::Sun);
    }

    #[test]
    fn test_risk_high_above_strict_threshold() {
        // 31 of 100 high-volatility minutes: ratio 0.31 > 0.3.
        let mut records = flat_records(69, 0.4, Direction::Neutral);
        records.extend(flat_records(31, 0.9, Direction::Neutral));
        let summary = summarize(&records);
        assert_eq!(summary.risk.level, RiskLevel::High);
        assert_eq!(summary.risk.advice, "Reduce position sizing");
    }

    #[test]
    fn test_risk_exactly_thirty_percent_is_medium() {
        let mut records = flat_records(70, 0.4, Direction::Neutral);
        records.extend(flat_records(30, 0.9, Direction::Neutral));
        assert_eq!(summarize(&records).risk.level, RiskLevel::Medium);
    }

    #[test]
    fn test_risk_exactly_fifteen_percent_is_low() {
        let mut records = flat_records(85, 0.4, Direction::Neutral);
        records.extend(flat_records(15, 0.9, Direction::Neutral));
        let summary = summarize(&records);
        assert_eq!(summary.risk.level, RiskLevel::Low);
        assert_eq!(summary.risk.advice, "Favorable for trading");
    }

    #[test]
    fn test_risk_between_thresholds_is_medium() {
        let mut records = flat_records(80, 0.4, Direction::Neutral);
        records.extend(flat_records(20, 0.9, Direction::Neutral));
        let summary = summarize(&records);
        assert_eq!(summary.risk.level, RiskLevel::Medium);
        assert_eq!(summary.risk.advice, "Normal caution advised");
    }

    #[test]
    fn test_average_volatility_is_mean() {
        let mut records = flat_records(5, 0.2, Direction::Neutral);
        records.extend(flat_records(5, 0.6, Direction::Neutral));
        let summary = summarize(&records);
        assert!((summary.average_volatility - 0.4).abs() < 1e-12);
    }
}

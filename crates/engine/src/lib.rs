//! The prediction engine: maps an instant to a scored, labeled record.
//!
//! The pipeline for a single instant runs the components in order:
//!
//! ```text
//! ephemeris ─► sky (normalize) ─► segments (resolve)
//!                                      │
//! epoch ────► cycle (major/sub) ───────┤
//!                                      ▼
//!                         score (blend + vote + boost)
//!                                      ▼
//!                         events (boundaries + combinations)
//!                                      ▼
//!                               PredictionRecord
//! ```
//!
//! Everything downstream of the ephemeris call is pure arithmetic over the
//! static tables, so records are a deterministic function of
//! `(instant, epoch)` and safe to evaluate concurrently.

pub mod cycle;
mod error;
pub mod events;
pub mod score;
pub mod segments;
pub mod sky;
pub mod tables;

pub use error::{EngineError, Result};

use chrono::{DateTime, Utc};
use ephem::Ephemeris;
use types::PredictionRecord;

/// Score one instant into a prediction record.
///
/// Fails if the provider cannot serve the instant or if `instant` precedes
/// `epoch`; both failures carry the offending inputs.
pub fn predict(
    ephemeris: &dyn Ephemeris,
    epoch: DateTime<Utc>,
    instant: DateTime<Utc>,
) -> Result<PredictionRecord> {
    let longitude = sky::moon_longitude(ephemeris, instant)?;
    let segment = segments::resolve(longitude);
    let segment_progress = segment.progress(longitude);
    let cycle = cycle::resolve(epoch, instant)?;

    let influence = score::score(
        tables::attributes(cycle.major),
        tables::attributes(cycle.sub),
        tables::attributes(segment.ruler),
    );
    let events = events::detect(segment, segment_progress, &cycle);

    Ok(PredictionRecord {
        instant,
        longitude,
        segment: *segment,
        segment_progress,
        cycle,
        volatility: influence.volatility,
        direction: influence.direction,
        influence: influence.score,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ephem::LinearMoon;
    use types::Ruler;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1992, 7, 1, 9, 15, 0).unwrap()
    }

    #[test]
    fn test_predict_at_epoch() {
        let eph = LinearMoon::new(epoch(), 0.0);
        let record = predict(&eph, epoch(), epoch()).unwrap();

        assert_eq!(record.instant, epoch());
        assert_eq!(record.segment.name, "Ashwini");
        assert_eq!(record.cycle.major, Ruler::Ketu);
        assert_eq!(record.cycle.sub, Ruler::Ketu);
        // Ketu major, Ketu sub, Ketu segment: 0.8 across the board.
        assert!((record.volatility - 0.8).abs() < 1e-12);
        // Full uncertain alignment boosts the score.
        assert_eq!(record.influence, 1.0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let eph = LinearMoon::new(epoch(), 42.0);
        let instant = epoch() + Duration::days(400) + Duration::minutes(17);
        let a = predict(&eph, epoch(), instant).unwrap();
        let b = predict(&eph, epoch(), instant).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_predict_rejects_pre_epoch_instant() {
        let eph = LinearMoon::new(epoch(), 0.0);
        let err = predict(&eph, epoch(), epoch() - Duration::days(1)).unwrap_err();
        assert!(matches!(err, EngineError::InstantBeforeEpoch { .. }));
    }

    #[test]
    fn test_predict_consistent_fields() {
        let eph = LinearMoon::new(epoch(), 200.0);
        let instant = epoch() + Duration::days(3000);
        let record = predict(&eph, epoch(), instant).unwrap();

        assert!(record.segment.contains(record.longitude));
        assert!((0.0..=1.0).contains(&record.segment_progress));
        assert!((0.0..=1.0).contains(&record.volatility));
        assert!((0.0..=1.0).contains(&record.influence));
        assert!(record.influence >= record.volatility);
    }
}

//! Sequence generator: one prediction record per minute of a window.

use crate::window::SessionWindow;
use engine::Result;
use ephem::Ephemeris;
use tracing::debug;
use types::PredictionRecord;

/// Generate the ordered per-minute record sequence for a window.
///
/// A pure function of its inputs: identical calls produce identical
/// sequences. Records are independent of one another and evaluated in
/// parallel when the `parallel` feature is on; the output is ordered
/// ascending by instant either way. A single provider failure aborts the
/// whole generation; there is no partial-sequence-with-gaps result.
pub fn generate(
    ephemeris: &dyn Ephemeris,
    window: &SessionWindow,
) -> Result<Vec<PredictionRecord>> {
    generate_with(ephemeris, window, false)
}

/// [`generate`] with a runtime override forcing sequential evaluation.
pub fn generate_with(
    ephemeris: &dyn Ephemeris,
    window: &SessionWindow,
    force_sequential: bool,
) -> Result<Vec<PredictionRecord>> {
    let minutes = window.minutes();
    if minutes.is_empty() {
        debug!("empty session window, nothing to generate");
        return Ok(Vec::new());
    }

    let records = parallel::try_map_slice(
        &minutes,
        |instant| engine::predict(ephemeris, window.epoch, *instant),
        force_sequential,
    )?;

    debug!("generated {} minute records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::market_epoch;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use ephem::{EphemerisError, LinearMoon};

    struct FlakyEphemeris {
        fail_at: DateTime<Utc>,
    }

    impl Ephemeris for FlakyEphemeris {
        fn moon_longitude(&self, instant: DateTime<Utc>) -> ephem::Result<f64> {
            if instant == self.fail_at {
                Err(EphemerisError::Unavailable("transient".to_string()))
            } else {
                Ok(100.0)
            }
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 15, 0).unwrap()
    }

    fn window(minutes: i64) -> SessionWindow {
        SessionWindow::new(
            start(),
            start() + Duration::minutes(minutes - 1),
            market_epoch(),
        )
    }

    #[test]
    fn test_one_record_per_minute() {
        let eph = LinearMoon::new(market_epoch(), 0.0);
        let records = generate(&eph, &window(90)).unwrap();
        assert_eq!(records.len(), 90);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.instant, start() + Duration::minutes(i as i64));
        }
    }

    #[test]
    fn test_empty_window_generates_nothing() {
        let eph = LinearMoon::new(market_epoch(), 0.0);
        let inverted =
            SessionWindow::new(start(), start() - Duration::minutes(1), market_epoch());
        assert!(generate(&eph, &inverted).unwrap().is_empty());
    }

    #[test]
    fn test_single_failure_aborts_generation() {
        let eph = FlakyEphemeris {
            fail_at: start() + Duration::minutes(30),
        };
        let result = generate(&eph, &window(60));
        assert!(result.is_err());
    }

    #[test]
    fn test_sequential_override_matches_parallel() {
        let eph = LinearMoon::new(market_epoch(), 120.0);
        let a = generate_with(&eph, &window(120), false).unwrap();
        let b = generate_with(&eph, &window(120), true).unwrap();
        assert_eq!(a, b);
    }
}

//! Ephemeris provider seam for the prediction engine.
//!
//! The engine only needs one astronomical input: the Moon's geocentric
//! ecliptic longitude at an instant. [`Ephemeris`] is the seam for that
//! collaborator; [`MeeusMoon`] is the built-in provider (truncated lunar
//! theory, good to a few hundredths of a degree), and [`LinearMoon`] is a
//! mean-motion model for deterministic tests and fast playback.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;

/// Result type for ephemeris queries.
pub type Result<T> = std::result::Result<T, EphemerisError>;

/// Errors raised by an ephemeris provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EphemerisError {
    /// The instant falls outside the provider's supported range.
    OutOfRange(DateTime<Utc>),
    /// The provider could not serve the query.
    Unavailable(String),
}

impl fmt::Display for EphemerisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemerisError::OutOfRange(instant) => write!(
                f,
                "instant {} is outside the supported ephemeris range ({}..={})",
                instant, MIN_YEAR, MAX_YEAR
            ),
            EphemerisError::Unavailable(reason) => {
                write!(f, "ephemeris unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for EphemerisError {}

/// Provider of the Moon's angular position.
///
/// Returns the geocentric ecliptic longitude in degrees. The value need not
/// be normalized; the engine's sky adapter reduces it into `[0, 360)`.
pub trait Ephemeris: Send + Sync {
    /// Moon ecliptic longitude in degrees at `instant`.
    fn moon_longitude(&self, instant: DateTime<Utc>) -> Result<f64>;
}

// =============================================================================
// Julian day conversion
// =============================================================================

/// Julian day number of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian day number of the J2000.0 epoch.
const J2000_JD: f64 = 2_451_545.0;

/// Convert an instant to a Julian day number.
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

// =============================================================================
// MeeusMoon
// =============================================================================

/// First year the truncated series is trusted for.
pub const MIN_YEAR: i32 = 1900;

/// Last year the truncated series is trusted for.
pub const MAX_YEAR: i32 = 2100;

/// One periodic term of the longitude series.
///
/// `micro_deg` is the coefficient in millionths of a degree; the argument is
/// `d·D + m·M + mp·M' + f·F` over the fundamental lunar arguments. Terms
/// with a solar-anomaly multiplier are scaled by the eccentricity factor E.
struct LunarTerm {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    micro_deg: f64,
}

const fn term(d: i8, m: i8, mp: i8, f: i8, micro_deg: f64) -> LunarTerm {
    LunarTerm {
        d,
        m,
        mp,
        f,
        micro_deg,
    }
}

/// Principal longitude terms of the lunar theory, largest first.
///
/// Truncated at 1e-5 degree coefficients; plenty below the per-minute
/// segment resolution the engine needs.
const LONGITUDE_TERMS: [LunarTerm; 24] = [
    term(0, 0, 1, 0, 6_288_774.0),
    term(2, 0, -1, 0, 1_274_027.0),
    term(2, 0, 0, 0, 658_314.0),
    term(0, 0, 2, 0, 213_618.0),
    term(0, 1, 0, 0, -185_116.0),
    term(0, 0, 0, 2, -114_332.0),
    term(2, 0, -2, 0, 58_793.0),
    term(2, -1, -1, 0, 57_066.0),
    term(2, 0, 1, 0, 53_322.0),
    term(2, -1, 0, 0, 45_758.0),
    term(0, 1, -1, 0, -40_923.0),
    term(1, 0, 0, 0, -34_720.0),
    term(0, 1, 1, 0, -30_383.0),
    term(2, 0, 0, -2, 15_327.0),
    term(0, 0, 1, 2, -12_528.0),
    term(0, 0, 1, -2, 10_980.0),
    term(4, 0, -1, 0, 10_675.0),
    term(0, 0, 3, 0, 10_034.0),
    term(4, 0, -2, 0, 8_548.0),
    term(2, 1, -1, 0, -7_888.0),
    term(2, 1, 0, 0, -6_766.0),
    term(1, 0, -1, 0, -5_163.0),
    term(1, 1, 0, 0, 4_987.0),
    term(2, -1, 1, 0, 4_036.0),
];

/// Built-in lunar longitude provider.
///
/// Evaluates the mean longitude plus the principal periodic terms of the
/// lunar theory. Instants outside [`MIN_YEAR`]..=[`MAX_YEAR`] are refused
/// rather than extrapolated.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeeusMoon;

impl MeeusMoon {
    pub fn new() -> Self {
        MeeusMoon
    }
}

impl Ephemeris for MeeusMoon {
    fn moon_longitude(&self, instant: DateTime<Utc>) -> Result<f64> {
        let year = instant.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EphemerisError::OutOfRange(instant));
        }

        // Julian centuries since J2000.0.
        let t = (julian_day(instant) - J2000_JD) / 36_525.0;

        // Fundamental arguments, degrees.
        let lp = 218.316_447_7
            + 481_267.881_234_21 * t
            - 0.001_578_6 * t * t
            + t * t * t / 538_841.0
            - t * t * t * t / 65_194_000.0;
        let d = 297.850_192_1
            + 445_267.111_403_4 * t
            - 0.001_881_9 * t * t
            + t * t * t / 545_868.0
            - t * t * t * t / 113_065_000.0;
        let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t * t
            + t * t * t / 24_490_000.0;
        let mp = 134.963_396_4
            + 477_198.867_505_5 * t
            + 0.008_741_4 * t * t
            + t * t * t / 69_699.0
            - t * t * t * t / 14_712_000.0;
        let f = 93.272_095_0 + 483_202.017_523_3 * t
            - 0.003_653_9 * t * t
            - t * t * t / 3_526_000.0
            + t * t * t * t / 863_310_000.0;

        // Eccentricity correction for terms involving the solar anomaly.
        let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

        let mut sum_micro = 0.0;
        for term in &LONGITUDE_TERMS {
            let arg = (term.d as f64 * d
                + term.m as f64 * m
                + term.mp as f64 * mp
                + term.f as f64 * f)
                .to_radians();
            let scale = match term.m.abs() {
                0 => 1.0,
                1 => e,
                _ => e * e,
            };
            sum_micro += term.micro_deg * scale * arg.sin();
        }

        // Venus, Jupiter, and flattening corrections.
        let a1 = 119.75 + 131.849 * t;
        let a2 = 53.09 + 479_264.290 * t;
        sum_micro += 3_958.0 * a1.to_radians().sin();
        sum_micro += 1_962.0 * (lp - f).to_radians().sin();
        sum_micro += 318.0 * a2.to_radians().sin();

        Ok(lp + sum_micro / 1_000_000.0)
    }
}

// =============================================================================
// LinearMoon
// =============================================================================

/// Mean sidereal motion of the Moon, degrees per day.
pub const MEAN_MOTION_DEG_PER_DAY: f64 = 13.176_358;

/// Mean-motion lunar model: longitude advances linearly from a reference.
///
/// Exact, total, and trivially predictable; used by tests and anywhere a
/// deterministic fixture beats astronomical fidelity.
#[derive(Debug, Clone, Copy)]
pub struct LinearMoon {
    /// Reference instant.
    pub epoch: DateTime<Utc>,
    /// Longitude at the reference instant, degrees.
    pub epoch_longitude_deg: f64,
    /// Angular rate, degrees per day.
    pub deg_per_day: f64,
}

impl LinearMoon {
    /// Model starting at `epoch_longitude_deg` with the mean lunar motion.
    pub fn new(epoch: DateTime<Utc>, epoch_longitude_deg: f64) -> Self {
        Self {
            epoch,
            epoch_longitude_deg,
            deg_per_day: MEAN_MOTION_DEG_PER_DAY,
        }
    }

    /// Override the angular rate.
    pub fn with_rate(mut self, deg_per_day: f64) -> Self {
        self.deg_per_day = deg_per_day;
        self
    }
}

impl Ephemeris for LinearMoon {
    fn moon_longitude(&self, instant: DateTime<Utc>) -> Result<f64> {
        let elapsed_days = (instant - self.epoch).num_seconds() as f64 / 86_400.0;
        Ok(self.epoch_longitude_deg + self.deg_per_day * elapsed_days)
    }
}

// =============================================================================
// Tests
// =============================================================================

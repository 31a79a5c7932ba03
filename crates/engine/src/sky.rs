//! Sky position adapter over the ephemeris provider.

use crate::Result;
use chrono::{DateTime, Utc};
use ephem::Ephemeris;
use types::Longitude;

/// Moon ecliptic longitude at `instant`, reduced into `[0, 360)`.
///
/// Provider failures propagate unchanged; this layer neither retries nor
/// substitutes a default.
pub fn moon_longitude(ephemeris: &dyn Ephemeris, instant: DateTime<Utc>) -> Result<Longitude> {
    let degrees = ephemeris.moon_longitude(instant)?;
    Ok(Longitude::new(degrees))
}

//! Segment resolver: maps a longitude to its owning ecliptic segment.

use crate::tables::SEGMENTS;
use types::{Longitude, Segment};

/// Resolve a longitude to its segment.
///
/// Scans the 27 segments in ascending-range order and returns the first
/// whose half-open range contains the longitude. A longitude of exactly 360
/// cannot come out of the sky adapter, but is absorbed into the first
/// segment so the pipeline stays total for every minute.
pub fn resolve(longitude: Longitude) -> &'static Segment {
    SEGMENTS
        .iter()
        .find(|segment| segment.contains(longitude))
        .unwrap_or(&SEGMENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Ruler, SEGMENT_SPAN_DEG};

    #[test]
    fn test_resolve_first_segment() {
        let segment = resolve(Longitude(0.0));
        assert_eq!(segment.name, "Ashwini");
        assert_eq!(segment.ruler, Ruler::Ketu);
    }

    #[test]
    fn test_resolve_interior_points() {
        assert_eq!(resolve(Longitude(45.0)).name, "Rohini");
        assert_eq!(resolve(Longitude(133.4)).name, "Purva Phalguni");
        assert_eq!(resolve(Longitude(359.9)).name, "Revati");
    }

    #[test]
    fn test_resolve_shared_boundaries_go_to_upper_segment() {
        // A boundary value belongs to the segment that starts there.
        for i in 1..SEGMENTS.len() {
            let boundary = SEGMENTS[i].start_deg;
            assert_eq!(resolve(Longitude(boundary)).name, SEGMENTS[i].name);
        }
    }

    #[test]
    fn test_resolve_360_falls_back_to_first() {
        let segment = resolve(Longitude(360.0));
        assert_eq!(segment.name, "Ashwini");
    }

    #[test]
    fn test_every_longitude_resolves() {
        for i in 0..36_000 {
            let lon = Longitude(i as f64 / 100.0);
            let segment = resolve(lon);
            assert!(
                segment.contains(lon),
                "{} resolved to non-containing {}",
                lon,
                segment.name
            );
        }
    }

    #[test]
    fn test_segment_span_value() {
        assert!((SEGMENT_SPAN_DEG - 13.3333).abs() < 1e-3);
    }
}

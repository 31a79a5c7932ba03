//! Static lookup tables: segments, ruler attributes, and period lengths.
//!
//! All three tables are immutable `'static` data, initialized at compile
//! time and safe for unrestricted concurrent reads.

use types::{
    Direction, Ruler, RulerAttributes, Segment, RULER_COUNT, SEGMENT_COUNT, SEGMENT_SPAN_DEG,
};

// =============================================================================
// Segment table
// =============================================================================

const fn seg(index: usize, name: &'static str, ruler: Ruler) -> Segment {
    Segment {
        name,
        ruler,
        start_deg: index as f64 * SEGMENT_SPAN_DEG,
        end_deg: (index as f64 + 1.0) * SEGMENT_SPAN_DEG,
    }
}

/// The 27 fixed segments in ascending-range order.
///
/// Bounds are generated from the exact 360/27 span, so adjacent segments
/// share the same floating-point boundary and the partition is contiguous.
/// Rulers repeat the nine-ruler dasha order three times around the ecliptic.
pub static SEGMENTS: [Segment; SEGMENT_COUNT] = [
    seg(0, "Ashwini", Ruler::Ketu),
    seg(1, "Bharani", Ruler::Venus),
    seg(2, "Krittika", Ruler::Sun),
    seg(3, "Rohini", Ruler::Moon),
    seg(4, "Mrigashira", Ruler::Mars),
    seg(5, "Ardra", Ruler::Rahu),
    seg(6, "Punarvasu", Ruler::Jupiter),
    seg(7, "Pushya", Ruler::Saturn),
    seg(8, "Ashlesha", Ruler::Mercury),
    seg(9, "Magha", Ruler::Ketu),
    seg(10, "Purva Phalguni", Ruler::Venus),
    seg(11, "Uttara Phalguni", Ruler::Sun),
    seg(12, "Hasta", Ruler::Moon),
    seg(13, "Chitra", Ruler::Mars),
    seg(14, "Swati", Ruler::Rahu),
    seg(15, "Vishakha", Ruler::Jupiter),
    seg(16, "Anuradha", Ruler::Saturn),
    seg(17, "Jyeshtha", Ruler::Mercury),
    seg(18, "Mula", Ruler::Ketu),
    seg(19, "Purva Ashadha", Ruler::Venus),
    seg(20, "Uttara Ashadha", Ruler::Sun),
    seg(21, "Shravana", Ruler::Moon),
    seg(22, "Dhanishta", Ruler::Mars),
    seg(23, "Shatabhisha", Ruler::Rahu),
    seg(24, "Purva Bhadrapada", Ruler::Jupiter),
    seg(25, "Uttara Bhadrapada", Ruler::Saturn),
    seg(26, "Revati", Ruler::Mercury),
];

// =============================================================================
// Ruler attribute table
// =============================================================================

const fn attrs(
    ruler: Ruler,
    volatility: f64,
    direction: Direction,
    impact: &'static str,
) -> RulerAttributes {
    RulerAttributes {
        ruler,
        volatility,
        direction,
        impact,
    }
}

/// Influence attributes per ruler, indexed by `Ruler::index()`.
pub static RULER_ATTRIBUTES: [RulerAttributes; RULER_COUNT] = [
    attrs(Ruler::Ketu, 0.8, Direction::Uncertain, "sudden_changes"),
    attrs(Ruler::Venus, 0.3, Direction::Bullish, "steady_growth"),
    attrs(Ruler::Sun, 0.6, Direction::Bullish, "leadership_moves"),
    attrs(Ruler::Moon, 0.5, Direction::Neutral, "sentiment_driven"),
    attrs(Ruler::Mars, 0.9, Direction::Bearish, "aggressive_moves"),
    attrs(Ruler::Rahu, 0.7, Direction::Uncertain, "unexpected_trends"),
    attrs(Ruler::Jupiter, 0.2, Direction::Bullish, "expansion_growth"),
    attrs(Ruler::Saturn, 0.4, Direction::Bearish, "correction_consolidation"),
    attrs(Ruler::Mercury, 0.5, Direction::Neutral, "news_driven"),
];

/// Look up the influence attributes of a ruler.
#[inline]
pub fn attributes(ruler: Ruler) -> &'static RulerAttributes {
    &RULER_ATTRIBUTES[ruler.index()]
}

// =============================================================================
// Period length table
// =============================================================================

/// Days per calendar year used for period arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Total length of one full macro-cycle in years.
pub const CYCLE_YEARS: u32 = 120;

/// Major-period length in years for each ruler.
pub const fn period_years(ruler: Ruler) -> u32 {
    match ruler {
        Ruler::Ketu => 7,
        Ruler::Venus => 20,
        Ruler::Sun => 6,
        Ruler::Moon => 10,
        Ruler::Mars => 7,
        Ruler::Rahu => 18,
        Ruler::Jupiter => 16,
        Ruler::Saturn => 19,
        Ruler::Mercury => 17,
    }
}

/// Major-period length in days for a ruler.
#[inline]
pub fn period_days(ruler: Ruler) -> f64 {
    period_years(ruler) as f64 * DAYS_PER_YEAR
}

/// Length of one full macro-cycle in days.
#[inline]
pub fn cycle_length_days() -> f64 {
    CYCLE_YEARS as f64 * DAYS_PER_YEAR
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use types::Longitude;

    #[test]
    fn test_segments_are_contiguous() {
        for pair in SEGMENTS.windows(2) {
            assert_eq!(pair[0].end_deg, pair[1].start_deg);
        }
        assert_eq!(SEGMENTS[0].start_deg, 0.0);
        assert!(SEGMENTS[SEGMENT_COUNT - 1].end_deg >= 360.0 - 1e-9);
    }

    #[test]
    fn test_segment_spans_equal() {
        for segment in &SEGMENTS {
            assert!((segment.span() - SEGMENT_SPAN_DEG).abs() < 1e-9);
        }
    }

    #[test]
    fn test_partition_covers_every_longitude() {
        // Dense sweep plus the exact shared boundaries: exactly one owner.
        let mut probes: Vec<f64> = (0..3600).map(|i| i as f64 / 10.0).collect();
        probes.extend(SEGMENTS.iter().map(|s| s.start_deg));
        for probe in probes {
            if probe >= 360.0 {
                continue;
            }
            let owners = SEGMENTS
                .iter()
                .filter(|s| s.contains(Longitude(probe)))
                .count();
            assert_eq!(owners, 1, "longitude {} owned by {} segments", probe, owners);
        }
    }

    #[test]
    fn test_segment_rulers_repeat_dasha_order() {
        for (i, segment) in SEGMENTS.iter().enumerate() {
            assert_eq!(segment.ruler, Ruler::ALL[i % RULER_COUNT]);
        }
    }

    #[test]
    fn test_attribute_table_indexed_by_ruler() {
        for ruler in Ruler::ALL {
            assert_eq!(attributes(ruler).ruler, ruler);
        }
        assert_eq!(attributes(Ruler::Jupiter).volatility, 0.2);
        assert_eq!(attributes(Ruler::Mars).direction, Direction::Bearish);
        assert_eq!(attributes(Ruler::Ketu).impact, "sudden_changes");
    }

    #[test]
    fn test_period_years_sum_to_cycle() {
        let total: u32 = Ruler::ALL.iter().map(|r| period_years(*r)).sum();
        assert_eq!(total, CYCLE_YEARS);
    }

    #[test]
    fn test_period_days_sum_exactly() {
        // years * 365.25 is exact in binary floating point, so the spans
        // must sum to the macro-cycle length with no drift at all.
        let total: f64 = Ruler::ALL.iter().map(|r| period_days(*r)).sum();
        assert_eq!(total, cycle_length_days());
        assert_eq!(total, 43_830.0);
    }
}

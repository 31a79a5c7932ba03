//! Influence scorer: blends the three active ruler influences.

use types::{Direction, RulerAttributes};

/// Weight of the major-period ruler in the volatility blend.
pub const MAJOR_WEIGHT: f64 = 0.4;

/// Weight of the sub-period ruler in the volatility blend.
pub const SUB_WEIGHT: f64 = 0.3;

/// Weight of the segment ruler in the volatility blend.
pub const SEGMENT_WEIGHT: f64 = 0.3;

/// Multiplier applied once when all three directions agree.
pub const ALIGNMENT_BOOST: f64 = 1.3;

/// Scored influence for one minute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Influence {
    /// Weighted volatility blend in `[0, 1]`.
    pub volatility: f64,
    /// Voted direction.
    pub direction: Direction,
    /// Combined score: the blend, alignment-boosted and capped at 1.
    pub score: f64,
}

/// Combine the three active ruler influences into one minute's score.
pub fn score(
    major: &RulerAttributes,
    sub: &RulerAttributes,
    segment: &RulerAttributes,
) -> Influence {
    let volatility = MAJOR_WEIGHT * major.volatility
        + SUB_WEIGHT * sub.volatility
        + SEGMENT_WEIGHT * segment.volatility;

    let direction = vote([major.direction, sub.direction, segment.direction]);

    let aligned = major.direction == sub.direction && sub.direction == segment.direction;
    let score = if aligned {
        (volatility * ALIGNMENT_BOOST).min(1.0)
    } else {
        volatility
    };

    Influence {
        volatility,
        direction,
        score,
    }
}

/// Majority vote over the three directional inputs.
///
/// Ties break to the first bucket in `Direction::VOTE_PRIORITY` reaching
/// the maximum count, so the strict `>` below is what keeps earlier
/// buckets winning.
fn vote(votes: [Direction; 3]) -> Direction {
    let mut winner = Direction::VOTE_PRIORITY[0];
    let mut best = 0;
    for candidate in Direction::VOTE_PRIORITY {
        let count = votes.iter().filter(|v| **v == candidate).count();
        if count > best {
            best = count;
            winner = candidate;
        }
    }
    winner
}

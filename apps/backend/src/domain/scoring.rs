//! Hand finalization: points awarded once the fifth trick resolves.

use super::state::HandSummary;

/// Score a finished hand. `maker_tricks + defender_tricks` must equal 5.
///
/// Makers: 1 point for 3-4 tricks, 2 for a sweep, 4 for a loner sweep.
/// Defenders: 2 points (euchre) when the makers take 2 or fewer.
pub fn summarize_hand(maker_team: u8, maker_tricks: u8, alone: bool) -> HandSummary {
    debug_assert!(maker_tricks <= 5);
    let defender_tricks = 5 - maker_tricks;
    let (points_awarded, awarded_to) = match maker_tricks {
        5 if alone => (4, maker_team),
        5 => (2, maker_team),
        3 | 4 => (1, maker_team),
        _ => (2, 1 - maker_team),
    };
    HandSummary {
        maker_team,
        maker_tricks,
        defender_tricks,
        points_awarded,
        awarded_to,
    }
}

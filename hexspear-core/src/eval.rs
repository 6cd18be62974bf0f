//! Position evaluation

use crate::board::Board;
use crate::units::Player;

/// Material value of one living unit.
pub const UNIT_VALUE: i32 = 100;

/// Sentinel for a decided game; dwarfs any reachable material swing so
/// forced wins always outrank material gain.
pub const WIN_VALUE: i32 = 1_000_000;

/// Score from the perspective of the side to move (negamax convention:
/// the caller negates across plies).
pub fn evaluate(board: &Board, to_move: Player) -> i32 {
    let own = board.unit_count(to_move) as i32;
    let enemy = board.unit_count(to_move.opponent()) as i32;

    if enemy == 0 {
        return WIN_VALUE;
    }
    if own == 0 {
        return -WIN_VALUE;
    }

    (own - enemy) * UNIT_VALUE
}

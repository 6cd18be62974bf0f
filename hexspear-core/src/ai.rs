//! Negamax search with alpha-beta pruning

use crate::board::Board;
use crate::eval::evaluate;
use crate::grid::Pos;
use crate::units::Player;

/// Score bounds chosen so negation never overflows.
const MIN_SCORE: i32 = i32::MIN + 1;
const MAX_SCORE: i32 = i32::MAX - 1;

/// A recommended move with its search score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub from: Pos,
    pub to: Pos,
    pub score: i32,
}

/// Fixed-depth negamax player. Depth is the only bound on work; callers
/// wanting responsiveness impose limits from outside.
pub struct SearchAi {
    pub depth: u32,
}

impl SearchAi {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Best (from, to) for `player`, or None when no unit can act.
    ///
    /// The board is borrowed mutably for trial moves but is returned to
    /// its entry state before this function returns: every snapshot taken
    /// here is restored on every exit path, including skipped candidates.
    pub fn find_best_move(&self, board: &mut Board, player: Player) -> Option<Suggestion> {
        if board.is_game_over() {
            return None;
        }

        let mut alpha = MIN_SCORE;
        let beta = MAX_SCORE;
        let mut best: Option<Suggestion> = None;

        for id in board.unit_ids_of(player) {
            let Some(from) = board.position_of(&id) else {
                continue;
            };
            for to in board.legal_destinations(&id) {
                let snapshot = board.snapshot();
                if !board.execute_move(&id, to) {
                    // The engine guarantees failure left the board alone,
                    // but the take/restore pairing stays unconditional.
                    board.restore(snapshot);
                    continue;
                }
                let score = -negamax(
                    board,
                    player.opponent(),
                    self.depth.saturating_sub(1),
                    -beta,
                    -alpha,
                );
                board.restore(snapshot);

                if best.map_or(true, |b| score > b.score) {
                    best = Some(Suggestion { from, to, score });
                }
                alpha = alpha.max(score);
            }
        }

        if let Some(choice) = best {
            tracing::debug!(
                "best move for {:?}: ({},{}) -> ({},{}) score {}",
                player,
                choice.from.q,
                choice.from.r,
                choice.to.q,
                choice.to.r,
                choice.score
            );
        }
        best
    }
}

/// Classic negamax: one sign-flipped function serves both players. Moves
/// are tried in roster order, six sides each; no ordering heuristic.
fn negamax(board: &mut Board, to_move: Player, depth: u32, mut alpha: i32, beta: i32) -> i32 {
    if depth == 0 || board.is_game_over() {
        return evaluate(board, to_move);
    }

    let mut best = MIN_SCORE;

    'units: for id in board.unit_ids_of(to_move) {
        for to in board.legal_destinations(&id) {
            let snapshot = board.snapshot();
            if !board.execute_move(&id, to) {
                board.restore(snapshot);
                continue;
            }
            let score = -negamax(board, to_move.opponent(), depth - 1, -beta, -alpha);
            board.restore(snapshot);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                // Cutoff covers this unit's remaining moves and all
                // remaining units at this node.
                break 'units;
            }
        }
    }

    if best == MIN_SCORE {
        // The side to move cannot act at all; score the position as it stands.
        return evaluate(board, to_move);
    }
    best
}

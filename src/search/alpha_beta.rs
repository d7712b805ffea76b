//! Minimax with alpha-beta pruning over legal successor positions.
//!
//! Light maximizes and Dark minimizes; all scores are from Light's point of
//! view. A node consults the transposition table before expanding and records
//! the bound its result proves on the way out. The recursion returns `None`
//! once the attached [`SearchControl`] fires, and callers must discard any
//! partially searched subtree when that happens.

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::threading::SearchControl;
use crate::search::transposition_table::{TranspositionTable, SCORE_INFINITY};
use crate::search::zobrist::fingerprint;

/// Nodes between cancellation polls; must be a power of two.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Scores at least this large (in magnitude) encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Score of a position with no legal moves, `ply` plies below the root.
pub fn terminal_score(side_to_move: Color, in_check: bool, ply: u8) -> i32 {
    if !in_check {
        return 0;
    }
    let mate = MATE_SCORE - i32::from(ply);
    match side_to_move {
        Color::Light => -mate,
        Color::Dark => mate,
    }
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

// Mate scores are stored relative to the node, not the root.
#[inline]
fn score_to_table(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score + i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

#[inline]
fn score_from_table(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD && score < SCORE_INFINITY {
        score - i32::from(ply)
    } else if score <= -MATE_THRESHOLD && score > -SCORE_INFINITY {
        score + i32::from(ply)
    } else {
        score
    }
}

/// Per-worker search state. Each root worker owns one; the table and the
/// control are shared.
pub struct SearchContext<'a, G: ?Sized, S: ?Sized> {
    generator: &'a G,
    scorer: &'a S,
    table: Option<&'a TranspositionTable>,
    control: Option<&'a SearchControl>,
    nodes: u64,
    unreported_nodes: u64,
}

impl<'a, G, S> SearchContext<'a, G, S>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    pub fn new(generator: &'a G, scorer: &'a S) -> Self {
        Self {
            generator,
            scorer,
            table: None,
            control: None,
            nodes: 0,
            unreported_nodes: 0,
        }
    }

    pub fn with_table(mut self, table: Option<&'a TranspositionTable>) -> Self {
        self.table = table;
        self
    }

    /// Without a control the search cannot be cancelled.
    pub fn with_control(mut self, control: Option<&'a SearchControl>) -> Self {
        self.control = control;
        self
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `position` to `depth` plies inside the `(alpha, beta)` window.
    ///
    /// Returns `Ok(None)` when cancelled. A fail-low result is an upper bound
    /// and a fail-high result a lower bound on the true minimax value.
    pub fn alpha_beta(
        &mut self,
        position: &Position,
        depth: u8,
        ply: u8,
        alpha: i32,
        beta: i32,
    ) -> MoveGenResult<Option<i32>> {
        // A task picked up after the stop should not spend a poll interval first.
        if self.control.is_some_and(SearchControl::should_stop) {
            return Ok(None);
        }
        let result = self.search_node(position, depth, ply, alpha, beta);
        self.flush_nodes();
        result
    }

    fn search_node(
        &mut self,
        position: &Position,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> MoveGenResult<Option<i32>> {
        if self.tick() {
            return Ok(None);
        }

        if depth == 0 {
            return self.leaf_score(position, ply).map(Some);
        }

        let key = self.table.map(|_| fingerprint(position));
        if let (Some(table), Some(key)) = (self.table, key) {
            let bounds = table.lookup(key, depth);
            let lower = score_from_table(bounds.lower, ply);
            let upper = score_from_table(bounds.upper, ply);
            if lower >= beta {
                return Ok(Some(lower));
            }
            if upper <= alpha {
                return Ok(Some(upper));
            }
            alpha = alpha.max(lower);
            beta = beta.min(upper);
        }

        let moves = self.generator.generate_legal_moves(position)?;
        if moves.is_empty() {
            let in_check = self.generator.is_in_check(position);
            return Ok(Some(terminal_score(position.side_to_move(), in_check, ply)));
        }

        let maximizing = position.side_to_move() == Color::Light;
        let (mut a, mut b) = (alpha, beta);
        let mut best = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };

        for child in &moves {
            let Some(score) = self.search_node(&child.position_after_move, depth - 1, ply.saturating_add(1), a, b)?
            else {
                return Ok(None);
            };

            if maximizing {
                best = best.max(score);
                a = a.max(best);
            } else {
                best = best.min(score);
                b = b.min(best);
            }
            if a >= b {
                break;
            }
        }

        if let (Some(table), Some(key)) = (self.table, key) {
            let stored = score_to_table(best, ply);
            if best <= alpha {
                table.record_upper(key, depth, stored);
            } else if best >= beta {
                table.record_lower(key, depth, stored);
            } else {
                table.record_lower(key, depth, stored);
                table.record_upper(key, depth, stored);
            }
        }

        Ok(Some(best))
    }

    /// Static evaluation, except that a side in check with no way out is
    /// scored as mated.
    fn leaf_score(&mut self, position: &Position, ply: u8) -> MoveGenResult<i32> {
        if self.generator.is_in_check(position) && self.generator.generate_legal_moves(position)?.is_empty() {
            return Ok(terminal_score(position.side_to_move(), true, ply));
        }
        Ok(self.scorer.score(position))
    }

    /// Count a node; true when the search should unwind.
    #[inline]
    fn tick(&mut self) -> bool {
        self.nodes += 1;
        self.unreported_nodes += 1;
        if self.nodes & (CANCEL_CHECK_INTERVAL - 1) != 0 {
            return false;
        }
        self.flush_nodes();
        self.control.is_some_and(SearchControl::should_stop)
    }

    fn flush_nodes(&mut self) {
        if let Some(control) = self.control {
            control.add_nodes(self.unreported_nodes);
        }
        self.unreported_nodes = 0;
    }
}

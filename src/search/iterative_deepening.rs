//! Iterative deepening driver with root-parallel alpha-beta.
//!
//! Each depth scores every root move on the worker pool, each worker running
//! a full-window sequential search from its child position. A depth only
//! counts once every root move has finished; if the budget runs out midway
//! the whole depth is discarded and the previous depth's answer stands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::Move;
use crate::search::alpha_beta::{is_mate_score, SearchContext};
use crate::search::board_scoring::BoardScorer;
use crate::search::threading::{SearchControl, ThreadingConfig, WorkerPool};
use crate::search::transposition_table::{TTStats, TranspositionTable, SCORE_INFINITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration ever started.
    pub max_depth: u8,
    /// Fixed depth used when the time budget is zero.
    pub default_depth: u8,
    pub threads: usize,
    pub use_transposition_table: bool,
    /// Pick uniformly among equally scored root moves instead of the first.
    pub randomize_ties: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            default_depth: 4,
            threads: ThreadingConfig::default().requested_threads,
            use_transposition_table: true,
            randomize_ties: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Centipawns from Light's point of view.
    pub score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Table probes, hits and stores over the whole search.
    pub table_stats: TTStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// The side to move has no legal move; `checkmate` is false on stalemate.
    NoMove { checkmate: bool },
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<Move> {
        match self {
            SearchOutcome::Found(result) => Some(result.best_move),
            SearchOutcome::NoMove { .. } => None,
        }
    }
}

pub struct SearchEngine<G, S> {
    generator: G,
    scorer: S,
    config: SearchConfig,
    table: TranspositionTable,
    stop: Arc<AtomicBool>,
}

impl<G: MoveGenerator, S: BoardScorer> SearchEngine<G, S> {
    pub fn new(generator: G, scorer: S, config: SearchConfig) -> Self {
        Self {
            generator,
            scorer,
            config,
            table: TranspositionTable::default(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Flag another thread can set to end the running search early.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Best move for the side to move within `budget`.
    ///
    /// A zero budget searches to `default_depth` with no deadline. The first
    /// iteration always completes so a position with legal moves always
    /// yields one.
    pub fn best_move(&self, position: &Position, budget: Duration) -> MoveGenResult<SearchOutcome> {
        self.stop.store(false, Ordering::Relaxed);
        self.table.clear();

        let root_moves = self.generator.generate_legal_moves(position)?;
        if root_moves.is_empty() {
            return Ok(SearchOutcome::NoMove {
                checkmate: self.generator.is_in_check(position),
            });
        }

        let (deadline, depth_limit) = if budget.is_zero() {
            (None, self.config.default_depth.min(self.config.max_depth))
        } else {
            (Some(budget), self.config.max_depth)
        };
        let control = SearchControl::new(Arc::clone(&self.stop), deadline);
        let pool = WorkerPool::new(self.config.threads);
        let maximizing = position.side_to_move() == Color::Light;

        let mut completed: Option<(Move, i32, u8)> = None;
        for depth in 1..=depth_limit.max(1) {
            if depth > 1 && control.should_stop() {
                break;
            }

            // The first depth ignores the deadline.
            let cancel = (depth > 1).then_some(&control);
            let Some(scores) = self.score_root_moves(&root_moves, depth, &pool, &control, cancel)? else {
                debug!("depth {depth} cancelled after {} nodes; keeping previous result", control.nodes());
                break;
            };

            let (best_move, score) = self.pick_best(&root_moves, &scores, maximizing);
            let table_stats = self.table.stats();
            debug!(
                "depth {depth} best {best_move} score {score} nodes {} elapsed {:?} tt probes {} hits {} stores {}",
                control.nodes(),
                control.elapsed(),
                table_stats.probes,
                table_stats.hits,
                table_stats.stores
            );
            completed = Some((best_move, score, depth));

            if is_mate_score(score) {
                break;
            }
        }

        let Some((best_move, score, reached_depth)) = completed else {
            return Ok(SearchOutcome::NoMove {
                checkmate: self.generator.is_in_check(position),
            });
        };

        Ok(SearchOutcome::Found(SearchResult {
            best_move,
            score,
            reached_depth,
            nodes: control.nodes(),
            elapsed: control.elapsed(),
            table_stats: self.table.stats(),
        }))
    }

    /// Score of every root move at `depth`, or `None` if any was cancelled.
    fn score_root_moves(
        &self,
        root_moves: &[GeneratedMove],
        depth: u8,
        pool: &WorkerPool,
        accounting: &SearchControl,
        cancel: Option<&SearchControl>,
    ) -> MoveGenResult<Option<Vec<i32>>> {
        let table = self.config.use_transposition_table.then_some(&self.table);

        let results = pool.run(root_moves.to_vec(), |child: GeneratedMove| {
            let mut context = SearchContext::new(&self.generator, &self.scorer)
                .with_table(table)
                .with_control(cancel);
            let score = context.alpha_beta(&child.position_after_move, depth - 1, 1, -SCORE_INFINITY, SCORE_INFINITY);
            if cancel.is_none() {
                accounting.add_nodes(context.nodes());
            }
            score
        });

        let mut scores = Vec::with_capacity(results.len());
        for result in results {
            match result? {
                Some(score) => scores.push(score),
                None => return Ok(None),
            }
        }
        Ok(Some(scores))
    }

    fn pick_best(&self, root_moves: &[GeneratedMove], scores: &[i32], maximizing: bool) -> (Move, i32) {
        let best_score = if maximizing {
            scores.iter().copied().max()
        } else {
            scores.iter().copied().min()
        }
        .unwrap_or(0);

        let tied: Vec<Move> = root_moves
            .iter()
            .zip(scores)
            .filter(|(_, score)| **score == best_score)
            .map(|(child, _)| child.mv)
            .collect();

        let index = if self.config.randomize_ties && tied.len() > 1 {
            rand::rng().random_range(0..tied.len())
        } else {
            0
        };
        let best_move = tied.get(index).copied().unwrap_or(root_moves[0].mv);
        (best_move, best_score)
    }
}

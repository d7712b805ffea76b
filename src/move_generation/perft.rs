//! Perft: count the leaf positions reachable in exactly `depth` plies.

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::{Move, MoveKind};
use crate::search::threading::WorkerPool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count; the last ply is counted without being applied further.
pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> MoveGenResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generator.generate_legal_moves(position)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for child in &moves {
        nodes += perft(generator, &child.position_after_move, depth - 1)?;
    }
    Ok(nodes)
}

/// Leaf count per root move.
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> MoveGenResult<Vec<(Move, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    generator
        .generate_legal_moves(position)?
        .iter()
        .map(|child| Ok((child.mv, perft(generator, &child.position_after_move, depth - 1)?)))
        .collect()
}

/// Leaf count with root moves spread across `pool`.
pub fn perft_parallel<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
    pool: &WorkerPool,
) -> MoveGenResult<u64> {
    if depth <= 1 {
        return perft(generator, position, depth);
    }

    let root_moves = generator.generate_legal_moves(position)?;
    let results = pool.run(root_moves, |child: GeneratedMove| {
        perft(generator, &child.position_after_move, depth - 1)
    });

    results.into_iter().sum()
}

/// Leaf count plus per-leaf move statistics.
pub fn perft_detailed<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for child in generator.generate_legal_moves(position)? {
        total.merge(root_child_counts(generator, position, &child, depth)?);
    }
    Ok(total)
}

/// Detailed counts with root moves spread across `pool`.
pub fn perft_detailed_parallel<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
    pool: &WorkerPool,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return perft_detailed(generator, position, depth);
    }

    let root_moves = generator.generate_legal_moves(position)?;
    let results = pool.run(root_moves, |child: GeneratedMove| {
        root_child_counts(generator, position, &child, depth)
    });

    results.into_iter().try_fold(PerftCounts::default(), |mut total, counts| {
        total.merge(counts?);
        Ok(total)
    })
}

fn root_child_counts<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    child: &GeneratedMove,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    perft_recurse(generator, position, child, depth, 1, &mut counts)?;
    Ok(counts)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    parent: &Position,
    child: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth < search_depth {
        for grandchild in generator.generate_legal_moves(&child.position_after_move)? {
            perft_recurse(
                generator,
                &child.position_after_move,
                &grandchild,
                search_depth,
                current_depth + 1,
                counts,
            )?;
        }
        return Ok(());
    }

    counts.nodes += 1;

    let enemy: Color = parent.side_to_move().opposite();
    let enemy_before = parent.color_occupancy(enemy).count_ones();
    let enemy_after = child.position_after_move.color_occupancy(enemy).count_ones();
    if enemy_after < enemy_before {
        counts.captures += 1;
    }

    match child.mv.kind() {
        MoveKind::EnPassant => counts.en_passant += 1,
        MoveKind::Castle => counts.castles += 1,
        MoveKind::Promotion => counts.promotions += 1,
        MoveKind::Normal | MoveKind::DoublePawnPush => {}
    }

    if generator.is_in_check(&child.position_after_move) {
        counts.checks += 1;
        if generator.generate_legal_moves(&child.position_after_move)?.is_empty() {
            counts.checkmates += 1;
        }
    }

    Ok(())
}

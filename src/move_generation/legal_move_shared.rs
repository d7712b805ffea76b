//! Helpers shared by the per-piece pseudo-legal generators.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;

/// Push a normal move from `from` to every square in `targets`.
#[inline]
pub fn push_normal_moves(from: Square, mut targets: Bitboard, out: &mut Vec<Move>) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(Move::normal(from, to));
        targets &= targets - 1;
    }
}

/// For every piece in `pieces`, push moves to the squares `attacks(from)`
/// returns, minus the mover's own pieces.
#[inline]
pub fn push_piece_moves<F>(position: &Position, mut pieces: Bitboard, attacks: F, out: &mut Vec<Move>)
where
    F: Fn(Square) -> Bitboard,
{
    let own_occ = position.color_occupancy(position.side_to_move());
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        push_normal_moves(from, attacks(from) & !own_occ, out);
        pieces &= pieces - 1;
    }
}

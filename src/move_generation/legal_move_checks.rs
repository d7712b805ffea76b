//! Attack queries against a position.
//!
//! These are always asked of the position *after* a candidate move, so
//! discovered checks and interpositions are seen correctly.

use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

#[inline]
pub fn is_king_in_check(tables: &AttackTables, position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(tables, position, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`. Sliders use the
/// full board occupancy as blockers.
pub fn is_square_attacked(tables: &AttackTables, position: &Position, square: Square, attacker_color: Color) -> bool {
    attackers_to_square(tables, position, square, attacker_color) != 0
}

/// Bitboard of `attacker_color` pieces attacking `square`.
pub fn attackers_to_square(tables: &AttackTables, position: &Position, square: Square, attacker_color: Color) -> Bitboard {
    let occupancy = position.occupancy();
    let pawns = position.pieces_of(attacker_color, PieceKind::Pawn);
    let knights = position.pieces_of(attacker_color, PieceKind::Knight);
    let kings = position.pieces_of(attacker_color, PieceKind::King);
    let queens = position.pieces_of(attacker_color, PieceKind::Queen);
    let bishops_queens = position.pieces_of(attacker_color, PieceKind::Bishop) | queens;
    let rooks_queens = position.pieces_of(attacker_color, PieceKind::Rook) | queens;

    // A pawn of `attacker_color` hits `square` exactly when a pawn of the
    // other color on `square` would hit it.
    (tables.pawn_attacks(attacker_color.opposite(), square) & pawns)
        | (tables.knight_attacks(square) & knights)
        | (tables.king_attacks(square) & kings)
        | (tables.bishop_attacks(square, occupancy) & bishops_queens)
        | (tables.rook_attacks(square, occupancy) & rooks_queens)
}

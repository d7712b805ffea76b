use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::offset_tables::table_from_offsets;

pub const LIGHT_PAWN_ATTACKS: [Bitboard; 64] = table_from_offsets(&[(-1, 1), (1, 1)]);
pub const DARK_PAWN_ATTACKS: [Bitboard; 64] = table_from_offsets(&[(-1, -1), (1, -1)]);

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

/// Single-step push direction for `color` in square-index units.
#[inline]
pub const fn pawn_push_offset(color: Color) -> i8 {
    match color {
        Color::Light => 8,
        Color::Dark => -8,
    }
}

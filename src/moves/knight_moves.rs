use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::offset_tables::table_from_offsets;

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [Bitboard; 64] = table_from_offsets(&KNIGHT_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::offset_tables::table_from_offsets;

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const KING_ATTACKS: [Bitboard; 64] = table_from_offsets(&KING_OFFSETS);

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

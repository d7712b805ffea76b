//! Compile-time attack tables built from `(file, rank)` offset lists.
//!
//! Each origin square gets the union of its offsets that stay on the board,
//! so edge clipping happens once here instead of at lookup time.

use crate::game_state::chess_types::Bitboard;

pub const fn table_from_offsets(offsets: &[(i32, i32)]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let (file_step, rank_step) = offsets[i];
            attacks |= set_if_valid(file + file_step, rank + rank_step);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

pub const fn set_if_valid(file: i32, rank: i32) -> Bitboard {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

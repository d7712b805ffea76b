//! Bishop geometry: relevant blocker masks and reference ray casting.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::rook_moves::{trace_inner_ray, trace_ray};

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const BISHOP_RELEVANT_MASKS: [Bitboard; 64] = generate_relevant_masks();

#[inline]
pub const fn bishop_relevant_mask(square: Square) -> Bitboard {
    BISHOP_RELEVANT_MASKS[square as usize]
}

pub fn bishop_attacks_slow(square: Square, occupancy: Bitboard) -> Bitboard {
    let sq = square as i32;
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(sq, df, dr, occupancy))
}

const fn generate_relevant_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut mask = 0u64;
        let mut d = 0usize;
        while d < BISHOP_DIRECTIONS.len() {
            let (df, dr) = BISHOP_DIRECTIONS[d];
            mask |= trace_inner_ray(sq as i32, df, dr);
            d += 1;
        }
        table[sq] = mask;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks_slow, bishop_relevant_mask};

    #[test]
    fn bishop_relevant_bits_match_known_counts() {
        assert_eq!(bishop_relevant_mask(0).count_ones(), 6); // a1
        assert_eq!(bishop_relevant_mask(27).count_ones(), 9); // d4
        assert_eq!(bishop_relevant_mask(28).count_ones(), 9); // e4
    }

    #[test]
    fn bishop_blocker_is_included() {
        let c1 = 2u8;
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks_slow(c1, blocker_on_e3);

        assert_ne!(attacks & blocker_on_e3, 0);
        assert_eq!(attacks & (1u64 << 29), 0); // f4 hidden
        assert_ne!(attacks & (1u64 << 16), 0); // a3
    }
}

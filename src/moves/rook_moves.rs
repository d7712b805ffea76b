//! Rook geometry: relevant blocker masks and reference ray casting.
//!
//! The ray caster is the ground truth the magic tables are built from and
//! verified against; hot paths use the magic lookup instead.

use crate::game_state::chess_types::{Bitboard, Square};

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Squares whose occupancy can change a rook's attacks from each origin
/// (rank and file rays without their final edge square).
pub const ROOK_RELEVANT_MASKS: [Bitboard; 64] = generate_relevant_masks();

#[inline]
pub const fn rook_relevant_mask(square: Square) -> Bitboard {
    ROOK_RELEVANT_MASKS[square as usize]
}

/// Rook attacks from `square`, each ray stopping at and including the first
/// occupied square.
pub fn rook_attacks_slow(square: Square, occupancy: Bitboard) -> Bitboard {
    let sq = square as i32;
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(sq, df, dr, occupancy))
}

const fn generate_relevant_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut mask = 0u64;
        let mut d = 0usize;
        while d < ROOK_DIRECTIONS.len() {
            let (df, dr) = ROOK_DIRECTIONS[d];
            mask |= trace_inner_ray(sq as i32, df, dr);
            d += 1;
        }
        table[sq] = mask;
        sq += 1;
    }

    table
}

pub(crate) fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: Bitboard) -> Bitboard {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

/// Ray from `square` that stops before the last on-board square.
pub(crate) const fn trace_inner_ray(square: i32, file_step: i32, rank_step: i32) -> Bitboard {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut mask = 0u64;

    while on_board(file + file_step, rank + rank_step) {
        mask |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }

    mask
}

const fn on_board(file: i32, rank: i32) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

#[cfg(test)]
mod tests {
    use super::{rook_attacks_slow, rook_relevant_mask};

    #[test]
    fn rook_relevant_bits_match_known_counts() {
        assert_eq!(rook_relevant_mask(0).count_ones(), 12); // a1
        assert_eq!(rook_relevant_mask(27).count_ones(), 10); // d4
        assert_eq!(rook_relevant_mask(1).count_ones(), 11); // b1
    }

    #[test]
    fn rook_relevant_mask_excludes_edges() {
        let a1 = rook_relevant_mask(0);
        assert_eq!(a1 & (1u64 << 7), 0); // h1
        assert_eq!(a1 & (1u64 << 56), 0); // a8
        assert_ne!(a1 & (1u64 << 6), 0); // g1
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks_slow(a1, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_eq!(attacks.count_ones(), 7 + 3);
    }

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        assert_eq!(rook_attacks_slow(27, 0).count_ones(), 14);
    }
}

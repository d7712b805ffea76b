//! Randomized search for magic multipliers.
//!
//! Only the offline `magic_gen` tool runs this; the engine itself loads
//! precomputed constants. Candidates are sparse random words (the AND of
//! three draws) and must spread the relevant mask into the top byte before
//! the full collision test is attempted.

use rand::Rng;

use crate::attacks::magic_table::{blocker_subsets, Slider};
use crate::chess_errors::AttackTableError;
use crate::game_state::chess_types::{Bitboard, Square};

/// Attempt cap per square before the search reports failure.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000_000;

/// Minimum set bits in the top byte of `mask * magic` for a candidate to be
/// worth testing.
const MIN_TOP_BYTE_BITS: u32 = 6;

#[inline]
fn sparse_random<R: Rng>(rng: &mut R) -> u64 {
    rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>()
}

/// Find a collision-free magic for one square.
pub fn find_magic<R: Rng>(
    slider: Slider,
    square: Square,
    rng: &mut R,
    max_attempts: u64,
) -> Result<u64, AttackTableError> {
    let mask = slider.relevant_mask(square);
    let bits = mask.count_ones();
    let shift = 64 - bits;

    let cases: Vec<(Bitboard, Bitboard)> = blocker_subsets(mask)
        .map(|blockers| (blockers, slider.attacks_slow(square, blockers)))
        .collect();
    let mut used = vec![0u64; 1usize << bits];

    for _ in 0..max_attempts {
        let magic = sparse_random(rng);
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < MIN_TOP_BYTE_BITS {
            continue;
        }

        used.fill(0);
        let collision_free = cases.iter().all(|&(blockers, attacks)| {
            let slot = &mut used[(blockers.wrapping_mul(magic) >> shift) as usize];
            if *slot == 0 {
                *slot = attacks;
                true
            } else {
                *slot == attacks
            }
        });

        if collision_free {
            return Ok(magic);
        }
    }

    Err(AttackTableError::SearchExhausted {
        slider,
        square,
        attempts: max_attempts,
    })
}

/// Find magics for all 64 squares, failing on the first exhausted square.
pub fn find_all_magics<R: Rng>(
    slider: Slider,
    rng: &mut R,
    max_attempts: u64,
) -> Result<[u64; 64], AttackTableError> {
    let mut magics = [0u64; 64];
    for (square, magic) in magics.iter_mut().enumerate() {
        *magic = find_magic(slider, square as Square, rng, max_attempts)?;
        log::debug!("{slider} magic for square {square}: {magic:#018x}");
    }
    Ok(magics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::magic_numbers::BISHOP_MAGICS;
    use crate::attacks::magic_table::MagicTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn found_magic_builds_a_sound_entry() {
        let mut rng = StdRng::seed_from_u64(7);
        let d4 = 27u8;
        let magic = find_magic(Slider::Bishop, d4, &mut rng, DEFAULT_MAX_ATTEMPTS).expect("bishop d4 magic");

        let mut magics = BISHOP_MAGICS;
        magics[d4 as usize] = magic;
        let table = MagicTable::build(Slider::Bishop, &magics).expect("table should build");
        assert!(table.verify().is_ok());
    }

    #[test]
    fn rook_corner_magic_is_found() {
        let mut rng = StdRng::seed_from_u64(11);
        assert!(find_magic(Slider::Rook, 0, &mut rng, DEFAULT_MAX_ATTEMPTS).is_ok());
    }

    #[test]
    fn zero_attempts_is_a_hard_failure() {
        let mut rng = StdRng::seed_from_u64(1);
        match find_magic(Slider::Rook, 35, &mut rng, 0) {
            Err(AttackTableError::SearchExhausted { square, attempts, .. }) => {
                assert_eq!(square, 35);
                assert_eq!(attempts, 0);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }
}

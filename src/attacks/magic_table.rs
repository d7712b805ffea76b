//! Magic-indexed sliding attack tables.
//!
//! For each square the relevant blocker bits are multiplied by a magic
//! constant and shifted down to `popcount(mask)` bits; the result indexes a
//! flat attack array at that square's offset. Building a table enumerates
//! every blocker subset and ray-casts its true attack set, so a magic that
//! sends two subsets with different attacks to one slot is rejected.

use std::fmt;

use crate::chess_errors::AttackTableError;
use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bishop_moves::{bishop_attacks_slow, bishop_relevant_mask};
use crate::moves::rook_moves::{rook_attacks_slow, rook_relevant_mask};

/// Sliding piece family a magic table serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    #[inline]
    pub fn relevant_mask(self, square: Square) -> Bitboard {
        match self {
            Slider::Rook => rook_relevant_mask(square),
            Slider::Bishop => bishop_relevant_mask(square),
        }
    }

    /// Reference attack set by ray casting.
    #[inline]
    pub fn attacks_slow(self, square: Square, occupancy: Bitboard) -> Bitboard {
        match self {
            Slider::Rook => rook_attacks_slow(square, occupancy),
            Slider::Bishop => bishop_attacks_slow(square, occupancy),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Slider::Rook => "rook",
            Slider::Bishop => "bishop",
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Iterate every subset of `mask`, starting with the empty set.
pub fn blocker_subsets(mask: Bitboard) -> impl Iterator<Item = Bitboard> {
    let mut next = Some(0u64);
    std::iter::from_fn(move || {
        let current = next?;
        let following = current.wrapping_sub(mask) & mask;
        next = if following == 0 { None } else { Some(following) };
        Some(current)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicEntry {
    pub mask: Bitboard,
    pub magic: u64,
    pub shift: u32,
    pub offset: usize,
}

impl MagicEntry {
    #[inline]
    pub const fn index(&self, occupancy: Bitboard) -> usize {
        ((occupancy & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }

    #[inline]
    pub const fn len(&self) -> usize {
        1usize << (64 - self.shift)
    }
}

/// One persisted attack record: `square;key;attacks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRecord {
    pub square: Square,
    pub key: u64,
    pub attacks: Bitboard,
}

#[derive(Debug, Clone)]
pub struct MagicTable {
    slider: Slider,
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    /// Build the table for `slider` from per-square magics, ray-casting
    /// every blocker subset.
    pub fn build(slider: Slider, magics: &[u64; 64]) -> Result<Self, AttackTableError> {
        let entries = layout_entries(slider, magics);
        let total = entries[63].offset + entries[63].len();
        let mut attacks = vec![0u64; total];

        for (square, entry) in entries.iter().enumerate() {
            let square = square as Square;
            for blockers in blocker_subsets(entry.mask) {
                let reach = slider.attacks_slow(square, blockers);
                let slot = &mut attacks[entry.offset + entry.index(blockers)];
                // Every slider attack set is non-empty, so zero marks a free slot.
                if *slot == 0 {
                    *slot = reach;
                } else if *slot != reach {
                    return Err(AttackTableError::Collision {
                        slider,
                        square,
                        magic: entry.magic,
                    });
                }
            }
        }

        Ok(Self {
            slider,
            entries,
            attacks,
        })
    }

    /// Rebuild a table from persisted records without ray casting.
    ///
    /// Records must fit inside each square's index range and agree with each
    /// other, and every reachable index must be covered.
    pub fn from_records(
        slider: Slider,
        magics: &[u64; 64],
        records: &[AttackRecord],
    ) -> Result<Self, AttackTableError> {
        let entries = layout_entries(slider, magics);
        let total = entries[63].offset + entries[63].len();
        let mut attacks = vec![0u64; total];

        for record in records {
            let Some(entry) = entries.get(record.square as usize) else {
                return Err(AttackTableError::InvalidRecord {
                    slider,
                    square: u64::from(record.square),
                    key: record.key,
                });
            };
            if record.key >= entry.len() as u64 || record.attacks == 0 {
                return Err(AttackTableError::InvalidRecord {
                    slider,
                    square: u64::from(record.square),
                    key: record.key,
                });
            }
            let slot = &mut attacks[entry.offset + record.key as usize];
            if *slot != 0 && *slot != record.attacks {
                return Err(AttackTableError::Collision {
                    slider,
                    square: record.square,
                    magic: entry.magic,
                });
            }
            *slot = record.attacks;
        }

        for (square, entry) in entries.iter().enumerate() {
            for blockers in blocker_subsets(entry.mask) {
                if attacks[entry.offset + entry.index(blockers)] == 0 {
                    return Err(AttackTableError::MissingRecord {
                        slider,
                        square: square as Square,
                        blockers,
                    });
                }
            }
        }

        Ok(Self {
            slider,
            entries,
            attacks,
        })
    }

    /// Attacks from `square` given the full board occupancy.
    #[inline]
    pub fn attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[square as usize];
        self.attacks[entry.offset + entry.index(occupancy)]
    }

    #[inline]
    pub fn slider(&self) -> Slider {
        self.slider
    }

    #[inline]
    pub fn entry(&self, square: Square) -> &MagicEntry {
        &self.entries[square as usize]
    }

    pub fn magics(&self) -> [u64; 64] {
        let mut out = [0u64; 64];
        for (slot, entry) in out.iter_mut().zip(self.entries.iter()) {
            *slot = entry.magic;
        }
        out
    }

    /// Total number of slots across all squares.
    #[inline]
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    /// Occupied slots as persistable records, square by square.
    pub fn records(&self) -> impl Iterator<Item = AttackRecord> + '_ {
        self.entries.iter().enumerate().flat_map(move |(square, entry)| {
            let slots = &self.attacks[entry.offset..entry.offset + entry.len()];
            slots
                .iter()
                .enumerate()
                .filter(|(_, attacks)| **attacks != 0)
                .map(move |(key, &attacks)| AttackRecord {
                    square: square as Square,
                    key: key as u64,
                    attacks,
                })
        })
    }

    /// Compare every blocker subset against ray casting.
    pub fn verify(&self) -> Result<(), AttackTableError> {
        for (square, entry) in self.entries.iter().enumerate() {
            let square = square as Square;
            for blockers in blocker_subsets(entry.mask) {
                if self.attacks(square, blockers) != self.slider.attacks_slow(square, blockers) {
                    return Err(AttackTableError::Unsound {
                        slider: self.slider,
                        square,
                        blockers,
                    });
                }
            }
        }
        Ok(())
    }
}

fn layout_entries(slider: Slider, magics: &[u64; 64]) -> [MagicEntry; 64] {
    let mut entries = [MagicEntry {
        mask: 0,
        magic: 0,
        shift: 64,
        offset: 0,
    }; 64];
    let mut offset = 0usize;

    for (square, entry) in entries.iter_mut().enumerate() {
        let mask = slider.relevant_mask(square as Square);
        *entry = MagicEntry {
            mask,
            magic: magics[square],
            shift: 64 - mask.count_ones(),
            offset,
        };
        offset += entry.len();
    }

    entries
}

//! Engine context holding every precomputed attack table.
//!
//! One `AttackTables` is built at startup and passed by shared reference to
//! move generation, check detection and search. Leaper masks are
//! compile-time constants; the two magic tables are built from embedded
//! constants or loaded from disk.

use std::path::Path;

use crate::attacks::magic_io::load_table;
use crate::attacks::magic_numbers::{BISHOP_MAGICS, ROOK_MAGICS};
use crate::attacks::magic_table::{MagicTable, Slider};
use crate::chess_errors::AttackTableError;
use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;

#[derive(Debug, Clone)]
pub struct AttackTables {
    rook: MagicTable,
    bishop: MagicTable,
}

impl AttackTables {
    /// Build from the embedded magic constants.
    pub fn new() -> Result<Self, AttackTableError> {
        Self::from_magics(&ROOK_MAGICS, &BISHOP_MAGICS)
    }

    pub fn from_magics(rook_magics: &[u64; 64], bishop_magics: &[u64; 64]) -> Result<Self, AttackTableError> {
        let rook = MagicTable::build(Slider::Rook, rook_magics)?;
        let bishop = MagicTable::build(Slider::Bishop, bishop_magics)?;
        log::info!(
            "built magic attack tables: {} rook slots, {} bishop slots",
            rook.len(),
            bishop.len()
        );
        Ok(Self { rook, bishop })
    }

    /// Load the persisted magic and attack files written by `magic_gen`.
    pub fn load(dir: &Path) -> Result<Self, AttackTableError> {
        let rook = load_table(dir, Slider::Rook)?;
        let bishop = load_table(dir, Slider::Bishop)?;
        log::info!("loaded magic attack tables from {}", dir.display());
        Ok(Self { rook, bishop })
    }

    #[inline]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        king_attacks(square)
    }

    #[inline]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        knight_attacks(square)
    }

    #[inline]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        pawn_attacks(color, square)
    }

    /// Rook attacks including the first blocker on each ray.
    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.rook.attacks(square, occupancy)
    }

    /// Bishop attacks including the first blocker on each ray.
    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop.attacks(square, occupancy)
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.rook_attacks(square, occupancy) | self.bishop_attacks(square, occupancy)
    }

    #[inline]
    pub fn sliding_attacks(&self, slider: Slider, square: Square, occupancy: Bitboard) -> Bitboard {
        match slider {
            Slider::Rook => self.rook_attacks(square, occupancy),
            Slider::Bishop => self.bishop_attacks(square, occupancy),
        }
    }

    #[inline]
    pub fn table(&self, slider: Slider) -> &MagicTable {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    /// Exhaustively compare both magic tables with ray casting.
    pub fn verify(&self) -> Result<(), AttackTableError> {
        self.rook.verify()?;
        self.bishop.verify()
    }
}

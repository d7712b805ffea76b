//! Immutable bitboard position.
//!
//! A `Position` is eight occupancy masks (two by color, six by piece kind)
//! and one packed metadata word. Every ply produces a fresh copy through the
//! move transitioner; nothing mutates a position that another thread can see,
//! which is what lets root-parallel search share positions without locks.
//!
//! Metadata word layout:
//!
//! | bits   | field                                  |
//! |--------|----------------------------------------|
//! | 0      | side to move (0 = Light, 1 = Dark)     |
//! | 1..=5  | en-passant file, `0x1F` when none      |
//! | 6..=9  | castling rights (`CASTLE_*` bits)      |
//! | 10..=17| half-move clock, saturating at 255     |
//! | 18..=31| full-move number, saturating at 16383  |

use std::fmt;

use crate::chess_errors::{NotationError, PositionError};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_board;

const SIDE_BIT: u32 = 1;

const EN_PASSANT_SHIFT: u32 = 1;
const EN_PASSANT_MASK: u32 = 0x1F;
const NO_EN_PASSANT: u32 = 0x1F;

const CASTLING_SHIFT: u32 = 6;
const CASTLING_MASK: u32 = 0x0F;

const HALFMOVE_SHIFT: u32 = 10;
const HALFMOVE_MASK: u32 = 0xFF;

const FULLMOVE_SHIFT: u32 = 18;
const FULLMOVE_MASK: u32 = 0x3FFF;

pub const MAX_HALFMOVE_CLOCK: u16 = HALFMOVE_MASK as u16;
pub const MAX_FULLMOVE_NUMBER: u16 = FULLMOVE_MASK as u16;

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Occupancy per color, indexed by [`Color::index`].
    pub colors: [Bitboard; 2],
    /// Occupancy per piece kind regardless of color, indexed by [`PieceKind::index`].
    pub pieces: [Bitboard; 6],
    meta: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// Empty board, Light to move, no rights, clocks at `0` / `1`.
    pub const fn empty() -> Self {
        Self {
            colors: [0; 2],
            pieces: [0; 6],
            meta: (NO_EN_PASSANT << EN_PASSANT_SHIFT) | (1 << FULLMOVE_SHIFT),
        }
    }

    /// Standard starting position.
    pub const fn new_game() -> Self {
        let mut position = Self::empty();
        position.colors = [0x0000_0000_0000_FFFF, 0xFFFF_0000_0000_0000];
        position.pieces = [
            0x00FF_0000_0000_FF00,
            0x4200_0000_0000_0042,
            0x2400_0000_0000_0024,
            0x8100_0000_0000_0081,
            0x0800_0000_0000_0008,
            0x1000_0000_0000_0010,
        ];
        position.meta |= CASTLE_ALL as u32 * (1 << CASTLING_SHIFT);
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, NotationError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Metadata queries ---

    #[inline]
    pub const fn side_to_move(&self) -> Color {
        if self.meta & SIDE_BIT == 0 {
            Color::Light
        } else {
            Color::Dark
        }
    }

    /// File (`0..=7`) of a pawn that just double-pushed, if any.
    #[inline]
    pub const fn en_passant_file(&self) -> Option<u8> {
        let file = (self.meta >> EN_PASSANT_SHIFT) & EN_PASSANT_MASK;
        if file == NO_EN_PASSANT {
            None
        } else {
            Some(file as u8)
        }
    }

    /// Square a capturing pawn would land on, derived from the file flag and
    /// the side to move.
    #[inline]
    pub const fn en_passant_square(&self) -> Option<Square> {
        match self.en_passant_file() {
            None => None,
            Some(file) => Some(match self.side_to_move() {
                Color::Light => make_square(file, 5),
                Color::Dark => make_square(file, 2),
            }),
        }
    }

    #[inline]
    pub const fn castling_rights(&self) -> CastlingRights {
        ((self.meta >> CASTLING_SHIFT) & CASTLING_MASK) as CastlingRights
    }

    #[inline]
    pub const fn halfmove_clock(&self) -> u16 {
        ((self.meta >> HALFMOVE_SHIFT) & HALFMOVE_MASK) as u16
    }

    #[inline]
    pub const fn fullmove_number(&self) -> u16 {
        ((self.meta >> FULLMOVE_SHIFT) & FULLMOVE_MASK) as u16
    }

    #[inline]
    pub const fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
    }

    /// Raw packed metadata word.
    #[inline]
    pub const fn metadata(&self) -> u32 {
        self.meta
    }

    // --- Metadata updates (used while building successor positions) ---

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        match color {
            Color::Light => self.meta &= !SIDE_BIT,
            Color::Dark => self.meta |= SIDE_BIT,
        }
    }

    #[inline]
    pub(crate) fn set_en_passant_file(&mut self, file: Option<u8>) {
        let raw = match file {
            Some(f) => u32::from(f & 7),
            None => NO_EN_PASSANT,
        };
        self.meta = (self.meta & !(EN_PASSANT_MASK << EN_PASSANT_SHIFT)) | (raw << EN_PASSANT_SHIFT);
    }

    #[inline]
    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        let raw = u32::from(rights) & CASTLING_MASK;
        self.meta = (self.meta & !(CASTLING_MASK << CASTLING_SHIFT)) | (raw << CASTLING_SHIFT);
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        let raw = u32::from(clock.min(MAX_HALFMOVE_CLOCK));
        self.meta = (self.meta & !(HALFMOVE_MASK << HALFMOVE_SHIFT)) | (raw << HALFMOVE_SHIFT);
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        let raw = u32::from(number.min(MAX_FULLMOVE_NUMBER));
        self.meta = (self.meta & !(FULLMOVE_MASK << FULLMOVE_SHIFT)) | (raw << FULLMOVE_SHIFT);
    }

    // --- Board queries ---

    #[inline]
    pub const fn occupancy(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline]
    pub const fn color_occupancy(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    pub const fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.colors[color.index()] & self.pieces[kind.index()]
    }

    /// Piece kind standing on `square`, regardless of color.
    #[inline]
    pub fn kind_on(&self, square: Square) -> Option<PieceKind> {
        let bit = square_bit(square);
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()] & bit != 0)
    }

    #[inline]
    pub fn color_on(&self, square: Square) -> Option<Color> {
        let bit = square_bit(square);
        if self.colors[0] & bit != 0 {
            Some(Color::Light)
        } else if self.colors[1] & bit != 0 {
            Some(Color::Dark)
        } else {
            None
        }
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        Some((self.color_on(square)?, self.kind_on(square)?))
    }

    /// King square for `color`; `None` only for hand-built test boards.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    // --- Board edits (used while building successor positions) ---

    #[inline]
    pub(crate) fn put_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        let bit = square_bit(square);
        self.colors[color.index()] |= bit;
        self.pieces[kind.index()] |= bit;
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        let bit = !square_bit(square);
        self.colors[color.index()] &= bit;
        self.pieces[kind.index()] &= bit;
    }

    /// Check the ownership invariants: no square in both color masks, no
    /// square in two piece masks, and piece union equal to color union.
    pub fn validate(&self) -> Result<(), PositionError> {
        let both_colors = self.colors[0] & self.colors[1];
        if both_colors != 0 {
            return Err(PositionError::ColorOverlap(both_colors.trailing_zeros() as Square));
        }

        let mut seen = 0u64;
        for mask in self.pieces {
            let overlap = seen & mask;
            if overlap != 0 {
                return Err(PositionError::PieceOverlap(overlap.trailing_zeros() as Square));
            }
            seen |= mask;
        }

        let mismatch = seen ^ self.occupancy();
        if mismatch != 0 {
            return Err(PositionError::OccupancyMismatch(mismatch));
        }

        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

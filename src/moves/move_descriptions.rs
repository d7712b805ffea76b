//! Packed move encoding.
//!
//! | bits   | field                                              |
//! |--------|----------------------------------------------------|
//! | 0..=5  | destination square                                 |
//! | 6..=11 | origin square                                      |
//! | 12..=13| promotion selector (0 knight, 1 bishop, 2 rook, 3 queen) |
//! | 14..=16| move kind (see [`MoveKind`])                       |
//!
//! The promotion selector is only meaningful for [`MoveKind::Promotion`].
//! Castling is encoded as the king's move between its home square and the
//! g- or c-file square; the rook relocation is implied.

use std::fmt;

use crate::game_state::chess_rules::castle_rule_for;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const TO_SHIFT: u32 = 0;
const FROM_SHIFT: u32 = 6;
const PROMOTION_SHIFT: u32 = 12;
const KIND_SHIFT: u32 = 14;

const SQUARE_MASK: u32 = 0x3F;
const PROMOTION_MASK: u32 = 0x3;
const KIND_MASK: u32 = 0x7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    DoublePawnPush = 2,
    Castle = 3,
    EnPassant = 4,
}

impl MoveKind {
    #[inline]
    const fn from_code(code: u32) -> Self {
        match code {
            1 => MoveKind::Promotion,
            2 => MoveKind::DoublePawnPush,
            3 => MoveKind::Castle,
            4 => MoveKind::EnPassant,
            _ => MoveKind::Normal,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    #[inline]
    const fn pack(from: Square, to: Square, promotion: u32, kind: MoveKind) -> Self {
        Self(
            ((to as u32 & SQUARE_MASK) << TO_SHIFT)
                | ((from as u32 & SQUARE_MASK) << FROM_SHIFT)
                | ((promotion & PROMOTION_MASK) << PROMOTION_SHIFT)
                | ((kind as u32) << KIND_SHIFT),
        )
    }

    /// Quiet move or ordinary capture.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, MoveKind::Normal)
    }

    #[inline]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, MoveKind::DoublePawnPush)
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, MoveKind::EnPassant)
    }

    /// King move of a castle (`e1g1`, `e1c1`, `e8g8`, `e8c8`).
    #[inline]
    pub const fn castle(king_from: Square, king_to: Square) -> Self {
        Self::pack(king_from, king_to, 0, MoveKind::Castle)
    }

    /// Promotion to `piece`; pawns and kings fall back to a queen.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: PieceKind) -> Self {
        let selector = match piece {
            PieceKind::Knight => 0,
            PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            _ => 3,
        };
        Self::pack(from, to, selector, MoveKind::Promotion)
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_code((self.0 >> KIND_SHIFT) & KIND_MASK)
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        if !matches!(self.kind(), MoveKind::Promotion) {
            return None;
        }
        Some(match (self.0 >> PROMOTION_SHIFT) & PROMOTION_MASK {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        })
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Rebuild a move from its packed word; `None` for words with unknown
    /// kinds, stray high bits, or castle kinds off the four castle patterns.
    pub fn from_raw(raw: u32) -> Option<Self> {
        if raw >> (KIND_SHIFT + 3) != 0 || (raw >> KIND_SHIFT) & KIND_MASK > 4 {
            return None;
        }
        let mv = Self(raw);
        if mv.kind() == MoveKind::Castle && castle_rule_for(mv.from(), mv.to()).is_none() {
            return None;
        }
        Some(mv)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?})", self.kind())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(self.from()))?;
        f.write_str(&square_to_algebraic(self.to()))?;
        if let Some(piece) = self.promotion_piece() {
            let c = match piece {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

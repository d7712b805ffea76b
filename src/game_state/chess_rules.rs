//! Canonical chess-rule constants.
//!
//! Starting layout, home squares used by castling, and the combinatorial
//! bound used to size move buffers.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest number of legal moves reachable from any chess position.
///
/// Move buffers are growable; this is only their initial capacity.
pub const MAX_LEGAL_MOVES: usize = 218;

/// Pseudo-legal buffers can exceed the legal maximum (pinned pieces still
/// produce moves before filtering).
pub const PSEUDO_LEGAL_CAPACITY: usize = 256;

pub const LIGHT_KING_HOME: Square = 4; // e1
pub const DARK_KING_HOME: Square = 60; // e8

pub const A1: Square = 0;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const H8: Square = 63;

/// Static description of one castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleRule {
    pub color: Color,
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook that must be empty.
    pub must_be_empty: Bitboard,
    /// Squares the king stands on, passes and lands on.
    pub must_be_safe: [Square; 3],
}

pub const CASTLE_RULES: [CastleRule; 4] = [
    CastleRule {
        color: Color::Light,
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: H1,
        rook_to: 5,
        must_be_empty: (1 << 5) | (1 << 6),
        must_be_safe: [4, 5, 6],
    },
    CastleRule {
        color: Color::Light,
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: A1,
        rook_to: 3,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        must_be_safe: [4, 3, 2],
    },
    CastleRule {
        color: Color::Dark,
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: H8,
        rook_to: 61,
        must_be_empty: (1 << 61) | (1 << 62),
        must_be_safe: [60, 61, 62],
    },
    CastleRule {
        color: Color::Dark,
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: A8,
        rook_to: 59,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        must_be_safe: [60, 59, 58],
    },
];

/// Castling rule whose king move matches `from -> to`, if any.
pub fn castle_rule_for(from: Square, to: Square) -> Option<&'static CastleRule> {
    CASTLE_RULES
        .iter()
        .find(|rule| rule.king_from == from && rule.king_to == to)
}

/// Rights that survive any move touching `square` (king or rook homes).
#[inline]
pub const fn rights_kept_after_touching(square: Square) -> CastlingRights {
    match square {
        A1 => CASTLE_ALL & !CASTLE_LIGHT_QUEENSIDE,
        H1 => CASTLE_ALL & !CASTLE_LIGHT_KINGSIDE,
        LIGHT_KING_HOME => CASTLE_ALL & !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
        A8 => CASTLE_ALL & !CASTLE_DARK_QUEENSIDE,
        H8 => CASTLE_ALL & !CASTLE_DARK_KINGSIDE,
        DARK_KING_HOME => CASTLE_ALL & !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
        _ => CASTLE_ALL,
    }
}

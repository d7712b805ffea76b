//! Square and bitboard conversions for long algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square/bitboard representations reused by FEN and UCI components.

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::{Bitboard, Square};

/// Convert long algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, NotationError> {
    let bytes = square.as_bytes();
    let invalid = || NotationError::Square(square.to_owned());
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert long algebraic notation (for example: "e4") to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(square: &str) -> Result<Bitboard, NotationError> {
    Ok(1u64 << algebraic_to_square(square)?)
}

/// Convert a square index to long algebraic notation; only the low six bits
/// are used.
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let square = square & 63;
    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);

    format!("{file_char}{rank_char}")
}

/// Squares of a bitboard in ascending order, e.g. `["e4", "d5"]` sorted by index.
pub fn bitboard_to_algebraic(bitboard: Bitboard) -> Vec<String> {
    let mut squares = Vec::with_capacity(bitboard.count_ones() as usize);
    let mut bb = bitboard;
    while bb != 0 {
        squares.push(square_to_algebraic(bb.trailing_zeros() as Square));
        bb &= bb - 1;
    }
    squares
}

//! Errors used throughout the chess engine.
//!
//! Each subsystem gets its own enum so callers can match on the failure modes
//! that subsystem can actually produce. Input-shaped errors (`NotationError`,
//! `CorpusError`) are recoverable and meant for end users; `AttackTableError`
//! collisions and exhausted magic searches are fatal for the tables involved.

use std::path::PathBuf;

use thiserror::Error;

use crate::attacks::magic_table::Slider;
use crate::game_state::chess_types::Square;

/// Failure to read position or move notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("FEN is empty")]
    EmptyFen,

    #[error("FEN board must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("FEN rank {rank} describes {files} files instead of 8")]
    FileCount { rank: usize, files: usize },

    #[error("invalid piece character '{0}' in FEN board")]
    PieceChar(char),

    #[error("invalid side-to-move field '{0}'")]
    SideToMove(String),

    #[error("invalid castling character '{0}'")]
    CastlingChar(char),

    #[error("en-passant square {square} is not on the rank implied by the side to move")]
    EnPassantRank { square: String },

    #[error("invalid {field} clock '{value}'")]
    Clock { field: &'static str, value: String },

    #[error("FEN has {0} fields, expected at most 6")]
    TooManyFields(usize),

    #[error("invalid algebraic square '{0}'")]
    Square(String),

    #[error("invalid move string '{0}'")]
    MoveString(String),

    #[error("invalid promotion piece '{0}'")]
    PromotionPiece(char),

    #[error("no piece of the side to move on {0}")]
    EmptyOrigin(String),
}

/// A position whose bitboards violate the ownership invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("square {0} is claimed by both colors")]
    ColorOverlap(Square),

    #[error("square {0} is claimed by more than one piece kind")]
    PieceOverlap(Square),

    #[error("piece masks and color masks disagree on squares {0:#018x}")]
    OccupancyMismatch(u64),
}

/// A move that cannot be applied to the given position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no piece of the side to move on origin square {0}")]
    EmptyOrigin(Square),
}

/// Failure to build, search for or load the attack tables.
#[derive(Debug, Error)]
pub enum AttackTableError {
    #[error("{slider} magic {magic:#018x} on square {square} maps two blocker sets with different attacks to one slot")]
    Collision { slider: Slider, square: Square, magic: u64 },

    #[error("no {slider} magic found for square {square} within {attempts} attempts")]
    SearchExhausted { slider: Slider, square: Square, attempts: u64 },

    #[error("{slider} lookup on square {square} disagrees with ray casting for blockers {blockers:#018x}")]
    Unsound { slider: Slider, square: Square, blockers: u64 },

    #[error("{slider} record for square {square} has key {key} outside the table")]
    InvalidRecord { slider: Slider, square: u64, key: u64 },

    #[error("{slider} table has no record for square {square} blockers {blockers:#018x}")]
    MissingRecord { slider: Slider, square: Square, blockers: u64 },

    #[error("{slider} magic file has no constant for square {square}")]
    MissingMagic { slider: Slider, square: Square },

    #[error("{path}:{line}: malformed record '{content}'")]
    Parse { path: PathBuf, line: usize, content: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read a perft corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("line {line}: {reason}")]
    Line { line: usize, reason: String },

    #[error("line {line}: {source}")]
    Fen {
        line: usize,
        #[source]
        source: NotationError,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

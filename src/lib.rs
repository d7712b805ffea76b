//! Crate root module declarations for the magic-bitboard chess engine.
//!
//! Exposes the position model, attack tables, legal move generation, the
//! parallel alpha-beta search and the notation helpers so binaries, benches
//! and tests can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod offset_tables;
    pub mod pawn_moves;
    pub mod rook_moves;
}

pub mod attacks {
    pub mod attack_tables;
    pub mod magic_io;
    pub mod magic_numbers;
    pub mod magic_search;
    pub mod magic_table;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod threading;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod perft_corpus;
    pub mod render_game_state;
}

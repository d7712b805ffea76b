//! Move application.
//!
//! `apply_move` copies the position and edits the copy; the input is never
//! touched. It trusts the move's kind tag (castle, en passant, promotion)
//! and does not check legality.

use crate::chess_errors::TransitionError;
use crate::game_state::chess_rules::{castle_rule_for, rights_kept_after_touching};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::{Move, MoveKind};

pub fn apply_move(position: &Position, mv: Move) -> Result<Position, TransitionError> {
    let from = mv.from();
    let to = mv.to();
    let moving_color = position.side_to_move();
    let enemy_color = moving_color.opposite();

    let moved_piece = match position.piece_on(from) {
        Some((color, piece)) if color == moving_color => piece,
        _ => return Err(TransitionError::EmptyOrigin(from)),
    };

    let mut next = *position;
    next.remove_piece(moving_color, moved_piece, from);

    let mut is_capture = false;
    if mv.kind() == MoveKind::EnPassant {
        // The captured pawn sits behind the destination, on the mover's side.
        let captured_sq = make_square(file_of(to), rank_of(from));
        next.remove_piece(enemy_color, PieceKind::Pawn, captured_sq);
        is_capture = true;
    } else if let Some(captured) = enemy_piece_on(position, enemy_color, to) {
        next.remove_piece(enemy_color, captured, to);
        is_capture = true;
    }

    let placed_piece = mv.promotion_piece().unwrap_or(moved_piece);
    next.put_piece(moving_color, placed_piece, to);

    if mv.kind() == MoveKind::Castle {
        if let Some(rule) = castle_rule_for(from, to) {
            next.remove_piece(moving_color, PieceKind::Rook, rule.rook_from);
            next.put_piece(moving_color, PieceKind::Rook, rule.rook_to);
        }
    }

    next.set_castling_rights(
        position.castling_rights() & rights_kept_after_touching(from) & rights_kept_after_touching(to),
    );

    next.set_en_passant_file(if mv.kind() == MoveKind::DoublePawnPush {
        Some(file_of(from))
    } else {
        None
    });

    if is_capture || moved_piece == PieceKind::Pawn {
        next.set_halfmove_clock(0);
    } else {
        next.set_halfmove_clock(position.halfmove_clock().saturating_add(1));
    }

    if moving_color == Color::Dark {
        next.set_fullmove_number(position.fullmove_number().saturating_add(1));
    }
    next.set_side_to_move(enemy_color);

    Ok(next)
}

#[inline]
fn enemy_piece_on(position: &Position, enemy: Color, square: Square) -> Option<PieceKind> {
    if position.color_occupancy(enemy) & square_bit(square) == 0 {
        return None;
    }
    position.kind_on(square)
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use crate::chess_errors::TransitionError;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::moves::move_descriptions::Move;

    fn after(fen: &str, mv: Move) -> Position {
        let position = Position::from_fen(fen).expect("FEN should parse");
        apply_move(&position, mv).expect("move should apply")
    }

    #[test]
    fn input_position_is_left_untouched() {
        let position = Position::new_game();
        let copy = position;
        let next = apply_move(&position, Move::double_pawn_push(12, 28)).expect("e2e4 applies");
        assert_eq!(position, copy);
        assert_ne!(next, position);
    }

    #[test]
    fn double_push_sets_en_passant_file() {
        let next = after("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", Move::double_pawn_push(12, 28));
        assert_eq!(next.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn en_passant_removes_pawn_behind_destination() {
        let next = after("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 5", Move::en_passant(36, 43));
        assert_eq!(next.to_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 5");
        assert!(next.validate().is_ok());
    }

    #[test]
    fn dark_en_passant_and_fullmove_increment() {
        let next = after("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 3 7", Move::en_passant(28, 19));
        assert_eq!(next.to_fen(), "4k3/8/8/8/8/3p4/8/4K3 w - - 0 8");
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let next = after("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 2 1", Move::castle(4, 6));
        assert_eq!(next.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 3 1");

        let next = after("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", Move::castle(60, 58));
        assert_eq!(next.to_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2");
    }

    #[test]
    fn capturing_a_rook_on_its_corner_clears_that_right() {
        let next = after("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Move::normal(7, 63));
        assert_eq!(next.castling_rights(), CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(next.halfmove_clock(), 0);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn promotion_with_capture_replaces_the_pawn() {
        let next = after("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Move::promotion(48, 57, PieceKind::Knight));
        assert_eq!(next.to_fen(), "1N2k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn quiet_piece_move_increments_halfmove_clock() {
        let next = after("4k3/8/8/8/8/8/8/4K1N1 w - - 9 20", Move::normal(6, 21));
        assert_eq!(next.halfmove_clock(), 10);
        assert_eq!(next.fullmove_number(), 20);
    }

    #[test]
    fn moving_from_an_empty_square_is_an_error() {
        let position = Position::new_game();
        assert_eq!(
            apply_move(&position, Move::normal(28, 36)),
            Err(TransitionError::EmptyOrigin(28))
        );
        assert_eq!(
            apply_move(&position, Move::normal(52, 44)),
            Err(TransitionError::EmptyOrigin(52))
        );
    }
}

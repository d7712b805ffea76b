//! Long algebraic (UCI) move strings: `e2e4`, `e7e8q`, and the four castle
//! literals `e1g1`, `e1c1`, `e8g8`, `e8c8`.

use crate::chess_errors::NotationError;
use crate::game_state::chess_rules::castle_rule_for;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Decode a move string against `position`, recovering the special-move
/// kind from the board. The result is not checked for legality; see
/// [`find_legal_move`].
pub fn long_algebraic_to_move(long_algebraic: &str, position: &Position) -> Result<Move, NotationError> {
    let invalid = || NotationError::MoveString(long_algebraic.to_owned());
    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;
    let side = position.side_to_move();

    let moved_piece = match position.piece_on(from) {
        Some((color, piece)) if color == side => piece,
        _ => return Err(NotationError::EmptyOrigin(long_algebraic[0..2].to_owned())),
    };

    if let Some(promotion) = long_algebraic.chars().nth(4) {
        if moved_piece != PieceKind::Pawn || rank_of(to) != side.promotion_rank() {
            return Err(invalid());
        }
        return Ok(Move::promotion(from, to, char_to_promotion(promotion)?));
    }

    match moved_piece {
        PieceKind::King => match castle_rule_for(from, to) {
            Some(rule) if rule.color == side => Ok(Move::castle(from, to)),
            _ => Ok(Move::normal(from, to)),
        },
        PieceKind::Pawn => {
            if rank_of(to) == side.promotion_rank() {
                return Err(invalid());
            }
            if from.abs_diff(to) == 16 {
                Ok(Move::double_pawn_push(from, to))
            } else if file_of(from) != file_of(to)
                && position.color_on(to).is_none()
                && position.en_passant_square() == Some(to)
            {
                Ok(Move::en_passant(from, to))
            } else {
                Ok(Move::normal(from, to))
            }
        }
        _ => Ok(Move::normal(from, to)),
    }
}

/// Decode `long_algebraic` and return it only if it is among the legal moves
/// of `position`.
pub fn find_legal_move<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    long_algebraic: &str,
) -> MoveGenResult<Option<GeneratedMove>> {
    let mv = long_algebraic_to_move(long_algebraic, position)?;
    Ok(generator
        .generate_legal_moves(position)?
        .into_iter()
        .find(|generated| generated.mv == mv))
}

fn char_to_promotion(ch: char) -> Result<PieceKind, NotationError> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(NotationError::PromotionPiece(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::attack_tables::AttackTables;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::moves::move_descriptions::MoveKind;

    #[test]
    fn long_algebraic_round_trip_simple_move() {
        let position = Position::from_fen("8/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("e2e4", &position).expect("move should parse");

        assert_eq!(move_to_long_algebraic(mv), "e2e4");
        assert_eq!(mv.kind(), MoveKind::DoublePawnPush);
    }

    #[test]
    fn long_algebraic_round_trip_promotion() {
        let position = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("a7a8q", &position).expect("move should parse");

        assert_eq!(mv.promotion_piece(), Some(PieceKind::Queen));
        assert_eq!(move_to_long_algebraic(mv), "a7a8q");
        assert!(long_algebraic_to_move("a7a8", &position).is_err());
        assert_eq!(
            long_algebraic_to_move("a7a8k", &position),
            Err(NotationError::PromotionPiece('k'))
        );
    }

    #[test]
    fn long_algebraic_detects_castling_and_en_passant() {
        let castle_state = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = long_algebraic_to_move("e1c1", &castle_state).expect("castle should parse");
        assert_eq!(castle.kind(), MoveKind::Castle);

        let en_passant_state = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep = long_algebraic_to_move("e5d6", &en_passant_state).expect("en-passant should parse");
        assert_eq!(ep.kind(), MoveKind::EnPassant);
    }

    #[test]
    fn wrong_side_origin_is_rejected() {
        let position = Position::new_game();
        assert!(matches!(
            long_algebraic_to_move("e7e5", &position),
            Err(NotationError::EmptyOrigin(_))
        ));
        assert!(long_algebraic_to_move("e2", &position).is_err());
    }

    #[test]
    fn find_legal_move_filters_illegal_strings() {
        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        let position = Position::new_game();

        let found = find_legal_move(&generator, &position, "g1f3").expect("generation should succeed");
        assert!(found.is_some());
        let blocked = find_legal_move(&generator, &position, "a1a3").expect("generation should succeed");
        assert!(blocked.is_none());
    }
}

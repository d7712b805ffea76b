//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, applies each candidate,
//! and drops every move that leaves the mover's own king attacked.

use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_rules::{MAX_LEGAL_MOVES, PSEUDO_LEGAL_CAPACITY};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy)]
pub struct LegalMoveGenerator<'t> {
    tables: &'t AttackTables,
}

impl<'t> LegalMoveGenerator<'t> {
    pub fn new(tables: &'t AttackTables) -> Self {
        Self { tables }
    }

    #[inline]
    pub fn tables(&self) -> &'t AttackTables {
        self.tables
    }

    /// Pseudo-legal moves: piece rules only, own-king safety unchecked
    /// (castling path safety is already enforced).
    pub fn generate_pseudo_legal_moves(&self, position: &Position) -> Vec<Move> {
        let mut pseudo = Vec::with_capacity(PSEUDO_LEGAL_CAPACITY);

        generate_pawn_moves(self.tables, position, &mut pseudo);
        generate_knight_moves(self.tables, position, &mut pseudo);
        generate_bishop_moves(self.tables, position, &mut pseudo);
        generate_rook_moves(self.tables, position, &mut pseudo);
        generate_queen_moves(self.tables, position, &mut pseudo);
        generate_king_moves(self.tables, position, &mut pseudo);

        pseudo
    }
}

impl MoveGenerator for LegalMoveGenerator<'_> {
    fn generate_legal_moves(&self, position: &Position) -> MoveGenResult<Vec<GeneratedMove>> {
        let side = position.side_to_move();
        let mut legal = Vec::with_capacity(MAX_LEGAL_MOVES);

        for mv in self.generate_pseudo_legal_moves(position) {
            let next = apply_move(position, mv)?;

            // Illegal if own king is in check after move.
            if is_king_in_check(self.tables, &next, side) {
                continue;
            }

            legal.push(GeneratedMove {
                mv,
                position_after_move: next,
            });
        }

        Ok(legal)
    }

    #[inline]
    fn is_in_check(&self, position: &Position) -> bool {
        is_king_in_check(self.tables, position, position.side_to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::MoveKind;

    const CORPUS_FENS: [&str; 6] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ];

    fn legal(fen: &str) -> Vec<GeneratedMove> {
        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        let position = Position::from_fen(fen).expect("FEN should parse");
        generator.generate_legal_moves(&position).expect("generation should succeed")
    }

    #[test]
    fn start_position_has_twenty_moves() {
        assert_eq!(legal(CORPUS_FENS[0]).len(), 20);
    }

    #[test]
    fn no_generated_move_leaves_own_king_attacked() {
        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        for fen in CORPUS_FENS {
            let root = Position::from_fen(fen).expect("FEN should parse");
            for first in generator.generate_legal_moves(&root).expect("root moves") {
                let mover = root.side_to_move();
                assert!(!is_king_in_check(&tables, &first.position_after_move, mover), "{fen} {}", first.mv);
                assert!(first.position_after_move.validate().is_ok());

                let reply_side = first.position_after_move.side_to_move();
                for reply in generator.generate_legal_moves(&first.position_after_move).expect("replies") {
                    assert!(!is_king_in_check(&tables, &reply.position_after_move, reply_side));
                }
            }
        }
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Knight on e2 is pinned by the rook on e8.
        let moves = legal("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|g| g.mv.from() != 12));
    }

    #[test]
    fn checkmated_side_has_no_moves() {
        let mated = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        assert!(legal(mated).is_empty());

        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        let position = Position::from_fen(mated).expect("FEN should parse");
        assert!(generator.is_in_check(&position));
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_rejected() {
        // Capturing e.p. would clear the rank between the king and the rook.
        let moves = legal("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(moves.iter().all(|g| g.mv.kind() != MoveKind::EnPassant));
    }

    #[test]
    fn kiwipete_has_forty_eight_moves_with_two_castles() {
        let moves = legal(CORPUS_FENS[1]);
        assert_eq!(moves.len(), 48);
        let castles = moves.iter().filter(|g| g.mv.kind() == MoveKind::Castle).count();
        assert_eq!(castles, 2);
        let side = Color::Light;
        assert!(moves
            .iter()
            .all(|g| g.position_after_move.side_to_move() == side.opposite()));
    }
}

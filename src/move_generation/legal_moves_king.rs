use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_rules::CASTLE_RULES;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_king_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let kings = position.pieces_of(position.side_to_move(), PieceKind::King);
    push_piece_moves(position, kings, |from| tables.king_attacks(from), out);
    generate_castling_moves(tables, position, out);
}

/// Castling needs the right bit, king and rook on their home squares, empty
/// squares between them, and no attacked square on the king's path.
fn generate_castling_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let rights = position.castling_rights();
    if rights == 0 {
        return;
    }

    let enemy = side.opposite();
    let occupancy = position.occupancy();
    let kings = position.pieces_of(side, PieceKind::King);
    let rooks = position.pieces_of(side, PieceKind::Rook);

    for rule in CASTLE_RULES.iter().filter(|rule| rule.color == side) {
        if rights & rule.right == 0
            || kings & square_bit(rule.king_from) == 0
            || rooks & square_bit(rule.rook_from) == 0
            || occupancy & rule.must_be_empty != 0
        {
            continue;
        }

        let path_is_safe = rule
            .must_be_safe
            .iter()
            .all(|&square| !is_square_attacked(tables, position, square, enemy));
        if path_is_safe {
            out.push(Move::castle(rule.king_from, rule.king_to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::attacks::attack_tables::AttackTables;
    use crate::game_state::position::Position;
    use crate::moves::move_descriptions::{Move, MoveKind};

    fn castles(fen: &str) -> Vec<Move> {
        let tables = AttackTables::new().expect("attack tables");
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&tables, &position, &mut out);
        out.into_iter().filter(|mv| mv.kind() == MoveKind::Castle).collect()
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&Move::castle(4, 6)));
        assert!(moves.contains(&Move::castle(4, 2)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn no_castling_through_an_attacked_square() {
        // Dark rook on f8 covers f1.
        let moves = castles("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(moves, vec![Move::castle(4, 2)]);
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castles("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_occupied() {
        // b1 attacked by the rook on b8: still legal.
        let moves = castles("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(moves, vec![Move::castle(4, 2)]);
        assert!(castles("7k/8/8/8/8/8/8/RN2K3 w Q - 0 1").is_empty());
    }

    #[test]
    fn rights_without_a_rook_do_nothing() {
        assert!(castles("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1").is_empty());
    }
}

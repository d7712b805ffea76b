use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_rook_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let occupancy = position.occupancy();
    let rooks = position.pieces_of(position.side_to_move(), PieceKind::Rook);
    push_piece_moves(position, rooks, |from| tables.rook_attacks(from, occupancy), out);
}

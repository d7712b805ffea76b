use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::move_descriptions::Move;

/// Queen targets are the union of the rook and bishop lookups.
pub fn generate_queen_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let occupancy = position.occupancy();
    let queens = position.pieces_of(position.side_to_move(), PieceKind::Queen);
    push_piece_moves(position, queens, |from| tables.queen_attacks(from, occupancy), out);
}

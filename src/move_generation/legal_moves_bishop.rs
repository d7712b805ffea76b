use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_bishop_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let occupancy = position.occupancy();
    let bishops = position.pieces_of(position.side_to_move(), PieceKind::Bishop);
    push_piece_moves(position, bishops, |from| tables.bishop_attacks(from, occupancy), out);
}

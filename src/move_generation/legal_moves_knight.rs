use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_knight_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let knights = position.pieces_of(position.side_to_move(), PieceKind::Knight);
    push_piece_moves(position, knights, |from| tables.knight_attacks(from), out);
}

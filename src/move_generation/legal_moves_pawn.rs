use crate::attacks::attack_tables::AttackTables;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_push_offset;

pub fn generate_pawn_moves(tables: &AttackTables, position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let enemy_occ = position.color_occupancy(side.opposite());
    let empty = !position.occupancy();
    let push = pawn_push_offset(side);
    let ep_target = position.en_passant_square();

    let mut pawns = position.pieces_of(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        // Pawns never stand on the last rank, so one step stays on the board.
        let one_step = from.wrapping_add_signed(push);
        if one_step < 64 && empty & square_bit(one_step) != 0 {
            push_pawn_move(side, from, one_step, out);

            if rank_of(from) == side.pawn_start_rank() {
                let two_step = one_step.wrapping_add_signed(push);
                if empty & square_bit(two_step) != 0 {
                    out.push(Move::double_pawn_push(from, two_step));
                }
            }
        }

        let attacks = tables.pawn_attacks(side, from);
        let mut captures = attacks & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            push_pawn_move(side, from, to, out);
            captures &= captures - 1;
        }

        if let Some(target) = ep_target {
            if attacks & square_bit(target) != 0 {
                out.push(Move::en_passant(from, target));
            }
        }

        pawns &= pawns - 1;
    }
}

/// Push a single pawn move, expanding it into four promotions on the last rank.
#[inline]
fn push_pawn_move(side: Color, from: Square, to: Square, out: &mut Vec<Move>) {
    if rank_of(to) == side.promotion_rank() {
        for piece in PieceKind::PROMOTIONS {
            out.push(Move::promotion(from, to, piece));
        }
    } else {
        out.push(Move::normal(from, to));
    }
}

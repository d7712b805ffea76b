//! FEN-to-Position parser.
//!
//! The board field is mandatory. Trailing fields may be omitted and then
//! default to `w KQkq - 0 1`; a bad board field is always an error.

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::*;
use crate::game_state::position::{Position, MAX_FULLMOVE_NUMBER, MAX_HALFMOVE_CLOCK};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Position, NotationError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() {
        return Err(NotationError::EmptyFen);
    }
    if parts.len() > 6 {
        return Err(NotationError::TooManyFields(parts.len()));
    }

    let mut position = Position::empty();
    parse_board(parts[0], &mut position)?;

    let side = parse_side_to_move(parts.get(1).copied().unwrap_or("w"))?;
    position.set_side_to_move(side);
    position.set_castling_rights(parse_castling_rights(parts.get(2).copied().unwrap_or("KQkq"))?);
    position.set_en_passant_file(parse_en_passant(parts.get(3).copied().unwrap_or("-"), side)?);
    position.set_halfmove_clock(parse_clock(parts.get(4).copied().unwrap_or("0"), "halfmove", MAX_HALFMOVE_CLOCK)?);
    position.set_fullmove_number(parse_clock(parts.get(5).copied().unwrap_or("1"), "fullmove", MAX_FULLMOVE_NUMBER)?);

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), NotationError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(NotationError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(NotationError::PieceChar(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch).ok_or(NotationError::PieceChar(ch))?;
            if file < 8 {
                position.put_piece(color, piece, (board_rank * 8 + file) as Square);
            }
            file += 1;
        }

        if file != 8 {
            return Err(NotationError::FileCount {
                rank: fen_rank_idx + 1,
                files: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, NotationError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(NotationError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, NotationError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(NotationError::CastlingChar(ch)),
        }
    }

    Ok(rights)
}

/// Only the file is stored; the rank must be the one implied by `side`.
fn parse_en_passant(en_passant_part: &str, side: Color) -> Result<Option<u8>, NotationError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let expected_rank = match side {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(NotationError::EnPassantRank {
            square: en_passant_part.to_owned(),
        });
    }

    Ok(Some(file_of(square)))
}

fn parse_clock(value: &str, field: &'static str, max: u16) -> Result<u16, NotationError> {
    value
        .parse::<u16>()
        .ok()
        .filter(|clock| *clock <= max)
        .ok_or_else(|| NotationError::Clock {
            field,
            value: value.to_owned(),
        })
}

pub fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::NotationError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{position}");

        assert_eq!(position.side_to_move(), Color::Light);
        assert_eq!(position.fullmove_number(), 1);
        assert_eq!(position.halfmove_clock(), 0);
        assert!(position.validate().is_ok());
    }

    #[test]
    fn board_only_input_gets_default_metadata() {
        let position = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").expect("board-only FEN");
        assert_eq!(position.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn partial_metadata_keeps_given_fields() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 b -").expect("partial FEN");
        assert_eq!(position.side_to_move(), Color::Dark);
        assert_eq!(position.castling_rights(), 0);
        assert_eq!(position.en_passant_file(), None);
        assert_eq!(position.fullmove_number(), 1);
    }

    #[test]
    fn en_passant_square_stores_its_file() {
        let position = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").expect("ep FEN");
        assert_eq!(position.en_passant_file(), Some(3));
        assert_eq!(position.en_passant_square(), Some(43));
    }

    #[test]
    fn rejects_malformed_boards() {
        assert_eq!(parse_fen(""), Err(NotationError::EmptyFen));
        assert_eq!(parse_fen("8/8/8 w - - 0 1"), Err(NotationError::RankCount(3)));
        assert_eq!(
            parse_fen("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(NotationError::PieceChar('9'))
        );
        assert_eq!(
            parse_fen("ppppppppp/8/8/8/8/8/8/8 w - - 0 1"),
            Err(NotationError::FileCount { rank: 1, files: 9 })
        );
        assert_eq!(parse_fen("x7/8/8/8/8/8/8/8"), Err(NotationError::PieceChar('x')));
    }

    #[test]
    fn rejects_inconsistent_metadata() {
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e3 0 1"),
            Err(NotationError::EnPassantRank { .. })
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 300 1"),
            Err(NotationError::Clock { field: "halfmove", .. })
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x"),
            Err(NotationError::SideToMove(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w KX"),
            Err(NotationError::CastlingChar('X'))
        ));
    }
}

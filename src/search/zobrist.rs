//! Zobrist fingerprints for transposition-table keys.
//!
//! Keys are drawn from a `StdRng` seeded with a fixed constant, so
//! fingerprints are stable across runs and platforms. Move clocks are not
//! part of a fingerprint: two positions that differ only in their half-move
//! or full-move counters share a key.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

const DEFAULT_SEED: u64 = 0x6D61_6769_635F_6368;

/// One random key per board feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    piece_square: [[[u64; 64]; 6]; 2],
    dark_to_move: u64,
    /// One key per castling right bit, xored together for a rights mask.
    castling_right: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_square = [[[0u64; 64]; 6]; 2];
        piece_square
            .iter_mut()
            .flatten()
            .flatten()
            .for_each(|key| *key = rng.random());

        let dark_to_move = rng.random();
        let castling_right = std::array::from_fn(|_| rng.random());
        let en_passant_file = std::array::from_fn(|_| rng.random());

        Self {
            piece_square,
            dark_to_move,
            castling_right,
            en_passant_file,
        }
    }

    #[inline]
    pub fn piece_square(&self, color: Color, piece: PieceKind, square: Square) -> u64 {
        self.piece_square[color.index()][piece.index()][square as usize]
    }

    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_right
            .iter()
            .enumerate()
            .filter(|(bit, _)| rights & (1 << bit) != 0)
            .fold(0, |acc, (_, key)| acc ^ key)
    }

    #[inline]
    pub fn en_passant(&self, file: u8) -> u64 {
        self.en_passant_file[(file & 7) as usize]
    }

    pub fn fingerprint(&self, position: &Position) -> u64 {
        let mut key = 0u64;

        for color in [Color::Light, Color::Dark] {
            for piece in PieceKind::ALL {
                let mut bb = position.pieces_of(color, piece);
                while bb != 0 {
                    key ^= self.piece_square(color, piece, bb.trailing_zeros() as Square);
                    bb &= bb - 1;
                }
            }
        }

        if position.side_to_move() == Color::Dark {
            key ^= self.dark_to_move;
        }
        key ^= self.castling(position.castling_rights());
        if let Some(file) = position.en_passant_file() {
            key ^= self.en_passant(file);
        }

        key
    }
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

/// Process-wide keys built from the default seed.
#[inline]
pub fn keys() -> &'static ZobristKeys {
    KEYS.get_or_init(|| ZobristKeys::from_seed(DEFAULT_SEED))
}

/// Fingerprint of piece placement, side to move, castling rights and
/// en-passant file under the default keys.
#[inline]
pub fn fingerprint(position: &Position) -> u64 {
    keys().fingerprint(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::moves::move_descriptions::Move;

    fn fp(fen: &str) -> u64 {
        fingerprint(&Position::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn starting_position_fingerprint_is_deterministic() {
        assert_eq!(fingerprint(&Position::new_game()), fingerprint(&Position::new_game()));
        assert_eq!(
            fingerprint(&Position::new_game()),
            fp("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        );
    }

    #[test]
    fn side_to_move_changes_fingerprint() {
        assert_ne!(fp("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), fp("4k3/8/8/8/8/8/8/4K3 b - - 0 1"));
    }

    #[test]
    fn castling_rights_change_fingerprint() {
        assert_ne!(fp("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), fp("4k3/8/8/8/8/8/8/R3K2R w - - 0 1"));
        assert_ne!(fp("4k3/8/8/8/8/8/8/R3K2R w K - 0 1"), fp("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1"));
    }

    #[test]
    fn en_passant_file_changes_fingerprint() {
        assert_ne!(
            fp("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1"),
            fp("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
        );
    }

    #[test]
    fn castling_key_combines_one_key_per_right() {
        let keys = keys();
        assert_eq!(keys.castling(0), 0);
        assert_eq!(
            keys.castling(CASTLE_ALL),
            keys.castling(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE)
                ^ keys.castling(CASTLE_DARK_KINGSIDE)
                ^ keys.castling(CASTLE_DARK_QUEENSIDE)
        );
    }

    #[test]
    fn seeds_are_reproducible_and_distinct() {
        assert_eq!(ZobristKeys::from_seed(5), ZobristKeys::from_seed(5));
        let position = Position::new_game();
        assert_ne!(
            ZobristKeys::from_seed(5).fingerprint(&position),
            ZobristKeys::from_seed(6).fingerprint(&position)
        );
    }

    #[test]
    fn move_clocks_do_not_change_fingerprint() {
        assert_eq!(fp("4k3/8/8/8/8/8/8/4K2R w K - 0 1"), fp("4k3/8/8/8/8/8/8/4K2R w K - 37 60"));
    }

    #[test]
    fn transpositions_share_a_fingerprint() {
        let start = Position::new_game();
        let via_g1 = [Move::normal(6, 21), Move::normal(62, 45), Move::normal(1, 18), Move::normal(57, 42)];
        let via_b1 = [Move::normal(1, 18), Move::normal(57, 42), Move::normal(6, 21), Move::normal(62, 45)];

        let play = |moves: &[Move]| {
            moves
                .iter()
                .try_fold(start, |position, mv| apply_move(&position, *mv))
                .expect("moves should apply")
        };
        let a = play(&via_g1);
        let b = play(&via_b1);
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&start));
    }
}

//! Perft correctness corpus: one `FEN,count1,count2,...` line per position,
//! where `countN` is the expected number of leaf positions at depth N.

use std::fs;
use std::path::Path;

use log::warn;

use crate::chess_errors::CorpusError;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::move_generation::perft::perft_parallel;
use crate::search::threading::WorkerPool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerftCase {
    /// 1-based line in the corpus file.
    pub line: usize,
    pub fen: String,
    pub position: Position,
    /// Expected node counts, starting at depth 1.
    pub expected: Vec<u64>,
}

impl PerftCase {
    /// Leading depths whose expected counts stay within `max_nodes`.
    pub fn depths_within(&self, max_nodes: u64) -> usize {
        self.expected.iter().take_while(|&&count| count <= max_nodes).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub line: usize,
    pub fen: String,
    /// First depth whose count differed, with the expected and actual counts.
    pub mismatch: Option<(u8, u64, u64)>,
    pub depths_checked: usize,
}

impl CaseReport {
    #[inline]
    pub fn passed(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// Parse corpus text. Blank lines and lines starting with `#` are skipped.
pub fn parse_corpus(text: &str) -> Result<Vec<PerftCase>, CorpusError> {
    let mut cases = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split(',');
        let fen = fields.next().unwrap_or_default().trim();
        let position = Position::from_fen(fen).map_err(|source| CorpusError::Fen { line, source })?;

        let expected = fields
            .map(|field| {
                field.trim().parse::<u64>().map_err(|_| CorpusError::Line {
                    line,
                    reason: format!("invalid node count {:?}", field.trim()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if expected.is_empty() {
            return Err(CorpusError::Line {
                line,
                reason: "no expected node counts".to_string(),
            });
        }

        cases.push(PerftCase {
            line,
            fen: fen.to_string(),
            position,
            expected,
        });
    }

    Ok(cases)
}

pub fn load_corpus(path: &Path) -> Result<Vec<PerftCase>, CorpusError> {
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_corpus(&text)
}

/// Check one case depth by depth, stopping at the first mismatch.
pub fn run_case<G: MoveGenerator + ?Sized>(
    generator: &G,
    case: &PerftCase,
    max_nodes: u64,
    pool: &WorkerPool,
) -> MoveGenResult<CaseReport> {
    let depths = case.depths_within(max_nodes);
    let mut mismatch = None;

    for (index, &expected) in case.expected.iter().take(depths).enumerate() {
        let depth = (index + 1) as u8;
        let actual = perft_parallel(generator, &case.position, depth, pool)?;
        if actual != expected {
            warn!(
                "perft mismatch on line {} ({}) at depth {depth}: expected {expected}, got {actual}",
                case.line, case.fen
            );
            mismatch = Some((depth, expected, actual));
            break;
        }
    }

    Ok(CaseReport {
        line: case.line,
        fen: case.fen.clone(),
        mismatch,
        depths_checked: depths,
    })
}

pub fn run_corpus<G: MoveGenerator + ?Sized>(
    generator: &G,
    cases: &[PerftCase],
    max_nodes: u64,
    pool: &WorkerPool,
) -> MoveGenResult<Vec<CaseReport>> {
    cases.iter().map(|case| run_case(generator, case, max_nodes, pool)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::attack_tables::AttackTables;
    use crate::chess_errors::NotationError;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    const SAMPLE: &str = "\
# start position
rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1,20,400,8902,197281

8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1,14,191,2812
";

    #[test]
    fn parses_cases_and_skips_comments() {
        let cases = parse_corpus(SAMPLE).expect("corpus should parse");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].line, 2);
        assert_eq!(cases[0].expected, vec![20, 400, 8_902, 197_281]);
        assert_eq!(cases[1].line, 4);
        assert_eq!(cases[1].position, Position::from_fen(&cases[1].fen).expect("FEN should parse"));
    }

    #[test]
    fn node_limit_keeps_a_prefix_of_depths() {
        let cases = parse_corpus(SAMPLE).expect("corpus should parse");
        assert_eq!(cases[0].depths_within(10_000), 3);
        assert_eq!(cases[0].depths_within(10), 0);
        assert_eq!(cases[0].depths_within(u64::MAX), 4);
    }

    #[test]
    fn reports_line_numbers_on_bad_input() {
        let err = parse_corpus("8/8/8/8/8/8/8/8 w - - 0 1,12,abc").expect_err("bad count");
        assert!(matches!(err, CorpusError::Line { line: 1, .. }));

        let err = parse_corpus("\nnot-a-fen,1").expect_err("bad FEN");
        assert!(matches!(err, CorpusError::Fen { line: 2, source: NotationError::RankCount(_) }));

        let err = parse_corpus("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect_err("no counts");
        assert!(matches!(err, CorpusError::Line { line: 1, .. }));
    }

    #[test]
    fn runner_flags_wrong_counts() {
        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        let pool = WorkerPool::new(2);
        let cases = parse_corpus(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1,20,400,8902\n\
             rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1,20,401",
        )
        .expect("corpus should parse");

        let reports = run_corpus(&generator, &cases, 1_000_000, &pool).expect("perft should run");
        assert!(reports[0].passed());
        assert_eq!(reports[0].depths_checked, 3);
        assert_eq!(reports[1].mismatch, Some((2, 401, 400)));
    }

    #[test]
    fn bundled_corpus_passes_under_the_node_limit() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/perft_answers.csv");
        let cases = load_corpus(&path).expect("bundled corpus should load");
        assert!(cases.len() >= 6);

        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        let pool = WorkerPool::new(4);
        for report in run_corpus(&generator, &cases, 100_000, &pool).expect("perft should run") {
            assert!(report.passed(), "line {} {}: {:?}", report.line, report.fen, report.mismatch);
        }
    }

    #[test]
    #[ignore = "runs every recorded depth; minutes in release builds"]
    fn bundled_corpus_passes_at_every_depth() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/perft_answers.csv");
        let cases = load_corpus(&path).expect("bundled corpus should load");

        let tables = AttackTables::new().expect("attack tables");
        let generator = LegalMoveGenerator::new(&tables);
        let pool = WorkerPool::new(8);
        for case in &cases {
            let report = run_case(&generator, case, u64::MAX, &pool).expect("perft should run");
            assert_eq!(report.depths_checked, case.expected.len());
            assert!(report.passed(), "line {} {}: {:?}", report.line, report.fen, report.mismatch);
        }
    }
}

//! Command-line front end: search one position and print the best move.
//!
//! Usage:
//! `cargo run --release -- --fen "<fen>" --movetime-ms 2000`
//! `cargo run --release -- --moves e2e4,e7e5 --movetime-ms 0 --depth 5`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use magic_chess::attacks::attack_tables::AttackTables;
use magic_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use magic_chess::game_state::position::Position;
use magic_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use magic_chess::search::board_scoring::PieceSquareScorer;
use magic_chess::search::iterative_deepening::{SearchConfig, SearchEngine, SearchOutcome};
use magic_chess::utils::long_algebraic::{find_legal_move, move_to_long_algebraic};

#[derive(Parser, Debug)]
#[command(author, version, about = "Magic-bitboard chess search", long_about = None)]
struct Args {
    /// Position to search
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    /// UCI moves to play from the position first (comma separated)
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Time budget in milliseconds; zero or less searches to --depth
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    movetime_ms: i64,

    /// Fixed depth used when no time budget is given
    #[arg(long)]
    depth: Option<u8>,

    /// Worker threads for root moves (default: available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Load attack tables written by `magic_gen` instead of the built-in magics
    #[arg(long)]
    magic_dir: Option<PathBuf>,

    /// Search without the transposition table
    #[arg(long)]
    no_tt: bool,

    /// Print the board before searching
    #[arg(long)]
    board: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let tables = match &args.magic_dir {
        Some(dir) => AttackTables::load(dir).with_context(|| format!("loading attack tables from {}", dir.display()))?,
        None => AttackTables::new().context("building attack tables")?,
    };
    let generator = LegalMoveGenerator::new(&tables);

    let mut position = Position::from_fen(&args.fen).with_context(|| format!("parsing FEN {:?}", args.fen))?;
    for text in &args.moves {
        match find_legal_move(&generator, &position, text)? {
            Some(generated) => position = generated.position_after_move,
            None => bail!("illegal move {text} in {}", position.to_fen()),
        }
    }

    if args.board {
        println!("{position}");
    }
    if position.is_fifty_move_draw() {
        log::info!("fifty-move rule: the position can be claimed as a draw");
    }

    let defaults = SearchConfig::default();
    let config = SearchConfig {
        default_depth: args.depth.unwrap_or(defaults.default_depth),
        threads: args.threads.unwrap_or(defaults.threads),
        use_transposition_table: !args.no_tt,
        ..defaults
    };
    let engine = SearchEngine::new(generator, PieceSquareScorer, config);

    let budget = Duration::from_millis(u64::try_from(args.movetime_ms).unwrap_or(0));
    match engine.best_move(&position, budget)? {
        SearchOutcome::Found(result) => {
            log::info!(
                "depth {} nodes {} time {} ms",
                result.reached_depth,
                result.nodes,
                result.elapsed.as_millis()
            );
            log::debug!(
                "tt probes {} hits {} stores {}",
                result.table_stats.probes,
                result.table_stats.hits,
                result.table_stats.stores
            );
            println!(
                "bestmove {} score {} depth {}",
                move_to_long_algebraic(result.best_move),
                result.score,
                result.reached_depth
            );
        }
        SearchOutcome::NoMove { checkmate } => {
            println!("bestmove (none) {}", if checkmate { "checkmate" } else { "stalemate" });
        }
    }

    Ok(())
}

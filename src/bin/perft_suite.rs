//! Perft corpus runner.
//!
//! Usage:
//! `cargo run --release --bin perft_suite`
//! `cargo run --release --bin perft_suite -- --max-nodes 5000000 --threads 8`

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use magic_chess::attacks::attack_tables::AttackTables;
use magic_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use magic_chess::move_generation::perft::perft_detailed_parallel;
use magic_chess::search::threading::{ThreadingConfig, WorkerPool};
use magic_chess::utils::perft_corpus::{load_corpus, run_case};

#[derive(Parser, Debug)]
#[command(author, version, about = "Check move generation against a perft corpus", long_about = None)]
struct Args {
    /// Corpus file with `FEN,count1,count2,...` lines
    #[arg(long, default_value = "resources/perft_answers.csv")]
    corpus: PathBuf,

    /// Skip depths whose expected node count exceeds this
    #[arg(long, default_value_t = 1_000_000)]
    max_nodes: u64,

    /// Worker threads for root moves (default: available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Load attack tables written by `magic_gen` instead of the built-in magics
    #[arg(long)]
    magic_dir: Option<PathBuf>,

    /// Also print capture/castle/check counters at the deepest checked depth
    #[arg(long)]
    detailed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level))
        .init();

    let tables = match &args.magic_dir {
        Some(dir) => AttackTables::load(dir)?,
        None => AttackTables::new()?,
    };
    let generator = LegalMoveGenerator::new(&tables);
    let threading = ThreadingConfig {
        requested_threads: args.threads.unwrap_or(ThreadingConfig::default().requested_threads),
    };
    let pool = WorkerPool::from_config(threading);

    let cases = load_corpus(&args.corpus).with_context(|| format!("reading {}", args.corpus.display()))?;
    let started = Instant::now();
    let mut failed = 0usize;

    for case in &cases {
        let case_started = Instant::now();
        let report = run_case(&generator, case, args.max_nodes, &pool)?;
        match report.mismatch {
            None => println!(
                "ok   line {:>3}  depths 1..={}  {:>6} ms  {}",
                report.line,
                report.depths_checked,
                case_started.elapsed().as_millis(),
                report.fen
            ),
            Some((depth, expected, actual)) => {
                failed += 1;
                println!(
                    "FAIL line {:>3}  depth {depth}: expected {expected}, got {actual}  {}",
                    report.line, report.fen
                );
            }
        }

        if args.detailed && report.passed() && report.depths_checked > 0 {
            let counts = perft_detailed_parallel(&generator, &case.position, report.depths_checked as u8, &pool)?;
            println!(
                "     nodes {} captures {} ep {} castles {} promotions {} checks {} mates {}",
                counts.nodes,
                counts.captures,
                counts.en_passant,
                counts.castles,
                counts.promotions,
                counts.checks,
                counts.checkmates
            );
        }
    }

    let passed = cases.len() - failed;
    println!(
        "{passed}/{} positions passed in {} ms",
        cases.len(),
        started.elapsed().as_millis()
    );
    if failed > 0 {
        bail!("{failed} perft positions failed");
    }
    Ok(())
}

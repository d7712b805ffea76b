//! Offline magic-number generator.
//!
//! Usage:
//! `cargo run --release --bin magic_gen -- --out-dir move_tables`
//! `cargo run --release --bin magic_gen -- --seed 42 --verify`
//!
//! Searches rook and bishop magics, builds both tables and writes
//! `magics_<slider>.txt` plus `<slider>.txt` into the output directory. The
//! engine loads those files with `--magic-dir`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use magic_chess::attacks::attack_tables::AttackTables;
use magic_chess::attacks::magic_io::save_table;
use magic_chess::attacks::magic_search::{find_all_magics, DEFAULT_MAX_ATTEMPTS};
use magic_chess::attacks::magic_table::{MagicTable, Slider};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate magic bitboard tables", long_about = None)]
struct Args {
    /// Directory the table files are written to
    #[arg(long, default_value = "move_tables")]
    out_dir: PathBuf,

    /// RNG seed; omitted means a fresh random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Candidate attempts per square before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u64,

    /// Reload the written files and check every blocker subset
    #[arg(long)]
    verify: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level))
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("searching magics with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    for slider in [Slider::Rook, Slider::Bishop] {
        let started = Instant::now();
        let magics = find_all_magics(slider, &mut rng, args.max_attempts)
            .with_context(|| format!("searching {slider} magics"))?;
        let table = MagicTable::build(slider, &magics)?;
        let (magics_path, attacks_path) = save_table(&args.out_dir, &table)?;
        log::info!(
            "{slider}: {} slots in {:?}, wrote {} and {}",
            table.len(),
            started.elapsed(),
            magics_path.display(),
            attacks_path.display()
        );
    }

    if args.verify {
        let tables = AttackTables::load(&args.out_dir)?;
        tables.verify().context("verifying written tables")?;
        log::info!("verified tables in {}", args.out_dir.display());
    }

    Ok(())
}

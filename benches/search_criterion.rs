use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use magic_chess::attacks::attack_tables::AttackTables;
use magic_chess::game_state::position::Position;
use magic_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use magic_chess::search::board_scoring::PieceSquareScorer;
use magic_chess::search::iterative_deepening::{SearchConfig, SearchEngine};

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    SearchCase {
        name: "classical_mid",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    },
    SearchCase {
        name: "tactical",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    SearchCase {
        name: "end_kpk",
        fen: "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1",
    },
];

fn bench_fixed_depth_search(c: &mut Criterion) {
    let depth = match std::env::var("MAGIC_CHESS_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => 4,
        _ => 3,
    };

    let tables = AttackTables::new().expect("attack tables should build");
    let engine = SearchEngine::new(
        LegalMoveGenerator::new(&tables),
        PieceSquareScorer,
        SearchConfig {
            default_depth: depth,
            ..SearchConfig::default()
        },
    );

    let mut group = c.benchmark_group("search_fixed_depth");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let position = Position::from_fen(case.fen).expect("benchmark FEN should parse");
        group.bench_with_input(BenchmarkId::new(case.name, format!("d{depth}")), &position, |b, position| {
            b.iter(|| {
                let outcome = engine
                    .best_move(black_box(position), Duration::ZERO)
                    .expect("search should run");
                black_box(outcome.best_move())
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_fixed_depth_search);
criterion_main!(search_benches);

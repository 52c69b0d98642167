use criterion::{criterion_group, criterion_main, Criterion};
use sable::ordering::order_moves;
use sable::{EngineConfig, Position, Searcher};

fn untimed(max_depth: u8) -> EngineConfig {
    EngineConfig {
        time_budget_ms: None,
        max_depth,
        ..EngineConfig::default()
    }
}

fn bench_search(c: &mut Criterion) {
    c.bench_function("decide_depth_3_startpos", |b| {
        b.iter(|| {
            let mut pos = Position::new();
            let mut searcher = Searcher::new(untimed(3));
            searcher.decide(&mut pos)
        })
    });

    let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    c.bench_function("decide_depth_3_kiwipete", |b| {
        b.iter(|| {
            let mut pos = Position::from_fen(kiwipete).unwrap();
            let mut searcher = Searcher::new(untimed(3));
            searcher.decide(&mut pos)
        })
    });

    c.bench_function("decide_depth_4_startpos", |b| {
        b.iter(|| {
            let mut pos = Position::new();
            let mut searcher = Searcher::new(untimed(4));
            searcher.decide(&mut pos)
        })
    });
}

fn bench_ordering(c: &mut Criterion) {
    let kiwipete = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let moves = kiwipete.legal_moves();
    c.bench_function("order_moves_kiwipete", |b| {
        b.iter(|| order_moves(&moves, None))
    });
}

criterion_group!(benches, bench_search, bench_ordering);
criterion_main!(benches);

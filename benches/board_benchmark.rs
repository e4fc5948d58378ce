//! Benchmarks for board generation and bot-played games.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use delve::render::render_frame;
use delve::simulate::{SimulationConfig, StrategyKind, run_game};
use delve::{Board, Direction, GameConfig};

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("default_12x12", GameConfig::default()),
        ("sparse_64x64", GameConfig::new(64, 64, 100)),
        // Nearly full grid forces the enumeration fallback
        ("crowded_32x32", GameConfig::new(32, 32, 1000)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| Board::new(black_box(*config), black_box(42)));
        });
    }
    group.finish();
}

fn bench_moves(c: &mut Criterion) {
    let config = GameConfig::new(64, 64, 0);

    c.bench_function("100_moves_open_board", |b| {
        b.iter(|| {
            let Ok(mut board) = Board::new(config, 7) else {
                return;
            };
            for i in 0..100usize {
                black_box(board.move_player(Direction::ALL[i % 4]));
            }
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let Ok(board) = Board::new(GameConfig::new(40, 40, 150), 3) else {
        return;
    };

    c.bench_function("render_frame_40x40", |b| {
        b.iter(|| black_box(render_frame(black_box(&board))));
    });
}

fn bench_simulated_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulated_game");
    for strategy in [StrategyKind::Random, StrategyKind::Cautious] {
        let config = SimulationConfig {
            strategy,
            ..SimulationConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{strategy:?}")),
            &config,
            |b, config| {
                b.iter(|| {
                    for seed in 0..10u64 {
                        black_box(run_game(black_box(seed), config).ok());
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_moves, bench_render, bench_simulated_games);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cuberesults::{
    engine::{advancement::advancing, config::EngineConfig, ranking::rank},
    types::{Direction, Format},
    wcif::{ActivityCode, AdvancementConditionSpec, ResultRecord, Round},
};

fn round(n: u32) -> Round {
    let results = (0..n)
        .map(|i| {
            let base = 800 + i64::from(i % 97) * 7;
            ResultRecord {
                person_id: i + 1,
                ranking: None,
                attempts: vec![base, base + 30, if i % 11 == 0 { -1 } else { base + 5 }, base + 60, base + 12],
            }
        })
        .collect();

    Round {
        id: ActivityCode::round("333", 1),
        format: Format::AverageOf5,
        cutoff: None,
        advancement_condition: Some(AdvancementConditionSpec {
            kind: "percent".to_string(),
            level: 75,
        }),
        results,
        expected_competitor_count: None,
        roster: Vec::new(),
    }
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_round");
    for n in [100u32, 1_000u32, 10_000u32] {
        let r = round(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &r, |b, r| {
            b.iter(|| rank(&r.results, r.format, Direction::LowerIsBetter));
        });
    }
    group.finish();
}

fn bench_advancing(c: &mut Criterion) {
    let r = round(5_000);
    let ranking = rank(&r.results, r.format, Direction::LowerIsBetter);
    let config = EngineConfig::default();
    c.bench_function("advancing_5k", |b| {
        b.iter(|| advancing(&r, &ranking, &config));
    });
}

criterion_group!(benches, bench_rank, bench_advancing);
criterion_main!(benches);

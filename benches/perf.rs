use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::hint::black_box;

use goal_sort_terminal::api_football::{parse_players_page_json, player_goal_entry};
use goal_sort_terminal::sort::{SortAlgorithm, SortDirection, run_to_end};
use goal_sort_terminal::viz::{Entry, Geometry};

fn random_entries(count: usize, seed: u64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|idx| Entry::new(format!("Player {idx}"), rng.gen_range(0..40)))
        .collect()
}

fn players_page_json(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|idx| {
            format!(
                r#"{{"player":{{"name":"Player {idx}"}},"statistics":[{{"games":{{"appearences":{}}},"goals":{{"total":{}}}}},{{"games":{{"appearences":2}},"goals":{{"total":null}}}}]}}"#,
                idx % 30,
                idx % 7
            )
        })
        .collect();
    format!(r#"{{"errors":[],"response":[{}]}}"#, items.join(","))
}

fn bench_full_sorts(c: &mut Criterion) {
    let entries = random_entries(20, 7);
    for algorithm in [SortAlgorithm::Bubble, SortAlgorithm::Insertion] {
        c.bench_function(&format!("{}_20", algorithm.label()), |b| {
            b.iter_batched(
                || entries.clone(),
                |mut data| {
                    black_box(run_to_end(algorithm, SortDirection::Ascending, &mut data));
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_geometry(c: &mut Criterion) {
    let entries = random_entries(200, 11);
    c.bench_function("geometry_derive_200", |b| {
        b.iter(|| black_box(Geometry::derive(black_box(180), black_box(50), &entries)))
    });
}

fn bench_players_page(c: &mut Criterion) {
    let raw = players_page_json(20);
    c.bench_function("players_page_parse", |b| {
        b.iter(|| {
            let page = parse_players_page_json(black_box(&raw)).unwrap();
            let kept = page.items.iter().filter_map(player_goal_entry).count();
            black_box(kept);
        })
    });
}

criterion_group!(benches, bench_full_sorts, bench_geometry, bench_players_page);
criterion_main!(benches);

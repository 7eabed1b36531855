use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use phonebook::{
    AssociativeTable, DeletionMode, LinearProbingTable, OrderedLinearProbingTable,
    QuadraticProbingTable, SeparateChainingTable,
};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Separate chaining never grows on its own; enlarge it to roughly the size the
// open-addressing tables reach so chains stay short.
fn chaining_for(n: usize) -> SeparateChainingTable {
    let mut t = SeparateChainingTable::new();
    while t.capacity() < n {
        t.enlarge();
    }
    t
}

type Make = fn() -> Box<dyn AssociativeTable>;

fn engines() -> Vec<(&'static str, Make)> {
    // Quadratic hard delete rebuilds the whole table per removal; too slow to
    // share these sizes.
    vec![
        ("linear_soft", linear_soft as Make),
        ("linear_hard", linear_hard as Make),
        ("ordered_soft", ordered_soft as Make),
        ("ordered_hard", ordered_hard as Make),
        ("quadratic_soft", quadratic_soft as Make),
        ("chaining", chaining as Make),
    ]
}

fn linear_soft() -> Box<dyn AssociativeTable> {
    Box::new(LinearProbingTable::new(DeletionMode::Soft))
}
fn linear_hard() -> Box<dyn AssociativeTable> {
    Box::new(LinearProbingTable::new(DeletionMode::Hard))
}
fn ordered_soft() -> Box<dyn AssociativeTable> {
    Box::new(OrderedLinearProbingTable::new(DeletionMode::Soft))
}
fn ordered_hard() -> Box<dyn AssociativeTable> {
    Box::new(OrderedLinearProbingTable::new(DeletionMode::Hard))
}
fn quadratic_soft() -> Box<dyn AssociativeTable> {
    Box::new(QuadraticProbingTable::new(DeletionMode::Soft))
}
fn chaining() -> Box<dyn AssociativeTable> {
    Box::new(chaining_for(N))
}

const N: usize = 20_000;

fn filled(make: Make, seed: u64) -> (Box<dyn AssociativeTable>, Vec<String>) {
    let mut m = make();
    let keys: Vec<String> = lcg(seed).take(N).map(key).collect();
    for k in &keys {
        let _ = m.put(k, k).unwrap();
    }
    (m, keys)
}

fn bench_insert_20k(c: &mut Criterion) {
    for (name, make) in engines() {
        c.bench_function(&format!("{name}::insert_20k"), |b| {
            let keys: Vec<String> = lcg(1).take(N).map(key).collect();
            b.iter_batched(
                make,
                |mut m| {
                    let mut probes = 0usize;
                    for k in &keys {
                        probes += m.put(k, k).unwrap().probes;
                    }
                    black_box((m, probes))
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_find_hit_5k(c: &mut Criterion) {
    for (name, make) in engines() {
        c.bench_function(&format!("{name}::find_hit_5k_on_20k"), |b| {
            let (m, keys) = filled(make, 7);
            // Precompute 5k random query keys using LCG
            let n = keys.len();
            let mut s = 0x9e3779b97f4a7c15u64;
            let queries: Vec<&str> = (0..5_000)
                .map(|_| {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    keys[(s as usize) % n].as_str()
                })
                .collect();
            b.iter(|| {
                for k in &queries {
                    black_box(m.get(k));
                }
            })
        });
    }
}

fn bench_find_miss_5k(c: &mut Criterion) {
    for (name, make) in engines() {
        c.bench_function(&format!("{name}::find_miss_5k_on_20k"), |b| {
            let (m, _) = filled(make, 11);
            let misses: Vec<String> = lcg(0xdead_beef).take(5_000).map(key).collect();
            b.iter(|| {
                for k in &misses {
                    black_box(m.get(k));
                }
            })
        });
    }
}

fn bench_remove_random_2k(c: &mut Criterion) {
    for (name, make) in engines() {
        c.bench_function(&format!("{name}::remove_random_2k_of_20k"), |b| {
            b.iter_batched(
                || {
                    let (m, keys) = filled(make, 5);
                    let n = keys.len();
                    let mut sel = std::collections::HashSet::with_capacity(2_000);
                    let mut s = 0x9e3779b97f4a7c15u64;
                    while sel.len() < 2_000 {
                        s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                        sel.insert((s as usize) % n);
                    }
                    let to_remove: Vec<String> =
                        sel.into_iter().map(|i| keys[i].clone()).collect();
                    (m, to_remove)
                },
                |(mut m, to_remove)| {
                    for k in &to_remove {
                        black_box(m.remove(k));
                    }
                    black_box(m)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_20k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_find_hit_5k,
              bench_find_miss_5k,
              bench_remove_random_2k
}
criterion_main!(benches_insert, benches_ops);

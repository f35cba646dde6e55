use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use intern_table::Interner;
use intern_table::StrRef;
use intern_table::Table;
use intern_table::hash_bytes;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_keys(count: usize) -> Vec<StrRef> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| StrRef::new(format!("key_{:016X}", rng.try_next_u64().unwrap()).as_bytes()))
        .collect()
}

fn hashbrown_hash(key: &StrRef) -> u64 {
    key.hash() as u64
}

fn hashbrown_with(keys: &[StrRef]) -> HashbrownHashTable<(StrRef, u64)> {
    let mut table = HashbrownHashTable::with_capacity(0);
    for (i, key) in keys.iter().enumerate() {
        table.insert_unique(hashbrown_hash(key), (key.clone(), i as u64), |(k, _)| {
            hashbrown_hash(k)
        });
    }
    table
}

fn table_with(keys: &[StrRef]) -> Table<StrRef, u64> {
    let mut table = Table::new();
    for (i, key) in keys.iter().enumerate() {
        table.set(key.clone(), i as u64);
    }
    table
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("intern_table/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| black_box(table_with(&keys)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| black_box(hashbrown_with(&keys)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hit_miss");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let misses = random_keys(size);
        let mut probes = keys.iter().chain(misses.iter()).cloned().collect::<Vec<_>>();
        probes.shuffle(&mut SmallRng::from_os_rng());

        let table = table_with(&keys);
        let hashbrown = hashbrown_with(&keys);
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("intern_table/{size}"), |b| {
            b.iter(|| {
                let mut found = 0u64;
                for key in &probes {
                    if let Some(value) = table.get(key) {
                        found += *value;
                    }
                }
                black_box(found)
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut found = 0u64;
                for key in &probes {
                    if let Some((_, value)) =
                        hashbrown.find(hashbrown_hash(key), |(k, _)| StrRef::ptr_eq(k, key))
                    {
                        found += *value;
                    }
                }
                black_box(found)
            })
        });
    }

    group.finish();
}

fn bench_find_zipf(c: &mut Criterion) {
    for exponent in [1.0, 1.3] {
        let mut group = c.benchmark_group(format!("find_zipf_{exponent:.01}"));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for &size in SIZES {
            let keys = random_keys(size);
            let distr = Zipf::new(size as f32, exponent).unwrap();
            let mut rng = SmallRng::from_os_rng();
            let probes = (0..size)
                .map(|_| keys[rng.sample(distr) as usize - 1].clone())
                .collect::<Vec<_>>();

            let table = table_with(&keys);
            let hashbrown = hashbrown_with(&keys);
            group.throughput(Throughput::Elements(size as u64));

            group.bench_function(format!("intern_table/{size}"), |b| {
                b.iter(|| {
                    for key in &probes {
                        black_box(table.get(key));
                    }
                })
            });

            group.bench_function(format!("hashbrown/{size}"), |b| {
                b.iter(|| {
                    for key in &probes {
                        black_box(
                            hashbrown.find(hashbrown_hash(key), |(k, _)| StrRef::ptr_eq(k, key)),
                        );
                    }
                })
            });
        }

        group.finish();
    }
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let operations = keys
            .iter()
            .flat_map(|key| [key.clone(), key.clone()])
            .collect::<Vec<_>>();
        group.throughput(Throughput::Elements(operations.len() as u64));

        // Every key is inserted once and removed once, in random order.
        group.bench_function(format!("intern_table/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut operations = operations.clone();
                    operations.shuffle(&mut SmallRng::from_os_rng());
                    operations
                },
                |operations| {
                    let mut table = Table::new();
                    for key in operations {
                        if !table.delete(&key) {
                            table.set(key, ());
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut operations = operations.clone();
                    operations.shuffle(&mut SmallRng::from_os_rng());
                    operations
                },
                |operations| {
                    let mut table = HashbrownHashTable::with_capacity(0);
                    for key in operations {
                        let hash = hashbrown_hash(&key);
                        match table.entry(hash, |k: &StrRef| StrRef::ptr_eq(k, &key), hashbrown_hash) {
                            HashbrownEntry::Vacant(entry) => {
                                entry.insert(key);
                            }
                            HashbrownEntry::Occupied(entry) => {
                                black_box(entry.remove().0);
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        // Half the inputs repeat earlier content.
        let mut rng = SmallRng::from_os_rng();
        let contents = (0..size)
            .map(|i| format!("identifier_{}", rng.random_range(0..size / 2 + i / 2 + 1)))
            .collect::<Vec<_>>();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("intern_table/{size}"), |b| {
            b.iter(|| {
                let mut strings = Interner::new();
                for content in &contents {
                    black_box(strings.intern_str(content));
                }
                black_box(strings)
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut strings: HashbrownHashTable<StrRef> = HashbrownHashTable::with_capacity(0);
                for content in &contents {
                    let bytes = content.as_bytes();
                    let hash = hash_bytes(bytes) as u64;
                    let string = strings
                        .entry(hash, |s| s.as_bytes() == bytes, hashbrown_hash)
                        .or_insert_with(|| StrRef::new(bytes))
                        .get()
                        .clone();
                    black_box(string);
                }
                black_box(strings)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random,
    bench_find_hit_miss,
    bench_find_zipf,
    bench_churn,
    bench_intern,
);

criterion_main!(benches);

use clap::Parser;
use intern_table::CollectorHooks;
use intern_table::Interner;
use intern_table::StrRef;
use intern_table::Table;
use intern_table::gc::MarkCollector;

#[derive(Parser, Debug)]
struct Args {
    /// Number of distinct global names to define.
    #[arg(short = 'n', long = "count", default_value_t = 1000)]
    count: usize,

    /// Undefine every n-th global after defining them all (0 keeps all).
    #[arg(short = 'd', long = "delete-every", default_value_t = 4)]
    delete_every: usize,

    /// Preallocate the globals table instead of growing it.
    #[arg(short = 'c', long = "target_capacity")]
    target_capacity: Option<usize>,
}

fn main() {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let mut strings = Interner::new();
    let mut globals: Table<StrRef, u64> = match args.target_capacity {
        Some(capacity) => Table::with_capacity(capacity),
        None => Table::new(),
    };
    println!("Initial capacity: {}", globals.capacity());

    let names: Vec<StrRef> = (0..args.count)
        .map(|i| strings.intern(format!("global_{i}").as_bytes()))
        .collect();
    for (i, name) in names.iter().enumerate() {
        globals.set(name.clone(), i as u64);
    }

    let mut deleted = 0;
    if args.delete_every > 0 {
        for name in names.iter().step_by(args.delete_every) {
            if globals.delete(name) {
                deleted += 1;
            }
        }
    }

    println!(
        "Defined {} globals, undefined {}, {} live in {} slots",
        args.count,
        deleted,
        globals.len(),
        globals.capacity()
    );
    globals.probe_histogram().print();
    globals.debug_stats().print();

    // Drop our own handles so only the globals table keeps names alive.
    drop(names);
    let mut collector = MarkCollector::new();
    globals.mark_reachable(&mut collector);
    let swept = strings.remove_unmarked_weak();
    println!(
        "Collection: marked {}, swept {} interned strings, {} remain",
        collector.marked(),
        swept,
        strings.len()
    );
    for name in strings.iter() {
        collector.unmark(name);
    }

    globals.shrink_to_fit();
    strings.shrink_to_fit();
    println!("After shrink_to_fit:");
    globals.debug_stats().print();
    strings.table().debug_stats().print();

    let probe = strings.intern_str("global_1");
    match globals.get(&probe) {
        Some(value) => println!("global_1 = {value}"),
        None => println!("global_1 is undefined"),
    }
}

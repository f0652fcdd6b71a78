use chain_hash::ChainedHashTable;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 8)]
    capacity: usize,

    #[arg(short = 'k', long = "keys", default_value_t = 10)]
    keys: usize,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut table = match ChainedHashTable::try_with_capacity(args.capacity) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("cannot create table: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "Inserting {} keys into {} buckets",
        args.keys,
        table.capacity()
    );
    for i in 0..args.keys {
        table.insert(&format!("key-{i}"), format!("val-{i}"));
    }

    println!("Overwriting every value...");
    for i in 0..args.keys {
        table.insert(&format!("key-{i}"), format!("new-val-{i}"));
    }
    println!("Entries: {}", table.len());

    println!();
    for index in 0..table.capacity() {
        let Some(mut chain) = table.chain(index) else {
            continue;
        };
        match chain.next() {
            Some((key, value)) => println!("[{index}] key: {key}, value: {value}"),
            None => println!("[{index}] <empty>"),
        }
        for (key, value) in chain {
            println!("      -> key: {key}, value: {value}");
        }
    }
    println!();

    let missing = format!("key-{}", args.keys);
    match table.retrieve(&missing) {
        Ok(value) => println!("{missing} unexpectedly present: {value}"),
        Err(err) => println!("lookup of {missing}: {err}"),
    }

    #[cfg(feature = "stats")]
    {
        table.print_chain_histogram();
        table.debug_stats().print();
    }

    table.destroy();
}

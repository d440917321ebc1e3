use std::sync::mpsc;
use std::sync::Arc;

use anyhow::Context;
use recordstore::config::{load_config, LoadConfig};
use recordstore::{Record, RecordStore};
use threadpool::ThreadPool;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config().context("failed to load configuration")?;
    let store = Arc::new(RecordStore::new());
    let demo = &config.demo;

    match store.put(&demo.namespace, &demo.set, demo.key.as_str(), demo.record.clone()) {
        Ok(()) => println!("Data successfully put into the store"),
        Err(e) => println!("Error putting data into the store: {}", e),
    }

    match store.get(&demo.namespace, &demo.set, &demo.key) {
        Ok(record) => println!("Data retrieved from the store: {}", record),
        Err(e) => println!("Error getting data from the store: {}", e),
    }

    let missing = format!("{}-missing", demo.key);
    if let Err(e) = store.get(&demo.namespace, &demo.set, &missing) {
        println!("Expected miss: {}", e);
    }

    let mismatches = run_load(&store, &demo.namespace, &demo.set, &config.load);
    let total = config.load.workers * config.load.keys_per_worker;
    println!(
        "Concurrent phase: {} workers, {} round trips, {} mismatches",
        config.load.workers, total, mismatches
    );

    if mismatches > 0 {
        anyhow::bail!("{} concurrent round trips did not read back their own write", mismatches);
    }

    Ok(())
}

/// Every worker writes its own keys and reads each one straight back.
/// Returns the number of round trips that did not see their own write.
fn run_load(store: &Arc<RecordStore>, namespace: &str, set: &str, load: &LoadConfig) -> usize {
    let pool = ThreadPool::new(load.workers);
    let (tx, rx) = mpsc::channel();

    for worker in 0..load.workers {
        let store = Arc::clone(store);
        let tx = tx.clone();
        let namespace = namespace.to_string();
        let set = set.to_string();
        let keys = load.keys_per_worker;

        pool.execute(move || {
            let mut mismatches = 0usize;
            for i in 0..keys {
                let key = format!("worker-{}-key-{}", worker, i);
                let record = Record::new()
                    .with_bin("worker", worker as i64)
                    .with_bin("seq", i as i64);

                let ok = store
                    .put(&namespace, &set, key.as_str(), record.clone())
                    .and_then(|()| store.get(&namespace, &set, &key))
                    .map(|read| read == record);

                match ok {
                    Ok(true) => {}
                    Ok(false) => mismatches += 1,
                    Err(e) => {
                        error!(worker, key = %key, "round trip failed: {}", e);
                        mismatches += 1;
                    }
                }
            }
            // rx lives until after pool.join()
            let _ = tx.send(mismatches);
        });
    }
    drop(tx);

    pool.join();
    let mismatches: usize = rx.iter().sum();
    info!(workers = load.workers, mismatches, "load phase finished");
    mismatches
}

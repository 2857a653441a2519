//! Async Dispatch
//!
//! This example submits events to a bounded worker pool and collects
//! failures, saturation included, through the error sink.
//!
//! Run with: cargo run --example async_dispatch

use statem::{MachineBuilder, PoolConfig};
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Async Dispatch ===\n");

    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);

    let machine = MachineBuilder::<&str, &str, u32>::new()
        .transition_with_action("queued", "run", "process", "done")
        .action("process", |_, _, _, _, job: &u32| {
            thread::sleep(Duration::from_millis(50));
            if job % 7 == 0 {
                return Err(format!("job {job} failed").into());
            }
            Ok(())
        })
        .on_error(move |failure| {
            let _ = tx.lock().map(|tx| tx.send(failure));
        })
        .build_async(PoolConfig::new(4))?;

    let accepted = (0..20)
        .filter(|job| machine.event("queued", "run", *job).is_accepted())
        .count();
    println!("accepted {accepted} of 20 jobs with 4 workers\n");

    thread::sleep(Duration::from_millis(300));
    machine.shutdown();

    for failure in rx.try_iter() {
        println!(
            "  job {} [{}] at {}: {}",
            failure.payload, failure.dispatch_id, failure.occurred_at, failure.error
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

//! `termout demo` – status lines from one task, a byte bar from another.

use anyhow::{Context, Result};
use std::time::Duration;
use termout_core::Console;

pub async fn run_demo(console: &Console, steps: u32, delay_ms: u64) -> Result<()> {
    console.print("start\n");
    let delay = Duration::from_millis(delay_ms);

    let bar_console = console.clone();
    let producer = tokio::task::spawn_blocking(move || {
        bar_console.init_bar(100, true);
        for _ in 0..steps {
            bar_console.add_bar(50);
            std::thread::sleep(delay);
        }
    });
    let status_console = console.clone();
    let status = tokio::spawn(async move {
        for i in 1..=steps / 2 {
            tokio::time::sleep(delay * 2).await;
            status_console.printf(format_args!("status {}\n", i));
        }
    });

    producer.await.context("bar producer panicked")?;
    status.await.context("status task panicked")?;
    console.print("done\n");
    Ok(())
}

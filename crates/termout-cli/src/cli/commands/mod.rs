//! CLI command handlers. Each takes the shared console handle.

mod copy;
mod demo;
mod scan;

pub use copy::run_copy;
pub use demo::run_demo;
pub use scan::run_scan;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

/// Await every producer task, then return the first failure (if any).
/// Nothing is still printing once this returns.
pub async fn join_all<T>(tasks: Vec<JoinHandle<Result<T>>>) -> Result<Vec<T>> {
    let mut done = Vec::with_capacity(tasks.len());
    let mut first_error: Option<anyhow::Error> = None;
    for task in tasks {
        match task.await.context("producer task panicked") {
            Ok(Ok(value)) => done.push(value),
            Ok(Err(e)) | Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(done),
    }
}

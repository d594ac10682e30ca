//! Bounded fan-out of per-device work.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

/// Runs `work` for every item with at most `concurrency` futures in flight.
///
/// Results come back in input order. A slot is `None` when its worker panicked or was
/// cancelled; callers substitute their fallback for that item.
pub async fn run_bounded<T, R, F, Fut>(items: Vec<T>, concurrency: usize, work: F) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set: JoinSet<(usize, R)> = JoinSet::new();
    let count = items.len();

    for (index, item) in items.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore);
        let task = work(item);
        join_set.spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let _permit = permit.acquire_owned().await.ok();
            (index, task.await)
        });
    }

    let mut results: Vec<Option<R>> = (0..count).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, value)) => results[index] = Some(value),
            Err(e) => error!(error = %e, "Audit worker did not complete"),
        }
    }
    results
}

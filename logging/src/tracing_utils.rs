use std::future::Future;

use tokio::task::JoinHandle;
use tracing::Instrument;

/// Spawns a task that keeps logging under the caller's span (e.g. the trash can being watched)
pub fn spawn_in_current_span<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future.in_current_span())
}

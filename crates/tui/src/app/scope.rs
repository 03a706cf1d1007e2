use std::future::Future;

use tokio::task::JoinSet;

use crate::app::Message;

/// Requests owned by the currently mounted view.
///
/// Remounting drops the task set, which aborts whatever is still in flight
/// and discards results that finished but were never collected. A view can
/// therefore never receive data fetched for its predecessor.
#[derive(Default)]
pub struct ViewScope {
    tasks: JoinSet<Message>,
    mounts: u64,
}

impl ViewScope {
    pub fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = Message> + Send + 'static,
    {
        self.tasks.spawn(fut);
    }

    pub fn remount(&mut self) {
        let stale = std::mem::take(&mut self.tasks);
        if !stale.is_empty() {
            tracing::debug!(cancelled = stale.len(), mount = self.mounts, "dropping view requests");
        }
        drop(stale);
        self.mounts += 1;
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Next finished result, without waiting.
    pub fn try_next(&mut self) -> Option<Message> {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Some(message) = accept(joined) {
                return Some(message);
            }
        }
        None
    }

    /// Waits for the next result. `None` once the scope is idle.
    #[cfg(test)]
    pub async fn next(&mut self) -> Option<Message> {
        while let Some(joined) = self.tasks.join_next().await {
            if let Some(message) = accept(joined) {
                return Some(message);
            }
        }
        None
    }
}

fn accept(joined: Result<Message, tokio::task::JoinError>) -> Option<Message> {
    match joined {
        Ok(message) => Some(message),
        Err(err) if err.is_cancelled() => None,
        Err(err) => {
            tracing::error!("view request task failed: {err}");
            None
        }
    }
}

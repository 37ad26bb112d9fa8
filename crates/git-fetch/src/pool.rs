use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::FetchError;

/// Runs independent units of work as separate tokio tasks with a bound on
/// how many are in flight, and collects their results in submission order.
///
/// Each task receives exactly one owned input and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct TaskPool {
    concurrency: usize,
}

impl TaskPool {
    pub const DEFAULT_CONCURRENCY: usize = 8;

    /// A concurrency of zero is treated as one.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `task` over every item and return every result.
    pub async fn map_collect<T, R, F, Fut>(
        &self,
        items: Vec<T>,
        task: F,
    ) -> Vec<Result<R, FetchError>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R, FetchError>> + Send + 'static,
    {
        stream::iter(items)
            .map(|item| tokio::spawn(task(item)))
            .buffered(self.concurrency)
            .map(flatten_join)
            .collect()
            .await
    }

    /// Run `task` over every item, stopping at the first failure.
    ///
    /// Tasks already in flight when a failure is observed are detached,
    /// not cancelled.
    pub async fn try_map_collect<T, R, F, Fut>(
        &self,
        items: Vec<T>,
        task: F,
    ) -> Result<Vec<R>, FetchError>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R, FetchError>> + Send + 'static,
    {
        stream::iter(items)
            .map(|item| tokio::spawn(task(item)))
            .buffered(self.concurrency)
            .map(flatten_join)
            .try_collect()
            .await
    }
}

impl Default for TaskPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONCURRENCY)
    }
}

fn flatten_join<R>(
    joined: Result<Result<R, FetchError>, tokio::task::JoinError>,
) -> Result<R, FetchError> {
    joined.unwrap_or_else(|e| Err(FetchError::Task(e.to_string())))
}

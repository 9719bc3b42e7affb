//! Bounded worker pool
//!
//! A pool is created for one batch of tasks and consumed by [`WorkerPool::run`].
//! Exactly `size` workers drain a shared queue, so at most `size` tasks are
//! in progress at any instant. Completion order is not preserved.

use crate::error::{ExecutionError, ExecutionResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> ExecutionResult<Self> {
        if size == 0 {
            return Err(ExecutionError::ValidationError(
                "worker pool size must be at least 1".to_string(),
            ));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run `work` over every task and wait for all workers to finish
    pub async fn run<T, R, F, Fut>(self, tasks: Vec<T>, work: F) -> ExecutionResult<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let total = tasks.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let work = Arc::new(work);
        let mut workers = JoinSet::new();

        debug!("Starting {} workers for {} tasks", self.size, total);

        for worker_id in 0..self.size {
            let queue = Arc::clone(&queue);
            let work = Arc::clone(&work);
            workers.spawn(async move {
                let mut results = Vec::new();
                loop {
                    // Release the lock before awaiting the task
                    let next = queue.lock().pop_front();
                    match next {
                        Some(task) => results.push((*work)(task).await),
                        None => break,
                    }
                }
                debug!("Worker {} finished after {} tasks", worker_id, results.len());
                results
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next().await {
            results.extend(joined?);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(ExecutionError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_runs_every_task_once() {
        let pool = WorkerPool::new(3).unwrap();
        let mut results = pool.run((0..10).collect(), |n: u32| async move { n * 2 }).await.unwrap();
        results.sort_unstable();
        assert_eq!(results, (0..10).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded_by_size() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let pool = WorkerPool::new(4).unwrap();
        let (f, p) = (in_flight.clone(), peak.clone());
        let results = pool
            .run((0..20).collect::<Vec<u32>>(), move |_| {
                let (f, p) = (f.clone(), p.clone());
                async move {
                    let now = f.fetch_add(1, Ordering::SeqCst) + 1;
                    p.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    f.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 20);
        assert_eq!(peak.load(Ordering::SeqCst), 4);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_more_workers_than_tasks() {
        let pool = WorkerPool::new(8).unwrap();
        let results = pool.run(vec!["a", "b"], |s| async move { s.len() }).await.unwrap();
        assert_eq!(results, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_panicking_task_is_a_worker_error() {
        let pool = WorkerPool::new(1).unwrap();
        let result = pool
            .run(vec![1u8], |n| async move {
                assert!(n > 1, "probe task panicked");
                n
            })
            .await;
        assert!(matches!(result, Err(ExecutionError::WorkerError(_))));
    }
}

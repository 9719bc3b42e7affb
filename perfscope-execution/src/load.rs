//! Load test coordination

use crate::error::{ExecutionError, ExecutionResult};
use crate::pool::WorkerPool;
use crate::probe::ProbeExecutor;
use chrono::Utc;
use perfscope_config::LoadConfig;
use perfscope_core::{ids, LoadTestRecord};
use std::sync::Arc;
use tracing::info;

/// One queued probe of a load test
#[derive(Debug, Clone)]
struct ProbeTask {
    test_id: String,
    query: String,
}

/// Fans a load test out over a worker pool and folds the results
pub struct LoadCoordinator {
    executor: Arc<ProbeExecutor>,
    max_concurrent_users: usize,
}

impl LoadCoordinator {
    pub fn new(executor: Arc<ProbeExecutor>) -> Self {
        Self::with_config(executor, &LoadConfig::default())
    }

    pub fn with_config(executor: Arc<ProbeExecutor>, config: &LoadConfig) -> Self {
        Self {
            executor,
            max_concurrent_users: config.max_concurrent_users,
        }
    }

    fn validate(
        &self,
        queries: &[String],
        concurrent_users: usize,
        requests_per_user: usize,
    ) -> ExecutionResult<()> {
        if queries.is_empty() {
            return Err(ExecutionError::ValidationError(
                "at least one query is required".to_string(),
            ));
        }
        if concurrent_users == 0 {
            return Err(ExecutionError::ValidationError(
                "concurrent_users must be at least 1".to_string(),
            ));
        }
        if requests_per_user == 0 {
            return Err(ExecutionError::ValidationError(
                "requests_per_user must be at least 1".to_string(),
            ));
        }
        if concurrent_users > self.max_concurrent_users {
            return Err(ExecutionError::ValidationError(format!(
                "concurrent_users ({}) exceeds the configured maximum of {}",
                concurrent_users, self.max_concurrent_users
            )));
        }
        Ok(())
    }

    /// Run `concurrent_users × requests_per_user` probes with at most
    /// `concurrent_users` in flight, then store and return the aggregate.
    pub async fn run(
        &self,
        queries: &[String],
        concurrent_users: usize,
        requests_per_user: usize,
        target_base_url: &str,
    ) -> ExecutionResult<LoadTestRecord> {
        self.validate(queries, concurrent_users, requests_per_user)?;

        let load_test_id = ids::generate("load_test");
        let start_time = Utc::now();

        // Query selection depends only on the request index, so every user
        // walks the same round-robin sequence
        let tasks: Vec<ProbeTask> = (0..concurrent_users)
            .flat_map(|user| {
                let load_test_id = &load_test_id;
                (0..requests_per_user).map(move |req| ProbeTask {
                    test_id: format!("{}_user{}_req{}", load_test_id, user, req),
                    query: queries[req % queries.len()].clone(),
                })
            })
            .collect();

        info!(
            "Starting load test {}: {} users x {} requests against {}",
            load_test_id, concurrent_users, requests_per_user, target_base_url
        );

        let pool = WorkerPool::new(concurrent_users)?;
        let executor = Arc::clone(&self.executor);
        let target: Arc<str> = Arc::from(target_base_url);
        let results = pool
            .run(tasks, move |task: ProbeTask| {
                let executor = Arc::clone(&executor);
                let target = Arc::clone(&target);
                async move { executor.run(&task.query, &target, &task.test_id).await }
            })
            .await?;

        let end_time = Utc::now();
        let record = LoadTestRecord::from_results(
            load_test_id,
            start_time,
            end_time,
            concurrent_users,
            requests_per_user,
            &results,
        );

        self.executor.store().insert_load_test(record.clone());
        info!(
            "Load test {} finished: {}/{} successful, avg latency {:.1}ms",
            record.test_id, record.successful_tests, record.total_tests, record.average_latency_ms
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::test_support::{executor, ScriptedClient};
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_validation_rejects_before_probing() {
        let client = Arc::new(ScriptedClient::new(200, "email sent"));
        let probe = Arc::new(executor(client.clone()));
        let coordinator = LoadCoordinator::new(probe.clone());

        for (q, users, reqs) in [
            (queries(&[]), 2, 2),
            (queries(&["a"]), 0, 2),
            (queries(&["a"]), 2, 0),
            (queries(&["a"]), 201, 1),
        ] {
            let result = coordinator.run(&q, users, reqs, "http://target").await;
            assert!(matches!(result, Err(ExecutionError::ValidationError(_))));
        }

        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(probe.store().test_count(), 0);
        assert_eq!(probe.store().load_test_count(), 0);
    }

    #[tokio::test]
    async fn test_ids_and_counts() {
        let client = Arc::new(ScriptedClient::new(200, "email sent"));
        let probe = Arc::new(executor(client.clone()));
        let coordinator = LoadCoordinator::new(probe.clone());

        let record = coordinator
            .run(&queries(&["q"]), 3, 2, "http://target")
            .await
            .unwrap();

        assert_eq!(record.total_tests, 6);
        assert_eq!(record.successful_tests + record.failed_tests, 6);
        assert_eq!(record.concurrent_users, 3);
        assert_eq!(record.requests_per_user, 2);
        assert!(record.test_id.starts_with("load_test_"));

        let ids: HashSet<String> = probe.store().tests().into_keys().collect();
        assert_eq!(ids.len(), 6);
        for user in 0..3 {
            for req in 0..2 {
                assert!(ids.contains(&format!("{}_user{}_req{}", record.test_id, user, req)));
            }
        }
        assert_eq!(probe.store().load_test(&record.test_id), Some(record));
    }

    #[tokio::test]
    async fn test_concurrent_load_tests_keep_separate_records() {
        let client = Arc::new(ScriptedClient::new(200, "email sent"));
        let shared = Arc::new(executor(client.clone()));
        let first = LoadCoordinator::new(shared.clone());
        let second = LoadCoordinator::new(shared.clone());
        let q = queries(&["q"]);

        let (a, b) = tokio::join!(
            first.run(&q, 2, 2, "http://target"),
            second.run(&q, 2, 2, "http://target")
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.test_id, b.test_id);
        assert!(a.test_id.starts_with("load_test_"));
        assert!(b.test_id.starts_with("load_test_"));
        assert_eq!(shared.store().test_count(), 8);
        assert_eq!(shared.store().load_test_count(), 2);
        assert_eq!(shared.store().load_test(&a.test_id), Some(a));
        assert_eq!(shared.store().load_test(&b.test_id), Some(b));
    }

    #[tokio::test]
    async fn test_round_robin_queries() {
        let client = Arc::new(ScriptedClient::new(200, "email sent"));
        let probe = Arc::new(executor(client.clone()));
        let coordinator = LoadCoordinator::new(probe.clone());

        let record = coordinator
            .run(&queries(&["a", "b"]), 1, 3, "http://target")
            .await
            .unwrap();

        let tests = probe.store().tests();
        let query_of = |req: usize| {
            tests[&format!("{}_user0_req{}", record.test_id, req)]
                .query
                .clone()
        };
        assert_eq!(query_of(0), "a");
        assert_eq!(query_of(1), "b");
        assert_eq!(query_of(2), "a");
    }

    #[tokio::test]
    async fn test_in_flight_never_exceeds_users() {
        let client =
            Arc::new(ScriptedClient::new(200, "email sent").with_delay(Duration::from_millis(20)));
        let probe = Arc::new(executor(client.clone()));
        let coordinator = LoadCoordinator::new(probe);

        let record = coordinator
            .run(&queries(&["q"]), 3, 4, "http://target")
            .await
            .unwrap();

        assert_eq!(record.total_tests, 12);
        assert_eq!(client.calls.load(Ordering::SeqCst), 12);
        assert!(client.peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(client.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_failures_fold_to_zero_aggregates() {
        let probe = Arc::new(executor(Arc::new(ScriptedClient::new(503, "down"))));
        let coordinator = LoadCoordinator::new(probe);

        let record = coordinator
            .run(&queries(&["q"]), 2, 2, "http://target")
            .await
            .unwrap();

        assert_eq!(record.failed_tests, 4);
        assert_eq!(record.successful_tests, 0);
        assert_eq!(record.average_latency_ms, 0.0);
        assert_eq!(record.total_tokens, 0);
        assert_eq!(record.total_cost, 0.0);
    }
}

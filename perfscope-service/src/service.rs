//! Service wiring and operations

use crate::error::{ServiceError, ServiceResult};
use crate::requests::{
    AnalyzeRequest, BenchmarkRequest, CompareRequest, MonitorCostsRequest, RunLoadRequest,
    RunProbeRequest,
};
use perfscope_analysis::{AnalysisAggregator, AnalysisOutcome, CostMonitor, CostReport};
use perfscope_config::PerfscopeConfig;
use perfscope_core::{
    ids, scenarios, ComparisonReport, CoreError, LoadTestRecord, MetricSet, PatternExtractor,
    PricingModel, RatingEngine, ResultStore, TestRecord,
};
use perfscope_execution::{BenchmarkReport, LoadCoordinator, ProbeExecutor, ScenarioBenchmark};
use perfscope_http::{ChatClient, HttpManager};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for every perfscope operation
///
/// All components share one [`ResultStore`], so records written by probes,
/// load tests and benchmarks are visible to analysis and cost monitoring.
pub struct PerformanceService {
    config: PerfscopeConfig,
    store: Arc<ResultStore>,
    executor: Arc<ProbeExecutor>,
    load: LoadCoordinator,
    benchmark: ScenarioBenchmark,
    aggregator: AnalysisAggregator,
    costs: CostMonitor,
    engine: RatingEngine,
}

impl PerformanceService {
    /// Build the service with a real HTTP client
    pub fn new(config: PerfscopeConfig) -> ServiceResult<Self> {
        config.validate_all()?;
        let client = HttpManager::with_config(config.http.clone().into())?;
        Self::with_client(config, Arc::new(client))
    }

    /// Build the service around any [`ChatClient`]
    pub fn with_client(
        config: PerfscopeConfig,
        client: Arc<dyn ChatClient>,
    ) -> ServiceResult<Self> {
        config.validate_all()?;

        let store = Arc::new(ResultStore::new());
        let extractor = Arc::new(PatternExtractor::new(config.telemetry.clone().into())?);
        let executor = Arc::new(
            ProbeExecutor::new(client, store.clone(), extractor).with_probe_config(&config.probe),
        );
        let pricing = PricingModel::from(config.telemetry.pricing.clone());

        info!(
            "Performance service ready for target {}",
            config.probe.target_url
        );

        Ok(Self {
            load: LoadCoordinator::with_config(executor.clone(), &config.load),
            benchmark: ScenarioBenchmark::new(executor.clone()),
            aggregator: AnalysisAggregator::with_config(store.clone(), &config.analysis),
            costs: CostMonitor::with_pricing(store.clone(), &pricing),
            engine: RatingEngine::default(),
            executor,
            store,
            config,
        })
    }

    pub fn config(&self) -> &PerfscopeConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ResultStore> {
        &self.store
    }

    fn target<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.config.probe.target_url)
    }

    /// Send one probe; transport and remote failures come back as a failed record
    pub async fn run_probe(&self, request: RunProbeRequest) -> ServiceResult<TestRecord> {
        request.validate()?;
        let test_id = request
            .test_id
            .clone()
            .unwrap_or_else(|| ids::generate("test"));
        let target = self.target(request.target_url.as_deref());

        Ok(self.executor.run(&request.query, target, &test_id).await)
    }

    pub async fn run_load(&self, request: RunLoadRequest) -> ServiceResult<LoadTestRecord> {
        request.validate()?;
        let users = request
            .concurrent_users
            .unwrap_or(self.config.load.default_concurrent_users);
        let per_user = request
            .requests_per_user
            .unwrap_or(self.config.load.default_requests_per_user);
        let target = self.target(request.target_url.as_deref());

        Ok(self
            .load
            .run(&request.queries, users, per_user, target)
            .await?)
    }

    pub fn analyze(&self, request: AnalyzeRequest) -> ServiceResult<AnalysisOutcome> {
        request.validate()?;
        Ok(self.aggregator.analyze(
            request.test_ids.as_deref(),
            request.generate_report,
            request.compare_with_standards,
        ))
    }

    pub fn monitor_costs(&self, request: MonitorCostsRequest) -> ServiceResult<CostReport> {
        request.validate()?;
        let timeframe = request.timeframe_or(&self.config.analysis.default_timeframe)?;
        Ok(self
            .costs
            .monitor(timeframe, request.model_name.as_deref()))
    }

    /// Grade metrics; a named stored record supplies any metric left unset
    pub fn compare(&self, request: CompareRequest) -> ServiceResult<ComparisonReport> {
        request.validate()?;

        let stored = match &request.test_id {
            Some(id) => Some(
                self.store
                    .test(id)
                    .ok_or_else(|| CoreError::NotFound(format!("test result '{}'", id)))?,
            ),
            None => None,
        };

        let mut metrics = MetricSet {
            latency_ms: request.latency_ms,
            tokens_used: request.tokens_used,
            cost: request.cost,
            dataset_size: request.dataset_size,
            success_rate: None,
            success: Some(request.success),
        };

        if let Some(record) = &stored {
            debug!("Filling comparison metrics from stored record {}", record.test_id);
            metrics.latency_ms = metrics.latency_ms.or(Some(record.latency_ms));
            metrics.tokens_used = metrics.tokens_used.or(record.tokens_used());
            metrics.cost = metrics.cost.or(record.cost());
            metrics.dataset_size = metrics.dataset_size.or(record.dataset_size());
            metrics.success = Some(request.success && record.is_success());
        }

        let report = self.engine.compare(&metrics);
        Ok(match request.test_id {
            Some(id) => report.with_test_id(id),
            None => report,
        })
    }

    /// Run predefined scenarios one after another
    pub async fn benchmark(&self, request: BenchmarkRequest) -> ServiceResult<BenchmarkReport> {
        request.validate()?;
        if scenarios::resolve(request.scenarios.as_slice()).is_empty() {
            return Err(ServiceError::Validation(format!(
                "no known scenarios in {:?}; available: {}",
                request.scenarios,
                scenarios::keys().collect::<Vec<_>>().join(", ")
            )));
        }
        let target = self.target(request.target_url.as_deref());

        Ok(self.benchmark.run(request.scenarios.as_slice(), target).await)
    }

    pub fn available_scenarios(&self) -> BTreeMap<String, String> {
        scenarios::available(self.executor.recipient())
    }

    pub fn test_results(&self) -> HashMap<String, TestRecord> {
        self.store.tests()
    }

    pub fn load_test_results(&self) -> HashMap<String, LoadTestRecord> {
        self.store.load_tests()
    }

    pub fn clear_results(&self) {
        info!(
            "Clearing {} test results and {} load test results",
            self.store.test_count(),
            self.store.load_test_count()
        );
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfscope_core::OverallGrade;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"[{"Input": "a"}, {"Input": "b"}, {"Input": "c"}] get_markdown https://www.discoveryintech.com/sap email sent"#;

    async fn service_for(server: &MockServer) -> PerformanceService {
        let mut config = PerfscopeConfig::default();
        config.probe.target_url = server.uri();
        PerformanceService::new(config).unwrap()
    }

    async fn mount_ok(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/discovery-ai/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_probe_uses_configured_target_and_generated_id() {
        let server = MockServer::start().await;
        mount_ok(&server).await;
        let service = service_for(&server).await;

        let record = service
            .run_probe(RunProbeRequest::new("Create a dataset"))
            .await
            .unwrap();

        assert!(record.is_success(), "{:?}", record.error());
        assert!(record.test_id.starts_with("test_"));
        assert_eq!(record.dataset_size(), Some(3));
        assert_eq!(service.test_results().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_runs_without_ids_are_all_stored() {
        let server = MockServer::start().await;
        mount_ok(&server).await;
        let service = service_for(&server).await;

        let (a, b, c) = tokio::join!(
            service.run_probe(RunProbeRequest::new("Create a dataset")),
            service.run_probe(RunProbeRequest::new("Create a dataset")),
            service.run_probe(RunProbeRequest::new("Create a dataset"))
        );
        let ids = [a.unwrap().test_id, b.unwrap().test_id, c.unwrap().test_id];

        assert!(ids.iter().all(|id| id.starts_with("test_")));
        assert_eq!(service.test_results().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_probe_stores_nothing() {
        let server = MockServer::start().await;
        let service = service_for(&server).await;

        let err = service.run_probe(RunProbeRequest::new("")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(service.test_results().is_empty());
    }

    #[tokio::test]
    async fn test_load_uses_config_defaults() {
        let server = MockServer::start().await;
        mount_ok(&server).await;
        let service = service_for(&server).await;

        let load = service
            .run_load(RunLoadRequest::new(["q1", "q2"]))
            .await
            .unwrap();

        assert_eq!(load.concurrent_users, 5);
        assert_eq!(load.requests_per_user, 2);
        assert_eq!(load.total_tests, 10);
        assert_eq!(load.successful_tests + load.failed_tests, load.total_tests);
        assert_eq!(service.load_test_results().len(), 1);
    }

    #[tokio::test]
    async fn test_compare_fills_from_stored_record() {
        let server = MockServer::start().await;
        mount_ok(&server).await;
        let service = service_for(&server).await;
        service
            .run_probe(RunProbeRequest::new("q").with_test_id("stored"))
            .await
            .unwrap();

        let report = service
            .compare(CompareRequest {
                latency_ms: Some(150),
                ..CompareRequest::for_test("stored")
            })
            .unwrap();

        assert_eq!(report.test_id.as_deref(), Some("stored"));
        let latency = report
            .comparison(perfscope_core::Metric::Latency)
            .unwrap();
        assert_eq!(latency.actual, 150.0);
        assert!(report
            .comparison(perfscope_core::Metric::DatasetSize)
            .is_some());
        assert!(report.successful_execution);
    }

    #[tokio::test]
    async fn test_compare_unknown_record_is_not_found() {
        let server = MockServer::start().await;
        let service = service_for(&server).await;

        let err = service.compare(CompareRequest::for_test("missing")).unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_compare_explicit_metrics_only() {
        let server = MockServer::start().await;
        let service = service_for(&server).await;

        let report = service
            .compare(CompareRequest {
                latency_ms: Some(150),
                cost: Some(0.01),
                dataset_size: Some(25),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(report.overall_grade, OverallGrade::Excellent);
        assert!(report.test_id.is_none());
    }

    #[tokio::test]
    async fn test_benchmark_rejects_unknown_scenarios() {
        let server = MockServer::start().await;
        let service = service_for(&server).await;

        let err = service
            .benchmark(BenchmarkRequest {
                scenarios: vec!["oracle".to_string()],
                target_url: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_clear_results() {
        let server = MockServer::start().await;
        mount_ok(&server).await;
        let service = service_for(&server).await;
        service.run_probe(RunProbeRequest::new("q")).await.unwrap();

        service.clear_results();
        assert!(service.test_results().is_empty());
        assert!(matches!(
            service.analyze(AnalyzeRequest::default()).unwrap(),
            AnalysisOutcome::NoData { .. }
        ));
    }

    #[tokio::test]
    async fn test_available_scenarios_use_configured_recipient() {
        let server = MockServer::start().await;
        let mut config = PerfscopeConfig::default();
        config.probe.target_url = server.uri();
        config.probe.notification_recipient = "ops@example.org".to_string();
        let service = PerformanceService::new(config).unwrap();

        let available = service.available_scenarios();
        assert_eq!(available.len(), 7);
        assert!(available["sap"].contains("ops@example.org"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PerfscopeConfig::default();
        config.probe.chat_path = "no-slash".to_string();
        assert!(matches!(
            PerformanceService::new(config),
            Err(ServiceError::Config(_))
        ));
    }
}

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

/// Render every registered metric in the Prometheus text format.
pub async fn gather_text() -> anyhow::Result<String> {
    let metrics = get_metrics().await;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Fetch metrics
    pub fetch_requests: IntCounterVec,
    pub fetch_failures: IntCounterVec,
    pub fetch_duration: HistogramVec,

    // Config
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("sastoken".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            fetch_requests: IntCounterVec::new(Opts::new("fetch_requests_total", "Total SAS token fetch attempts"),&["method"],).unwrap(),
            fetch_failures: IntCounterVec::new(Opts::new("fetch_failures_total", "SAS token fetch failures by tier and kind"),&["tier", "kind"],).unwrap(),
            fetch_duration: HistogramVec::new(HistogramOpts::new("fetch_duration_seconds", "SAS token fetch duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),&["outcome"],).unwrap(),

            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors found while loading config",).unwrap(),

            registry,
        });

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.fetch_requests.clone())).unwrap();
        reg.register(Box::new(metrics.fetch_failures.clone())).unwrap();
        reg.register(Box::new(metrics.fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }
}

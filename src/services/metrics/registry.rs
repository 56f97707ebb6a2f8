use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

const NAMESPACE: &str = "leetdesign";

/// Central metrics registry for the problem bank
pub struct MetricsRegistry {
    registry: Registry,

    // HTTP Metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,

    // Grading Metrics
    pub gradings_total: CounterVec,
    pub grading_failures_total: Counter,
    pub grading_duration_seconds: Histogram,

    // Verification Metrics
    pub verification_codes_total: CounterVec,

    // Progress / Catalog Metrics
    pub progress_writes_total: CounterVec,
    pub problems_renumbered_total: Counter,
    pub catalog_size: Gauge,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        // HTTP Metrics
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests").namespace(NAMESPACE),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request duration")
                .namespace(NAMESPACE)
                .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // Grading Metrics
        let gradings_total = CounterVec::new(
            Opts::new("gradings_total", "Completed gradings by verdict").namespace(NAMESPACE),
            &["verdict"],
        )?;
        registry.register(Box::new(gradings_total.clone()))?;

        let grading_failures_total = Counter::with_opts(
            Opts::new("grading_failures_total", "Grading calls that produced no usable result")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(grading_failures_total.clone()))?;

        let grading_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("grading_duration_seconds", "Grader round-trip duration")
                .namespace(NAMESPACE)
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]),
        )?;
        registry.register(Box::new(grading_duration_seconds.clone()))?;

        // Verification Metrics
        let verification_codes_total = CounterVec::new(
            Opts::new("verification_codes_total", "Verification code operations by outcome")
                .namespace(NAMESPACE),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(verification_codes_total.clone()))?;

        // Progress / Catalog Metrics
        let progress_writes_total = CounterVec::new(
            Opts::new("progress_writes_total", "Progress upserts by resulting status")
                .namespace(NAMESPACE),
            &["status"],
        )?;
        registry.register(Box::new(progress_writes_total.clone()))?;

        let problems_renumbered_total = Counter::with_opts(
            Opts::new("problems_renumbered_total", "Display ids shifted by problem deletion")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(problems_renumbered_total.clone()))?;

        let catalog_size = Gauge::with_opts(
            Opts::new("catalog_size", "Problems in the catalog")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(catalog_size.clone()))?;

        Ok(Arc::new(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            gradings_total,
            grading_failures_total,
            grading_duration_seconds,
            verification_codes_total,
            progress_writes_total,
            problems_renumbered_total,
            catalog_size,
        }))
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

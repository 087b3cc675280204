//! Prometheus counters for submit attempts, exposed at `/metrics`.
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct FormsMetrics {
    registry: Registry,
    submissions_accepted: IntCounter,
    submissions_rejected: IntCounterVec,
    encoding_anomalies: IntCounter,
}

impl FormsMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions_accepted = IntCounter::new(
            "forms_submissions_accepted_total",
            "Submissions persisted",
        )?;
        let submissions_rejected = IntCounterVec::new(
            Opts::new("forms_submissions_rejected_total", "Submit attempts refused"),
            &["code"],
        )?;
        let encoding_anomalies = IntCounter::new(
            "forms_encoding_anomalies_total",
            "Answers that could not be stored as given",
        )?;

        registry.register(Box::new(submissions_accepted.clone()))?;
        registry.register(Box::new(submissions_rejected.clone()))?;
        registry.register(Box::new(encoding_anomalies.clone()))?;

        Ok(Self {
            registry,
            submissions_accepted,
            submissions_rejected,
            encoding_anomalies,
        })
    }

    pub fn record_accepted(&self, anomalies: usize) {
        self.submissions_accepted.inc();
        self.encoding_anomalies.inc_by(anomalies as u64);
    }

    /// `code` is the error code returned to the caller
    pub fn record_rejected(&self, code: &str) {
        self.submissions_rejected.with_label_values(&[code]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

//! Engine metrics
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! every call is a no-op.

use std::time::Duration;

/// Which pipeline produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Text,
    Image,
}

impl Pipeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

/// Register metric descriptions with the installed recorder
pub fn describe_metrics() {
    metrics::describe_counter!(
        "spamlens_analyses_total",
        "Total number of content items analyzed by pipeline"
    );
    metrics::describe_counter!(
        "spamlens_spam_verdicts_total",
        "Total number of spam verdicts by pipeline"
    );
    metrics::describe_counter!(
        "spamlens_decode_failures_total",
        "Total number of images whose pixels could not be decoded"
    );
    metrics::describe_histogram!(
        "spamlens_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Detector suite latency in microseconds by pipeline"
    );
}

/// Record one completed analysis
pub fn record_analysis(pipeline: Pipeline, is_spam: bool, elapsed: Duration) {
    metrics::counter!("spamlens_analyses_total", "pipeline" => pipeline.as_str()).increment(1);
    metrics::histogram!("spamlens_analysis_latency_us", "pipeline" => pipeline.as_str())
        .record(elapsed.as_micros() as f64);

    if is_spam {
        metrics::counter!("spamlens_spam_verdicts_total", "pipeline" => pipeline.as_str())
            .increment(1);
    }
}

pub fn record_decode_failure() {
    metrics::counter!("spamlens_decode_failures_total").increment(1);
}

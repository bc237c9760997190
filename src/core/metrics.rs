//! Metrics collection for the bot using Prometheus
//!
//! Tracks photo throughput, batch completions and per-stage pipeline failures.
//! Metrics live in the default registry and are exposed on `/metrics`.

// Registration only fails on duplicate metric names, which is a programming error.
#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter, IntCounterVec};

/// Photos whose link reached the spreadsheet
pub static PHOTOS_PROCESSED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "photosheet_photos_processed_total",
        "Total number of photos uploaded and linked in the spreadsheet"
    )
    .expect("register photosheet_photos_processed_total")
});

/// Batches that reached the configured size and wrapped around
pub static BATCHES_COMPLETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "photosheet_batches_completed_total",
        "Total number of completed photo batches"
    )
    .expect("register photosheet_batches_completed_total")
});

/// Failed pipeline runs
/// Labels: stage (download/staging/upload/permission/spreadsheet)
pub static PIPELINE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "photosheet_pipeline_failures_total",
        "Total number of failed photo ingestions by stage",
        &["stage"]
    )
    .expect("register photosheet_pipeline_failures_total")
});

/// Wall time of one pipeline run, success or failure
pub static PIPELINE_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "photosheet_pipeline_duration_seconds",
        "Time spent ingesting a single photo",
        vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("register photosheet_pipeline_duration_seconds")
});

/// Touches every metric so they show up on `/metrics` before the first photo.
pub fn init_metrics() {
    Lazy::force(&PHOTOS_PROCESSED_TOTAL);
    Lazy::force(&BATCHES_COMPLETED_TOTAL);
    Lazy::force(&PIPELINE_FAILURES_TOTAL);
    Lazy::force(&PIPELINE_DURATION_SECONDS);
}

/// Records a failed run for the given stage
pub fn record_failure(stage: &str) {
    PIPELINE_FAILURES_TOTAL.with_label_values(&[stage]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failure_increments_stage() {
        init_metrics();
        let before = PIPELINE_FAILURES_TOTAL.with_label_values(&["upload"]).get();
        record_failure("upload");
        assert_eq!(PIPELINE_FAILURES_TOTAL.with_label_values(&["upload"]).get(), before + 1);
    }
}

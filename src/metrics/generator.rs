//! Synthetic performance data for the dashboard.
//!
//! Samples are generated once per process and reused afterwards. [`MetricsCache`] is the
//! compute-once guard; [`generate`] reads from a process-wide instance of it.

use std::sync::OnceLock;

use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::models::{MetricSample, MetricsSummary};

/// Number of daily samples in the series
pub const SAMPLE_COUNT: usize = 10;

const MODEL_LABELS: [&str; 2] = ["Model A", "Model B"];
const ACCURACY_RANGE: (f64, f64) = (0.85, 0.99);
const LATENCY_RANGE_MS: (f64, f64) = (80.0, 200.0);
const CALLS_RANGE: (u32, u32) = (100, 1000);

static PROCESS_CACHE: MetricsCache = MetricsCache::new();

/// Return the process-wide sample series, generating it on first use.
///
/// Every call within one process returns the same samples, ordered oldest to newest.
pub fn generate() -> &'static [MetricSample] {
    PROCESS_CACHE.get_or_generate()
}

/// Compute-once holder for a sample series
#[derive(Debug, Default)]
pub struct MetricsCache {
    samples: OnceLock<Vec<MetricSample>>,
}

impl MetricsCache {
    pub const fn new() -> Self {
        Self { samples: OnceLock::new() }
    }

    /// Samples generated from the thread RNG and today's local date, computed at most once
    pub fn get_or_generate(&self) -> &[MetricSample] {
        self.get_or_generate_with(|| {
            generate_samples(&mut rand::thread_rng(), Local::now().date_naive())
        })
    }

    /// Like [`get_or_generate`](Self::get_or_generate) with a caller-supplied generator.
    /// The generator only runs if nothing is cached yet.
    pub fn get_or_generate_with<F>(&self, generator: F) -> &[MetricSample]
    where
        F: FnOnce() -> Vec<MetricSample>,
    {
        self.samples.get_or_init(generator)
    }

    pub fn is_generated(&self) -> bool {
        self.samples.get().is_some()
    }
}

/// Generate [`SAMPLE_COUNT`] samples, one per day going back from `today`.
///
/// Samples are produced newest first and returned oldest first.
pub fn generate_samples<R: Rng>(rng: &mut R, today: NaiveDate) -> Vec<MetricSample> {
    let mut samples: Vec<MetricSample> = (0..SAMPLE_COUNT)
        .map(|days_back| {
            let model = MODEL_LABELS.choose(rng).copied().unwrap_or(MODEL_LABELS[0]);
            MetricSample {
                date: today - Duration::days(days_back as i64),
                model: model.to_string(),
                accuracy: round_to(rng.gen_range(ACCURACY_RANGE.0..=ACCURACY_RANGE.1), 2),
                latency_ms: round_to(rng.gen_range(LATENCY_RANGE_MS.0..=LATENCY_RANGE_MS.1), 1),
                calls: rng.gen_range(CALLS_RANGE.0..=CALLS_RANGE.1),
            }
        })
        .collect();

    samples.reverse();
    debug!(count = samples.len(), %today, "Generated synthetic metric samples.");
    samples
}

/// Aggregate a sample series for the metric cards. An empty slice yields zeros.
pub fn summarize(samples: &[MetricSample]) -> MetricsSummary {
    if samples.is_empty() {
        return MetricsSummary::default();
    }

    let count = samples.len() as f64;
    MetricsSummary {
        mean_accuracy: samples.iter().map(|s| s.accuracy).sum::<f64>() / count,
        mean_latency_ms: samples.iter().map(|s| s.latency_ms).sum::<f64>() / count,
        total_calls: samples.iter().map(|s| u64::from(s.calls)).sum(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

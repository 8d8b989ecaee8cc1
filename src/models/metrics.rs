use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display format used for sample dates (dd/mm/YYYY)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One day of simulated model performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub date: NaiveDate,
    pub model: String,
    pub accuracy: f64,
    pub latency_ms: f64,
    pub calls: u32,
}

impl MetricSample {
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Aggregates shown on the dashboard metric cards
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSummary {
    pub mean_accuracy: f64,
    pub mean_latency_ms: f64,
    pub total_calls: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_date() {
        let sample = MetricSample {
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            model: "Model A".to_string(),
            accuracy: 0.9,
            latency_ms: 100.0,
            calls: 500,
        };
        assert_eq!(sample.formatted_date(), "07/03/2024");
    }
}

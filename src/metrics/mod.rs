pub mod generator;

pub use generator::{MetricsCache, SAMPLE_COUNT, generate, generate_samples, summarize};

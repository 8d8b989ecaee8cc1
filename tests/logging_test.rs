/// Logging integration test
///
/// Runs in its own test binary because the global subscriber can only be installed once.
use ai_model_monitor::logging::{self, LogTarget};
use ai_model_monitor::metrics::generate_samples;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_file_target_receives_crate_events() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("logs").join("ai-model-monitor.log");

    logging::init(3, LogTarget::File(path.clone())).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    generate_samples(&mut StdRng::seed_from_u64(7), today);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Generated synthetic metric samples."));
    assert!(contents.contains("DEBUG"));
    // File output is plain text
    assert!(!contents.contains('\x1b'));

    // Installing a second subscriber is reported, not ignored
    assert!(logging::init(0, LogTarget::Stderr).is_err());
}

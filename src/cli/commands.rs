use std::fmt::Write as _;

use anyhow::Result;

use crate::config::AppConfig;
use crate::conversation::{ConversationManager, SubmitOutcome, usage_note};
use crate::metrics::{generate, summarize};
use crate::models::MetricSample;
use crate::utils::sanitize_for_terminal;

/// Print the synthetic series and its summary
pub fn show_metrics() -> Result<()> {
    print!("{}", format_metrics_report(generate()));
    Ok(())
}

/// Table of samples followed by the metric card values
pub fn format_metrics_report(samples: &[MetricSample]) -> String {
    let summary = summarize(samples);
    let mut out = String::new();

    let _ = writeln!(out, "AI Model Monitoring");
    let _ = writeln!(out, "===================");
    let _ = writeln!(
        out,
        "{:<12}{:<10}{:>10}{:>14}{:>8}",
        "Date", "Model", "Accuracy", "Latency (ms)", "Calls"
    );
    for sample in samples {
        let _ = writeln!(
            out,
            "{:<12}{:<10}{:>10.2}{:>14.1}{:>8}",
            sample.formatted_date(),
            sample.model,
            sample.accuracy,
            sample.latency_ms,
            sample.calls
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Average accuracy: {:.2}%", summary.mean_accuracy * 100.0);
    let _ = writeln!(out, "Average latency: {:.1} ms", summary.mean_latency_ms);
    let _ = writeln!(out, "Total calls: {}", summary.total_calls);

    out
}

/// One exchange with the assistant. Provider failures are printed, not returned.
pub fn ask(config: &AppConfig, question: &str) -> Result<()> {
    let mut manager = ConversationManager::with_model(config.client(), config.model.clone());

    match manager.submit(question) {
        None => println!("Nothing to submit"),
        Some(outcome) => print!("{}", format_outcome(&outcome)),
    }

    Ok(())
}

fn format_outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Success { text, total_tokens } => {
            format!("{}\n\n{}\n", sanitize_for_terminal(text), usage_note(*total_tokens))
        }
        SubmitOutcome::Failure { message } => format!("{}\n", sanitize_for_terminal(message)),
    }
}

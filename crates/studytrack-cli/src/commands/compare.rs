//! The `studytrack compare` command.

use std::path::PathBuf;

use anyhow::Result;

use studytrack_core::report::ProgressReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = ProgressReport::load_json(&baseline_path)?;
    let current = ProgressReport::load_json(&current_path)?;

    let comparison = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", comparison.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: overall {:+.1} points, {} regressions, {} improvements, {} unchanged",
                comparison.overall_delta,
                comparison.regressions.len(),
                comparison.improvements.len(),
                comparison.unchanged
            );

            if !comparison.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &comparison.regressions {
                    println!(
                        "  {} / {} {:.1}% -> {:.1}% ({:+.1})",
                        r.subject_id, r.chapter_name, r.baseline_score, r.current_score, r.delta
                    );
                }
            }

            if !comparison.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &comparison.improvements {
                    println!(
                        "  {} / {} {:.1}% -> {:.1}% ({:+.1})",
                        i.subject_id, i.chapter_name, i.baseline_score, i.current_score, i.delta
                    );
                }
            }

            if comparison.new_chapters > 0 {
                println!("\n{} new chapter(s)", comparison.new_chapters);
            }
            if comparison.removed_chapters > 0 {
                println!("{} removed chapter(s)", comparison.removed_chapters);
            }
        }
    }

    if fail_on_regression && comparison.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}

//! The `studytrack score` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use studytrack_core::parser::{load_catalog_or_builtin, validate_repository};
use studytrack_core::records::{CompletionIndex, StatusSnapshot};
use studytrack_core::report::ProgressReport;
use studytrack_core::traits::fetch_all;
use studytrack_core::ProgressEngine;
use studytrack_sources::config::load_settings_from;
use studytrack_sources::{load_completions, JsonFileSource};

pub async fn execute(
    records: Option<PathBuf>,
    completions: Option<PathBuf>,
    subjects: Option<String>,
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let settings = load_settings_from(config_path.as_deref())?;

    // Load and self-check the catalog
    let catalog_path = catalog.or_else(|| settings.catalog.clone());
    let repo = load_catalog_or_builtin(catalog_path.as_deref())?;
    for issue in validate_repository(&repo) {
        tracing::warn!("catalog issue in {}: {}", issue.location, issue.message);
    }
    let engine = ProgressEngine::new(Arc::new(repo));

    // Fetch status records
    let records_path = records.or_else(|| settings.records.clone()).ok_or_else(|| {
        anyhow::anyhow!("no records file given; pass --records or set `records` in studytrack.toml")
    })?;
    let source = JsonFileSource::open(&records_path).await?;
    let fetched = fetch_all(&source, settings.fetch_options()).await?;
    let fetched_count = fetched.len();
    let snapshot = StatusSnapshot::from_records(fetched, engine.repository().aliases());
    tracing::info!(
        "{} records fetched, {} current statuses",
        fetched_count,
        snapshot.len()
    );

    let completion_index = match completions.or_else(|| settings.completions.clone()) {
        Some(path) => CompletionIndex::from_records(load_completions(&path)?),
        None => CompletionIndex::default(),
    };

    // Resolve which subjects to report on
    let subject_ids: Vec<String> = if let Some(list) = &subjects {
        list.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else if !settings.tracked_subjects.is_empty() {
        settings.tracked_subjects.clone()
    } else {
        engine
            .repository()
            .subjects()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    };

    let report = engine.build_report(&subject_ids, &snapshot, &completion_index);
    anyhow::ensure!(
        !report.subjects.is_empty(),
        "none of the requested subjects are in the catalog: {}",
        subject_ids.join(", ")
    );

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if let Some(dir) = output.or_else(|| settings.output_dir.clone()) {
        let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("progress-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &ProgressReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Family", "Score", "Chapters", "All complete"]);

    for subject in &report.subjects {
        table.add_row(vec![
            Cell::new(&subject.name),
            Cell::new(subject.family),
            Cell::new(format!("{:.1}%", subject.score)),
            Cell::new(subject.chapters.len()),
            Cell::new(if subject.all_chapters_complete { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");

    for subject in &report.subjects {
        let mut chapters = Table::new();
        chapters.set_header(vec!["#", "Chapter", "Score", "Completed"]);
        for chapter in &subject.chapters {
            chapters.add_row(vec![
                Cell::new(chapter.id),
                Cell::new(&chapter.name),
                Cell::new(format!("{:.1}%", chapter.score)),
                Cell::new(if chapter.completed { "yes" } else { "" }),
            ]);
        }
        println!("\n{}\n{chapters}", subject.name);
    }

    println!("\nOverall: {:.1}%", report.overall);
}

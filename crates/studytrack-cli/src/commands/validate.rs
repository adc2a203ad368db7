//! The `studytrack validate` command.

use std::path::PathBuf;

use anyhow::Result;

use studytrack_core::parser::{load_catalog_or_builtin, validate_repository};

pub fn execute(catalog: Option<PathBuf>) -> Result<()> {
    let repo = load_catalog_or_builtin(catalog.as_deref())?;

    let source = catalog
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in catalog".to_string());
    println!(
        "Catalog: {} ({} subjects, {} aliases)",
        source,
        repo.subjects().len(),
        repo.aliases().len()
    );

    let issues = validate_repository(&repo);
    for issue in &issues {
        println!("  [{}] {}", issue.location, issue.message);
    }

    if issues.is_empty() {
        println!("Catalog valid.");
        Ok(())
    } else {
        anyhow::bail!("{} issue(s) found", issues.len())
    }
}

//! The `studytrack init` command.

use std::path::Path;

use anyhow::Result;

use studytrack_core::parser::export_catalog;
use studytrack_core::ConfigRepository;

pub fn execute() -> Result<()> {
    // Create studytrack.toml
    write_if_missing(Path::new("studytrack.toml"), SAMPLE_CONFIG)?;

    // Export the shipped tables as an editable catalog
    let catalog_path = Path::new("catalog.toml");
    if catalog_path.exists() {
        println!("catalog.toml already exists, skipping.");
    } else {
        let catalog = export_catalog(&ConfigRepository::builtin())?;
        std::fs::write(catalog_path, format!("{CATALOG_HEADER}{catalog}"))?;
        println!("Created catalog.toml");
    }

    // Create sample records
    std::fs::create_dir_all("records")?;
    write_if_missing(Path::new("records/sample.json"), SAMPLE_RECORDS)?;
    write_if_missing(Path::new("records/completions.json"), SAMPLE_COMPLETIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit studytrack.toml to pick your subjects");
    println!("  2. Run: studytrack validate --catalog catalog.toml");
    println!("  3. Run: studytrack score");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studytrack configuration

catalog = "catalog.toml"
records = "records/sample.json"
completions = "records/completions.json"

tracked_subjects = ["physics1st", "highermath1st", "english1st"]

page_size = 1000
max_records = 25000
# output_dir = "reports"
"#;

const CATALOG_HEADER: &str = "# studytrack catalog, exported from the built-in tables\n\n";

const SAMPLE_RECORDS: &str = r#"[
  {"subject_id": "physics1st", "chapter_id": 1, "activity": "Lecture", "status": "Done", "updated_at": "2026-03-02T09:00:00Z"},
  {"subject_id": "physics1st", "chapter_id": 1, "activity": "Notes", "status": "In Progress", "updated_at": "2026-03-02T10:00:00Z"},
  {"subject_id": "physics1st", "chapter_id": 2, "activity": "Typewise CQ", "status": "Done", "updated_at": "2026-03-03T18:30:00Z"},
  {"subject_id": "highermath1st", "chapter_id": 1, "activity": "Book Math", "status": "Done", "updated_at": "2026-03-04T08:15:00Z"},
  {"subject_id": "highermath1st", "chapter_id": 1, "activity": "Model Test", "status": "Not Started", "updated_at": "2026-03-04T08:20:00Z"},
  {"subject_id": "english1st", "chapter_id": 1, "activity": "Seen Passage", "status": "In Progress", "updated_at": "2026-03-05T20:00:00Z"}
]
"#;

const SAMPLE_COMPLETIONS: &str = r#"[
  {"subject_id": "physics1st", "chapter": "Physical World and Measurement", "completed": true}
]
"#;

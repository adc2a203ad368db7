//! The `studytrack subjects` command.

use std::path::PathBuf;

use anyhow::Result;

use studytrack_core::model::SubjectFamily;
use studytrack_core::parser::load_catalog_or_builtin;

pub fn execute(catalog: Option<PathBuf>, family_filter: Option<String>) -> Result<()> {
    let repo = load_catalog_or_builtin(catalog.as_deref())?;
    let family_filter: Option<SubjectFamily> = family_filter
        .map(|f| f.parse::<SubjectFamily>().map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()?;

    let mut found_any = false;

    for family in SubjectFamily::ALL {
        if family_filter.is_some_and(|f| f != family) {
            continue;
        }

        let config = repo.configs().get(family);
        let sections: Vec<String> = config
            .sections()
            .map(|(kind, section)| format!("{kind} {}", section.max))
            .collect();

        let subjects: Vec<_> = repo
            .subjects()
            .iter()
            .filter(|s| repo.family_of(&s.id) == family)
            .collect();

        println!("Family: {family} ({})", sections.join(" / "));
        let ids = repo.family_members(family);
        if !ids.is_empty() {
            println!("  ids: {}", ids.join(", "));
        }
        for subject in &subjects {
            found_any = true;
            println!(
                "  {} - {} ({} chapters, {} activities)",
                subject.id,
                subject.name,
                subject.chapters.len(),
                subject.activities.len(),
            );
        }
        println!();
    }

    if !found_any {
        println!("No subjects in catalog. Run `studytrack init` to write an editable catalog.");
    }

    Ok(())
}

//! TOML catalog parser and configuration self-check.
//!
//! Loads an alternate [`ConfigRepository`] from a TOML file, exports one back
//! to TOML, and checks a repository for authoring defects.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::activities_for;
use crate::config::{ConfigRepository, WeightConfigs};
use crate::model::{ChapterTemplate, SectionKind, SubjectConfig, SubjectData, SubjectFamily};
use crate::normalize::AliasTable;

/// Tolerance for comparing authored point totals.
const EPSILON: f64 = 1e-6;

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize, Serialize)]
struct TomlCatalog {
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default)]
    families: TomlFamilies,
    configs: TomlConfigs,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct TomlFamilies {
    #[serde(default)]
    math: Vec<String>,
    #[serde(default)]
    language_reading: Vec<String>,
    #[serde(default)]
    language_writing: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TomlConfigs {
    science: SubjectConfig,
    math: SubjectConfig,
    language_reading: SubjectConfig,
    language_writing: SubjectConfig,
}

#[derive(Debug, Deserialize, Serialize)]
struct TomlSubject {
    id: String,
    name: String,
    /// Defaults to every activity the subject's config weighs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    activities: Option<Vec<String>>,
    #[serde(default)]
    chapters: Vec<TomlChapter>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TomlChapter {
    /// Defaults to the chapter's 1-based position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    name: String,
}

/// Parse a catalog file into a [`ConfigRepository`].
pub fn parse_catalog(path: &Path) -> Result<ConfigRepository> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a [`ConfigRepository`] (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<ConfigRepository> {
    let parsed: TomlCatalog = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let family_lists = [
        (SubjectFamily::Math, parsed.families.math),
        (SubjectFamily::LanguageReading, parsed.families.language_reading),
        (SubjectFamily::LanguageWriting, parsed.families.language_writing),
    ];

    let mut assigned: BTreeMap<&str, SubjectFamily> = BTreeMap::new();
    for (family, ids) in &family_lists {
        for id in ids {
            if let Some(previous) = assigned.insert(id.as_str(), *family) {
                anyhow::bail!(
                    "{}: subject '{}' is listed under both {} and {}",
                    source_path.display(),
                    id,
                    previous,
                    family
                );
            }
        }
    }

    let configs = WeightConfigs {
        science: parsed.configs.science,
        math: parsed.configs.math,
        language_reading: parsed.configs.language_reading,
        language_writing: parsed.configs.language_writing,
    };

    let subjects = parsed
        .subjects
        .into_iter()
        .map(|s| {
            let family = assigned
                .get(s.id.as_str())
                .copied()
                .unwrap_or(SubjectFamily::Science);
            let activities = s
                .activities
                .unwrap_or_else(|| activities_for(configs.get(family)));
            let chapters = s
                .chapters
                .into_iter()
                .enumerate()
                .map(|(i, c)| ChapterTemplate {
                    id: c.id.unwrap_or(i as u32 + 1),
                    name: c.name,
                })
                .collect();
            SubjectData {
                id: s.id,
                name: s.name,
                activities,
                chapters,
            }
        })
        .collect();

    Ok(ConfigRepository::new(
        parsed.aliases.into_iter().collect::<AliasTable>(),
        family_lists,
        configs,
        subjects,
    ))
}

/// Load a catalog file, or the shipped tables when no path is given.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> Result<ConfigRepository> {
    match path {
        Some(p) => parse_catalog(p),
        None => Ok(ConfigRepository::builtin()),
    }
}

/// Render a repository as a catalog TOML document.
pub fn export_catalog(repo: &ConfigRepository) -> Result<String> {
    let members = |family: SubjectFamily| -> Vec<String> {
        repo.family_members(family)
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    let configs = repo.configs();
    let catalog = TomlCatalog {
        aliases: repo
            .aliases()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        families: TomlFamilies {
            math: members(SubjectFamily::Math),
            language_reading: members(SubjectFamily::LanguageReading),
            language_writing: members(SubjectFamily::LanguageWriting),
        },
        configs: TomlConfigs {
            science: configs.science.clone(),
            math: configs.math.clone(),
            language_reading: configs.language_reading.clone(),
            language_writing: configs.language_writing.clone(),
        },
        subjects: repo
            .subjects()
            .iter()
            .map(|s| TomlSubject {
                id: s.id.clone(),
                name: s.name.clone(),
                activities: Some(s.activities.clone()),
                chapters: s
                    .chapters
                    .iter()
                    .map(|c| TomlChapter {
                        id: Some(c.id),
                        name: c.name.clone(),
                    })
                    .collect(),
            })
            .collect(),
    };

    toml::to_string_pretty(&catalog).context("failed to serialize catalog")
}

/// A defect found by [`validate_repository`].
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    /// Where the defect is (e.g. "science.cq", "subject physics1st").
    pub location: String,
    /// Issue message.
    pub message: String,
}

fn issue(location: impl Into<String>, message: impl Into<String>) -> ConfigIssue {
    ConfigIssue {
        location: location.into(),
        message: message.into(),
    }
}

/// True when two authored totals differ, or either is not a finite number.
fn differs(actual: f64, expected: f64) -> bool {
    let diff = (actual - expected).abs();
    !diff.is_finite() || diff > EPSILON
}

/// Check a repository for authoring defects. Run at startup or in tests;
/// scoring tolerates these defects by clamping but cannot correct them.
pub fn validate_repository(repo: &ConfigRepository) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for (family, config) in repo.configs().iter() {
        let total = config.total_max();
        if differs(total, 100.0) {
            issues.push(issue(
                family.to_string(),
                format!("section maxes sum to {total}, expected 100"),
            ));
        }

        if config.final_exam.is_some() && family != SubjectFamily::Math {
            issues.push(issue(
                format!("{family}.{}", SectionKind::Final),
                "final section is only allowed for math subjects",
            ));
        }

        for (kind, section) in config.sections() {
            let location = format!("{family}.{kind}");
            if !section.max.is_finite() || section.max <= 0.0 {
                issues.push(issue(&location, format!("max must be positive, got {}", section.max)));
            }
            if let Some(internal_max) = section.internal_max {
                if !internal_max.is_finite() || internal_max <= 0.0 {
                    issues.push(issue(
                        &location,
                        format!("internal_max must be positive, got {internal_max}"),
                    ));
                }
            }
            if section.activities.values().any(|w| !w.is_finite() || *w < 0.0) {
                issues.push(issue(&location, "activity weights must be finite and not negative"));
            }
            let sum = section.weight_sum();
            let denominator = section.denominator();
            if differs(sum, denominator) {
                issues.push(issue(
                    &location,
                    format!("activity weights sum to {sum}, expected {denominator}"),
                ));
            }
        }
    }

    for (alias, canonical) in repo.aliases().chained() {
        issues.push(issue(
            "aliases",
            format!("'{alias}' maps to '{canonical}', which is itself an alias"),
        ));
    }

    let mut seen_subjects = HashSet::new();
    for subject in repo.subjects() {
        let location = format!("subject {}", subject.id);
        if !seen_subjects.insert(subject.id.as_str()) {
            issues.push(issue(&location, "duplicate subject id"));
        }

        let config = repo.resolve_config(&subject.id);
        for activity in &subject.activities {
            if !config.weighs(activity) {
                issues.push(issue(
                    &location,
                    format!(
                        "activity '{activity}' has no weight in the {} config",
                        repo.family_of(&subject.id)
                    ),
                ));
            }
        }

        let mut seen_chapters = HashSet::new();
        for chapter in &subject.chapters {
            if !seen_chapters.insert(chapter.id) {
                issues.push(issue(
                    &location,
                    format!("duplicate chapter id {} ('{}')", chapter.id, chapter.name),
                ));
            }
        }
    }

    issues
}

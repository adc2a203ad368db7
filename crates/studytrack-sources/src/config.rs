//! `studytrack.toml` settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studytrack_core::traits::{FetchOptions, DEFAULT_MAX_RECORDS, DEFAULT_PAGE_SIZE};

use crate::error::SettingsError;

/// Top-level studytrack settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudytrackSettings {
    /// Catalog TOML replacing the shipped tables.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// JSON export of activity status records.
    #[serde(default)]
    pub records: Option<PathBuf>,
    /// JSON export of chapter completion flags.
    #[serde(default)]
    pub completions: Option<PathBuf>,
    /// Subjects included in the overall figure. Empty means every catalog subject.
    #[serde(default)]
    pub tracked_subjects: Vec<String>,
    /// Records requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Hard cap on records fetched.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    /// Where reports are written. Reports are only saved when set.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

impl Default for StudytrackSettings {
    fn default() -> Self {
        Self {
            catalog: None,
            records: None,
            completions: None,
            tracked_subjects: Vec::new(),
            page_size: default_page_size(),
            max_records: default_max_records(),
            output_dir: None,
        }
    }
}

impl StudytrackSettings {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            page_size: self.page_size,
            max_records: self.max_records,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.page_size == 0 {
            return Err(SettingsError::ZeroPageSize);
        }
        if self.max_records < self.page_size {
            return Err(SettingsError::CapBelowPageSize {
                page_size: self.page_size,
                max_records: self.max_records,
            });
        }
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load settings from well-known paths.
///
/// Search order:
/// 1. `studytrack.toml` in the current directory
/// 2. `~/.config/studytrack/config.toml`
///
/// Environment variable override: `STUDYTRACK_RECORDS`.
pub fn load_settings() -> Result<StudytrackSettings> {
    load_settings_from(None)
}

/// Load settings from an explicit path, or search the default locations.
pub fn load_settings_from(path: Option<&Path>) -> Result<StudytrackSettings> {
    let settings_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            return Err(SettingsError::NotFound(p.to_path_buf()).into());
        }
    } else {
        let local = PathBuf::from("studytrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut settings = match settings_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudytrackSettings>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudytrackSettings::default(),
    };

    if let Ok(records) = std::env::var("STUDYTRACK_RECORDS") {
        settings.records = Some(PathBuf::from(records));
    }

    settings.catalog = settings.catalog.as_deref().map(resolve_path);
    settings.records = settings.records.as_deref().map(resolve_path);
    settings.completions = settings.completions.as_deref().map(resolve_path);
    settings.output_dir = settings.output_dir.as_deref().map(resolve_path);

    settings.validate()?;
    Ok(settings)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studytrack"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_STUDYTRACK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_STUDYTRACK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_STUDYTRACK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("unterminated ${VAR"), "unterminated ${VAR");
        std::env::remove_var("_STUDYTRACK_TEST_VAR");
    }

    #[test]
    fn default_settings() {
        let settings = StudytrackSettings::default();
        assert_eq!(settings.page_size, 1000);
        assert_eq!(settings.max_records, 25_000);
        assert!(settings.tracked_subjects.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parse_settings_file() {
        let toml_str = r#"
catalog = "catalog.toml"
records = "records/latest.json"
tracked_subjects = ["physics1st", "highermath1st"]
page_size = 500
"#;
        let settings: StudytrackSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.catalog, Some(PathBuf::from("catalog.toml")));
        assert_eq!(settings.tracked_subjects.len(), 2);
        assert_eq!(settings.fetch_options().page_size, 500);
        assert_eq!(settings.fetch_options().max_records, 25_000);
    }

    #[test]
    fn rejects_unusable_paging() {
        let zero = StudytrackSettings {
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(SettingsError::ZeroPageSize)));

        let capped = StudytrackSettings {
            page_size: 1000,
            max_records: 10,
            ..Default::default()
        };
        assert!(matches!(
            capped.validate(),
            Err(SettingsError::CapBelowPageSize { .. })
        ));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_settings_from(Some(Path::new("/nonexistent/studytrack.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studytrack.toml");
        std::fs::write(&path, "output_dir = \"out\"\nmax_records = 5000\n").unwrap();

        let settings = load_settings_from(Some(&path)).unwrap();
        assert_eq!(settings.output_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.max_records, 5000);
    }
}

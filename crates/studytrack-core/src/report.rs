//! Progress report types with JSON persistence and change detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::SubjectFamily;
use crate::scoring::SectionScore;

/// A complete progress report across the tracked subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Per-subject progress, in the order subjects were requested.
    pub subjects: Vec<SubjectProgress>,
    /// Unweighted mean of the subject scores.
    pub overall: f64,
}

/// Progress for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub id: String,
    pub name: String,
    pub family: SubjectFamily,
    /// Mean chapter score, 0-100.
    pub score: f64,
    /// Every chapter carries an explicit "completed" mark.
    pub all_chapters_complete: bool,
    pub chapters: Vec<ChapterProgress>,
}

/// Progress for one chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub id: u32,
    pub name: String,
    /// Chapter score, 0-100.
    pub score: f64,
    pub sections: Vec<SectionScore>,
    pub completed: bool,
}

impl ProgressReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ProgressReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    pub fn subject(&self, id: &str) -> Option<&SubjectProgress> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Compare this report against an earlier one, chapter by chapter.
    ///
    /// `threshold` is in percentage points; smaller moves count as unchanged.
    pub fn compare(&self, baseline: &ProgressReport, threshold: f64) -> ProgressComparison {
        let score_map = |report: &ProgressReport| -> HashMap<(String, u32), (String, f64)> {
            report
                .subjects
                .iter()
                .flat_map(|s| {
                    s.chapters
                        .iter()
                        .map(move |c| ((s.id.clone(), c.id), (c.name.clone(), c.score)))
                })
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_chapters = 0usize;

        for (key, (name, current)) in &current_scores {
            if let Some((_, baseline_val)) = baseline_scores.get(key) {
                let delta = current - baseline_val;
                let change = ChapterChange {
                    subject_id: key.0.clone(),
                    chapter_id: key.1,
                    chapter_name: name.clone(),
                    baseline_score: *baseline_val,
                    current_score: *current,
                    delta,
                };
                if delta < -threshold {
                    regressions.push(change);
                } else if delta > threshold {
                    improvements.push(change);
                } else {
                    unchanged += 1;
                }
            } else {
                new_chapters += 1;
            }
        }

        let removed_chapters = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(k))
            .count();

        let order = |a: &ChapterChange, b: &ChapterChange| {
            (&a.subject_id, a.chapter_id).cmp(&(&b.subject_id, b.chapter_id))
        };
        regressions.sort_by(order);
        improvements.sort_by(order);

        ProgressComparison {
            regressions,
            improvements,
            unchanged,
            new_chapters,
            removed_chapters,
            overall_delta: self.overall - baseline.overall,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressComparison {
    /// Chapters whose score went down.
    pub regressions: Vec<ChapterChange>,
    /// Chapters whose score went up.
    pub improvements: Vec<ChapterChange>,
    /// Chapters with no significant change.
    pub unchanged: usize,
    /// Chapters in current but not baseline.
    pub new_chapters: usize,
    /// Chapters in baseline but not current.
    pub removed_chapters: usize,
    /// Change in the overall figure.
    pub overall_delta: f64,
}

/// A chapter score that moved between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterChange {
    pub subject_id: String,
    pub chapter_id: u32,
    pub chapter_name: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl ProgressComparison {
    /// Returns true if any chapter lost ground.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }

    /// Render as a Markdown summary.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("## studytrack progress comparison\n\n");
        md.push_str(&format!(
            "**Overall:** {:+.1} points | **Regressions:** {} | **Improvements:** {} | **Unchanged:** {}\n\n",
            self.overall_delta,
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str("| Subject | Chapter | Before | After | Delta |\n");
            md.push_str("|---------|---------|--------|-------|-------|\n");
            for r in &self.regressions {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {:.1}% | {:+.1} |\n",
                    r.subject_id, r.chapter_name, r.baseline_score, r.current_score, r.delta
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Subject | Chapter | Before | After | Delta |\n");
            md.push_str("|---------|---------|--------|-------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {:.1}% | {:+.1} |\n",
                    i.subject_id, i.chapter_name, i.baseline_score, i.current_score, i.delta
                ));
            }
            md.push('\n');
        }

        md
    }
}

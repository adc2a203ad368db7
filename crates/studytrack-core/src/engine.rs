//! The progress scoring engine.
//!
//! Wraps a shared [`ConfigRepository`] and exposes the scoring operations at
//! chapter, subject, and overall granularity. Every call is pure: the engine
//! holds no mutable state and can be shared across threads.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::ConfigRepository;
use crate::model::{Chapter, SectionConfig, SubjectConfig, SubjectData};
use crate::records::{CompletionIndex, StatusSnapshot};
use crate::report::{ChapterProgress, ProgressReport, SubjectProgress};
use crate::scoring::{self, ChapterBreakdown, StatusMap};
use crate::statistics::{self, CompletionMap};

/// The central scoring engine.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    repo: Arc<ConfigRepository>,
}

impl ProgressEngine {
    pub fn new(repo: Arc<ConfigRepository>) -> Self {
        Self { repo }
    }

    /// An engine over the shipped tables.
    pub fn builtin() -> Self {
        Self::new(Arc::new(ConfigRepository::builtin()))
    }

    pub fn repository(&self) -> &ConfigRepository {
        &self.repo
    }

    pub fn normalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.repo.aliases().normalize(name)
    }

    pub fn resolve_config(&self, subject_id: &str) -> &SubjectConfig {
        self.repo.resolve_config(subject_id)
    }

    pub fn score_section(&self, section: &SectionConfig, activities: &StatusMap) -> f64 {
        scoring::score_section(section, activities)
    }

    pub fn score_chapter(&self, config: &SubjectConfig, chapter: &Chapter) -> f64 {
        scoring::score_chapter(config, chapter, self.repo.aliases())
    }

    pub fn chapter_breakdown(&self, config: &SubjectConfig, chapter: &Chapter) -> ChapterBreakdown {
        scoring::chapter_breakdown(config, chapter, self.repo.aliases())
    }

    pub fn score_subject(&self, config: &SubjectConfig, chapters: &[Chapter]) -> f64 {
        statistics::score_subject(config, chapters, self.repo.aliases())
    }

    pub fn all_chapters_complete<S: AsRef<str>>(
        &self,
        completions: &CompletionMap,
        chapter_names: &[S],
    ) -> bool {
        statistics::all_chapters_complete(completions, chapter_names)
    }

    pub fn score_overall(&self, subject_scores: &[f64]) -> f64 {
        statistics::score_overall(subject_scores)
    }

    /// Score every chapter of a catalog subject from a status snapshot.
    pub fn subject_progress(
        &self,
        subject: &SubjectData,
        snapshot: &StatusSnapshot,
        completions: &CompletionIndex,
    ) -> SubjectProgress {
        let config = self.resolve_config(&subject.id);
        let chapters = snapshot.chapters_for(subject);

        let rows: Vec<ChapterProgress> = chapters
            .iter()
            .map(|chapter| {
                let breakdown = self.chapter_breakdown(config, chapter);
                ChapterProgress {
                    id: chapter.id,
                    name: chapter.name.clone(),
                    score: breakdown.total,
                    sections: breakdown.sections,
                    completed: completions.is_completed(&subject.id, &chapter.name),
                }
            })
            .collect();

        let chapter_scores: Vec<f64> = rows.iter().map(|c| c.score).collect();
        let empty = CompletionMap::new();
        let subject_completions = completions.subject(&subject.id).unwrap_or(&empty);

        SubjectProgress {
            id: subject.id.clone(),
            name: subject.name.clone(),
            family: self.repo.family_of(&subject.id),
            score: statistics::mean(&chapter_scores),
            all_chapters_complete: self
                .all_chapters_complete(subject_completions, &subject.chapter_names()),
            chapters: rows,
        }
    }

    /// Build a report for the given subject ids.
    ///
    /// Ids missing from the catalog have no chapter templates and are skipped.
    pub fn build_report<S: AsRef<str>>(
        &self,
        subject_ids: &[S],
        snapshot: &StatusSnapshot,
        completions: &CompletionIndex,
    ) -> ProgressReport {
        let subjects: Vec<SubjectProgress> = subject_ids
            .iter()
            .filter_map(|id| {
                let subject = self.repo.subject(id.as_ref());
                if subject.is_none() {
                    tracing::warn!("subject '{}' is not in the catalog, skipping", id.as_ref());
                }
                subject
            })
            .map(|subject| self.subject_progress(subject, snapshot, completions))
            .collect();

        let scores: Vec<f64> = subjects.iter().map(|s| s.score).collect();

        ProgressReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            overall: self.score_overall(&scores),
            subjects,
        }
    }
}

//! Subject and overall aggregation.

use std::collections::HashMap;

use crate::model::{Chapter, SubjectConfig};
use crate::normalize::AliasTable;
use crate::scoring::score_chapter;

/// Chapter name to "completed" flag for one subject.
///
/// Completion is an explicit milestone recorded separately from activity
/// statuses; a chapter can score 100 without being marked completed.
pub type CompletionMap = HashMap<String, bool>;

/// Arithmetic mean, or 0 for an empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean chapter score for a subject. No chapters scores 0.
pub fn score_subject(config: &SubjectConfig, chapters: &[Chapter], aliases: &AliasTable) -> f64 {
    let scores: Vec<f64> = chapters
        .iter()
        .map(|chapter| score_chapter(config, chapter, aliases))
        .collect();
    mean(&scores)
}

/// True iff every named chapter has a recorded completed flag set to true.
/// Chapters with no recorded flag count as not completed.
pub fn all_chapters_complete<S: AsRef<str>>(completions: &CompletionMap, chapter_names: &[S]) -> bool {
    chapter_names
        .iter()
        .all(|name| completions.get(name.as_ref()).copied().unwrap_or(false))
}

/// Unweighted mean across the subjects a user tracks.
pub fn score_overall(subject_scores: &[f64]) -> f64 {
    mean(subject_scores)
}

//! Section and chapter scoring.
//!
//! A chapter's percentage is the sum of its section contributions; each
//! section is clamped to its own max so the total stays within [0, 100]
//! whenever the config's section maxes sum to 100.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Chapter, SectionConfig, SectionKind, Status, SubjectConfig};
use crate::normalize::AliasTable;

/// Canonical activity name to status, for one chapter.
pub type StatusMap = HashMap<String, Status>;

/// Score one section. `activities` must already be keyed by canonical name;
/// activities missing from the map count as not started.
pub fn score_section(section: &SectionConfig, activities: &StatusMap) -> f64 {
    let raw: f64 = section
        .activities
        .iter()
        .map(|(name, weight)| {
            let status = activities.get(name).copied().unwrap_or(Status::NotStarted);
            weight * status.value()
        })
        .sum();

    let scaled = match section.internal_max {
        Some(internal_max) if internal_max > 0.0 => raw * (section.max / internal_max),
        Some(_) => 0.0,
        None => raw,
    };

    if !scaled.is_finite() || !section.max.is_finite() {
        return 0.0;
    }
    scaled.clamp(0.0, section.max.max(0.0))
}

/// Key a chapter's activities by canonical name.
///
/// When two stored names normalize to the same canonical name, the first
/// occurrence wins.
pub fn status_map(chapter: &Chapter, aliases: &AliasTable) -> StatusMap {
    let mut map = StatusMap::with_capacity(chapter.activities.len());
    for activity in &chapter.activities {
        map.entry(aliases.normalize(&activity.name).to_string())
            .or_insert(activity.status);
    }
    map
}

/// Score a chapter against a subject config.
pub fn score_chapter(config: &SubjectConfig, chapter: &Chapter, aliases: &AliasTable) -> f64 {
    let statuses = status_map(chapter, aliases);
    config
        .sections()
        .map(|(_, section)| score_section(section, &statuses))
        .sum()
}

/// One section's contribution to a chapter score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub kind: SectionKind,
    pub score: f64,
    pub max: f64,
}

/// A chapter score with its per-section contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterBreakdown {
    pub chapter_id: u32,
    pub chapter_name: String,
    pub sections: Vec<SectionScore>,
    pub total: f64,
}

/// Like [`score_chapter`] but keeps each section's contribution.
pub fn chapter_breakdown(
    config: &SubjectConfig,
    chapter: &Chapter,
    aliases: &AliasTable,
) -> ChapterBreakdown {
    let statuses = status_map(chapter, aliases);
    let sections: Vec<SectionScore> = config
        .sections()
        .map(|(kind, section)| SectionScore {
            kind,
            score: score_section(section, &statuses),
            max: section.max,
        })
        .collect();
    let total = sections.iter().map(|s| s.score).sum();

    ChapterBreakdown {
        chapter_id: chapter.id,
        chapter_name: chapter.name.clone(),
        sections,
        total,
    }
}

//! Status record ingestion.
//!
//! The data layer hands over raw rows, newest first, possibly with several
//! historical rows per activity. This module reduces them to one status per
//! (subject, chapter, activity) and groups them into chapter snapshots.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Activity, Chapter, Status, SubjectData};
use crate::normalize::AliasTable;
use crate::statistics::CompletionMap;

/// One stored activity status row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub subject_id: String,
    pub chapter_id: u32,
    /// Activity name as stored; may be a retired alias.
    pub activity: String,
    #[serde(default)]
    pub status: Status,
    pub updated_at: DateTime<Utc>,
}

/// Order records most-recently-updated first. Stable for equal timestamps.
pub fn sort_newest_first(records: &mut [StatusRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Keep the first row per (subject, chapter, canonical activity).
///
/// Input is expected newest first, so the first row is the current status.
/// Keys use the canonical name so a row stored under a retired name cannot
/// shadow a newer row stored under the current one.
pub fn dedup_latest(records: Vec<StatusRecord>, aliases: &AliasTable) -> Vec<StatusRecord> {
    let mut seen: HashSet<(String, u32, String)> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| {
            seen.insert((
                r.subject_id.clone(),
                r.chapter_id,
                aliases.normalize(&r.activity).to_string(),
            ))
        })
        .collect()
}

/// Current activity statuses, grouped by subject and chapter.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    subjects: HashMap<String, BTreeMap<u32, Vec<Activity>>>,
}

impl StatusSnapshot {
    /// Order `records` newest first, deduplicate, and group them.
    pub fn from_records(mut records: Vec<StatusRecord>, aliases: &AliasTable) -> Self {
        sort_newest_first(&mut records);
        let mut subjects: HashMap<String, BTreeMap<u32, Vec<Activity>>> = HashMap::new();
        for record in dedup_latest(records, aliases) {
            subjects
                .entry(record.subject_id)
                .or_default()
                .entry(record.chapter_id)
                .or_default()
                .push(Activity::new(record.activity, record.status));
        }
        Self { subjects }
    }

    /// Subject ids with at least one recorded status, sorted.
    pub fn subject_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.subjects.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of activity statuses held.
    pub fn len(&self) -> usize {
        self.subjects
            .values()
            .flat_map(|chapters| chapters.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand a subject's chapter templates with recorded activities.
    ///
    /// Chapters with nothing recorded come back empty. Recorded chapters that
    /// are not in the template are dropped.
    pub fn chapters_for(&self, subject: &SubjectData) -> Vec<Chapter> {
        let recorded = self.subjects.get(&subject.id);

        if let Some(recorded) = recorded {
            for chapter_id in recorded.keys() {
                if !subject.chapters.iter().any(|c| c.id == *chapter_id) {
                    tracing::debug!(
                        "dropping statuses for unknown chapter {} of {}",
                        chapter_id,
                        subject.id
                    );
                }
            }
        }

        subject
            .chapters
            .iter()
            .map(|template| Chapter {
                id: template.id,
                name: template.name.clone(),
                activities: recorded
                    .and_then(|chapters| chapters.get(&template.id))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// A "chapter completed" flag from the completion tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCompletion {
    pub subject_id: String,
    /// Chapter name, as in the subject catalog.
    pub chapter: String,
    pub completed: bool,
}

/// Completion flags grouped by subject. Later entries override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    subjects: HashMap<String, CompletionMap>,
}

impl CompletionIndex {
    pub fn from_records(records: impl IntoIterator<Item = ChapterCompletion>) -> Self {
        let mut subjects: HashMap<String, CompletionMap> = HashMap::new();
        for record in records {
            subjects
                .entry(record.subject_id)
                .or_default()
                .insert(record.chapter, record.completed);
        }
        Self { subjects }
    }

    pub fn subject(&self, subject_id: &str) -> Option<&CompletionMap> {
        self.subjects.get(subject_id)
    }

    pub fn is_completed(&self, subject_id: &str, chapter: &str) -> bool {
        self.subject(subject_id)
            .and_then(|chapters| chapters.get(chapter))
            .copied()
            .unwrap_or(false)
    }
}

//! Core data model types for studytrack.
//!
//! These are the fundamental types the scoring engine consumes: activity
//! statuses, chapters, weighted sections, and subject catalogs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion state of a single activity.
///
/// `Empty` and `NotStarted` both earn no credit; the difference only matters
/// to the UI (a blank cell vs an explicit "not started").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    /// Credit earned towards an activity's weight.
    pub fn value(self) -> f64 {
        match self {
            Status::Done => 1.0,
            Status::InProgress => 0.5,
            Status::NotStarted | Status::Empty => 0.0,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Empty => write!(f, ""),
            Status::NotStarted => write!(f, "Not Started"),
            Status::InProgress => write!(f, "In Progress"),
            Status::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "" => Ok(Status::Empty),
            "notstarted" => Ok(Status::NotStarted),
            "inprogress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            _ => Err(format!("unknown status: '{s}'")),
        }
    }
}

/// A gradable task within a chapter, as stored by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity name. May be a retired alias of a canonical name.
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: Status,
}

impl Activity {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// A graded unit within a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter number within the subject.
    pub id: u32,
    /// Human-readable chapter title.
    pub name: String,
    /// Recorded activities, in display order. Shape may vary per chapter.
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Chapter {
    /// A chapter with nothing recorded yet.
    pub fn empty(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            activities: Vec::new(),
        }
    }
}

/// One weighted section of a grading scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Points this section contributes out of the chapter's 100.
    pub max: f64,
    /// Denominator the weights were authored against, when it differs from `max`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_max: Option<f64>,
    /// Canonical activity name to point weight.
    #[serde(default)]
    pub activities: BTreeMap<String, f64>,
}

impl SectionConfig {
    pub fn new<'a>(max: f64, weights: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            max,
            internal_max: None,
            activities: weights
                .into_iter()
                .map(|(name, weight)| (name.to_string(), weight))
                .collect(),
        }
    }

    /// Author weights on a different scale and rescale into `max`.
    pub fn with_internal_max(mut self, internal_max: f64) -> Self {
        self.internal_max = Some(internal_max);
        self
    }

    /// The value the weights are expected to sum to.
    pub fn denominator(&self) -> f64 {
        self.internal_max.unwrap_or(self.max)
    }

    pub fn weight_sum(&self) -> f64 {
        self.activities.values().sum()
    }
}

/// Named section slots of a grading scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Core,
    Mcq,
    Cq,
    Final,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Core => write!(f, "core"),
            SectionKind::Mcq => write!(f, "mcq"),
            SectionKind::Cq => write!(f, "cq"),
            SectionKind::Final => write!(f, "final"),
        }
    }
}

/// A subject's grading scheme: fixed sections whose maxes sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectConfig {
    pub core: SectionConfig,
    pub mcq: SectionConfig,
    pub cq: SectionConfig,
    /// Only present for math-type subjects.
    #[serde(default, rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_exam: Option<SectionConfig>,
}

impl SubjectConfig {
    /// Sections present in this config, in scoring order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &SectionConfig)> {
        [
            (SectionKind::Core, Some(&self.core)),
            (SectionKind::Mcq, Some(&self.mcq)),
            (SectionKind::Cq, Some(&self.cq)),
            (SectionKind::Final, self.final_exam.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, section)| section.map(|s| (kind, s)))
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionConfig> {
        match kind {
            SectionKind::Core => Some(&self.core),
            SectionKind::Mcq => Some(&self.mcq),
            SectionKind::Cq => Some(&self.cq),
            SectionKind::Final => self.final_exam.as_ref(),
        }
    }

    pub fn total_max(&self) -> f64 {
        self.sections().map(|(_, s)| s.max).sum()
    }

    /// Whether any section carries a weight for `activity`.
    pub fn weighs(&self, activity: &str) -> bool {
        self.sections()
            .any(|(_, s)| s.activities.contains_key(activity))
    }
}

/// Grading scheme family a subject belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SubjectFamily {
    #[default]
    Science,
    Math,
    LanguageReading,
    LanguageWriting,
}

impl SubjectFamily {
    pub const ALL: [SubjectFamily; 4] = [
        SubjectFamily::Science,
        SubjectFamily::Math,
        SubjectFamily::LanguageReading,
        SubjectFamily::LanguageWriting,
    ];
}

impl fmt::Display for SubjectFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectFamily::Science => write!(f, "science"),
            SubjectFamily::Math => write!(f, "math"),
            SubjectFamily::LanguageReading => write!(f, "language_reading"),
            SubjectFamily::LanguageWriting => write!(f, "language_writing"),
        }
    }
}

impl FromStr for SubjectFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "science" => Ok(SubjectFamily::Science),
            "math" => Ok(SubjectFamily::Math),
            "language_reading" | "reading" => Ok(SubjectFamily::LanguageReading),
            "language_writing" | "writing" => Ok(SubjectFamily::LanguageWriting),
            _ => Err(format!("unsupported subject family: {s}")),
        }
    }
}

/// A chapter template in the subject catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterTemplate {
    pub id: u32,
    pub name: String,
}

/// A subject in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectData {
    /// Stable identifier, also the key for config resolution (e.g. "physics1st").
    pub id: String,
    /// Display name (e.g. "Physics 1st Paper").
    pub name: String,
    /// Canonical activity names tracked for every chapter of this subject.
    pub activities: Vec<String>,
    /// Chapter templates, in syllabus order.
    pub chapters: Vec<ChapterTemplate>,
}

impl SubjectData {
    pub fn chapter_names(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.name.as_str()).collect()
    }
}

//! Shipped seed data: aliases, family lists, grading schemes, and subjects.

use crate::config::{ConfigRepository, WeightConfigs};
use crate::model::{ChapterTemplate, SectionConfig, SubjectConfig, SubjectData, SubjectFamily};
use crate::normalize::AliasTable;

const ALIASES: &[(&str, &str)] = &[
    ("Typewise CQ", "Written CQ"),
    ("Lecture Video", "Lecture"),
    ("Class Notes", "Notes"),
    ("Note Taking", "Notes"),
    ("MCQ Solve", "MCQ Practice"),
    ("Topicwise MCQ", "MCQ Practice"),
    ("MCQ Note", "MCQ Summary"),
    ("CQ Note", "CQ Summary"),
    ("Chapter Test", "Chapter Exam"),
    ("Book Math", "Book Examples"),
    ("Exercise Math", "Exercise"),
    ("Model Test", "Final Exam"),
    ("Information Transfer", "Info Transfer"),
    ("Seen Passage", "Seen Comprehension"),
    ("Unseen Passage", "Unseen Comprehension"),
    ("Summary", "Summary Writing"),
    ("Cloze", "Cloze Test"),
    ("Grammar", "Grammar Practice"),
    ("Formal Letter", "Letter Writing"),
    ("Email", "Email Writing"),
    ("Completing Story", "Story Writing"),
];

const MATH_SUBJECTS: &[&str] = &["highermath", "highermath1st", "highermath2nd", "generalmath"];
const READING_SUBJECTS: &[&str] = &["english1st", "bangla1st"];
const WRITING_SUBJECTS: &[&str] = &["english2nd", "bangla2nd"];

fn science_config() -> SubjectConfig {
    SubjectConfig {
        core: SectionConfig::new(30.0, [("Lecture", 15.0), ("Notes", 15.0)]),
        mcq: SectionConfig::new(20.0, [("MCQ Practice", 10.0), ("MCQ Summary", 10.0)]),
        // TODO: confirm with the curriculum team whether CQ should be capped at 35
        // via internal_max; it currently counts for the full 50.
        cq: SectionConfig::new(
            50.0,
            [("Written CQ", 20.0), ("CQ Summary", 15.0), ("Chapter Exam", 15.0)],
        ),
        final_exam: None,
    }
}

fn math_config() -> SubjectConfig {
    SubjectConfig {
        core: SectionConfig::new(
            30.0,
            [("Lecture", 10.0), ("Notes", 10.0), ("Book Examples", 10.0)],
        ),
        mcq: SectionConfig::new(20.0, [("MCQ Practice", 10.0), ("MCQ Summary", 10.0)]),
        cq: SectionConfig::new(40.0, [("Exercise", 20.0), ("Written CQ", 20.0)]),
        final_exam: Some(SectionConfig::new(10.0, [("Final Exam", 10.0)])),
    }
}

fn reading_config() -> SubjectConfig {
    SubjectConfig {
        core: SectionConfig::new(30.0, [("Lecture", 15.0), ("Notes", 15.0)]),
        mcq: SectionConfig::new(
            20.0,
            [("Seen Comprehension", 10.0), ("Info Transfer", 10.0)],
        ),
        // "Info Transfer" is graded in both mcq and cq.
        cq: SectionConfig::new(
            50.0,
            [
                ("Unseen Comprehension", 15.0),
                ("Info Transfer", 10.0),
                ("Summary Writing", 15.0),
                ("Cloze Test", 10.0),
            ],
        ),
        final_exam: None,
    }
}

fn writing_config() -> SubjectConfig {
    SubjectConfig {
        core: SectionConfig::new(30.0, [("Lecture", 15.0), ("Notes", 15.0)]),
        mcq: SectionConfig::new(20.0, [("Grammar Practice", 20.0)]),
        cq: SectionConfig::new(
            50.0,
            [
                ("Paragraph", 10.0),
                ("Composition", 10.0),
                ("Letter Writing", 10.0),
                ("Email Writing", 10.0),
                ("Story Writing", 10.0),
            ],
        ),
        final_exam: None,
    }
}

/// Canonical activity names a config weighs, in section order, without repeats.
pub fn activities_for(config: &SubjectConfig) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (_, section) in config.sections() {
        for name in section.activities.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

fn subject(id: &str, name: &str, config: &SubjectConfig, chapters: &[&str]) -> SubjectData {
    SubjectData {
        id: id.to_string(),
        name: name.to_string(),
        activities: activities_for(config),
        chapters: chapters
            .iter()
            .enumerate()
            .map(|(i, name)| ChapterTemplate {
                id: i as u32 + 1,
                name: name.to_string(),
            })
            .collect(),
    }
}

fn subjects(configs: &WeightConfigs) -> Vec<SubjectData> {
    vec![
        subject(
            "physics1st",
            "Physics 1st Paper",
            &configs.science,
            &[
                "Physical World and Measurement",
                "Vector",
                "Dynamics",
                "Newtonian Mechanics",
                "Work, Energy and Power",
                "Gravitation and Gravity",
                "Structural Properties of Matter",
                "Periodic Motion",
                "Waves",
                "Ideal Gas and Kinetic Theory",
            ],
        ),
        subject(
            "chemistry1st",
            "Chemistry 1st Paper",
            &configs.science,
            &[
                "Laboratory Safety",
                "Qualitative Chemistry",
                "Periodic Properties and Bonding",
                "Chemical Changes",
                "Working Chemistry",
            ],
        ),
        subject(
            "biology1st",
            "Biology 1st Paper",
            &configs.science,
            &[
                "Cell and Its Structure",
                "Cell Division",
                "Cell Chemistry",
                "Microorganisms",
                "Algae and Fungi",
                "Bryophyta and Pteridophyta",
                "Gymnosperms and Angiosperms",
                "Tissue and Tissue System",
                "Plant Physiology",
                "Plant Reproduction",
                "Biotechnology",
                "Organisms and Environment",
            ],
        ),
        subject(
            "highermath1st",
            "Higher Math 1st Paper",
            &configs.math,
            &[
                "Matrices and Determinants",
                "Vectors",
                "Straight Lines",
                "Circles",
                "Permutations and Combinations",
                "Trigonometric Ratios",
                "Associated Trigonometric Angles",
                "Functions and Graphs",
                "Differentiation",
                "Integration",
            ],
        ),
        subject(
            "english1st",
            "English 1st Paper",
            &configs.language_reading,
            &[
                "People or Institutions Making History",
                "Education and Life",
                "Art and Craft",
                "Dreams",
                "Human Relationships",
                "Adolescence",
            ],
        ),
        subject(
            "english2nd",
            "English 2nd Paper",
            &configs.language_writing,
            &[
                "Articles",
                "Prepositions",
                "Completing Sentences",
                "Right Forms of Verbs",
                "Narration",
                "Transformation",
                "Punctuation",
            ],
        ),
    ]
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

impl ConfigRepository {
    /// The shipped tables.
    pub fn builtin() -> Self {
        let configs = WeightConfigs {
            science: science_config(),
            math: math_config(),
            language_reading: reading_config(),
            language_writing: writing_config(),
        };
        let subjects = subjects(&configs);
        ConfigRepository::new(
            ALIASES.iter().copied().collect::<AliasTable>(),
            [
                (SubjectFamily::Math, owned(MATH_SUBJECTS)),
                (SubjectFamily::LanguageReading, owned(READING_SUBJECTS)),
                (SubjectFamily::LanguageWriting, owned(WRITING_SUBJECTS)),
            ],
            configs,
            subjects,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionKind;

    #[test]
    fn every_config_budgets_100_points() {
        let repo = ConfigRepository::builtin();
        for (family, config) in repo.configs().iter() {
            assert_eq!(config.total_max(), 100.0, "{family} sections must sum to 100");
        }
    }

    #[test]
    fn every_section_weights_sum_to_denominator() {
        let repo = ConfigRepository::builtin();
        for (family, config) in repo.configs().iter() {
            for (kind, section) in config.sections() {
                assert!(
                    (section.weight_sum() - section.denominator()).abs() < 1e-9,
                    "{family}.{kind} weights sum to {} not {}",
                    section.weight_sum(),
                    section.denominator()
                );
            }
        }
    }

    #[test]
    fn only_math_has_final() {
        let repo = ConfigRepository::builtin();
        for (family, config) in repo.configs().iter() {
            assert_eq!(
                config.section(SectionKind::Final).is_some(),
                family == SubjectFamily::Math
            );
        }
    }

    #[test]
    fn highermath_resolves_to_math() {
        let repo = ConfigRepository::builtin();
        let config = repo.resolve_config("highermath");
        assert_eq!(config.core.max, 30.0);
        assert_eq!(config.mcq.max, 20.0);
        assert_eq!(config.cq.max, 40.0);
        assert_eq!(config.final_exam.as_ref().map(|s| s.max), Some(10.0));
    }

    #[test]
    fn unknown_subject_resolves_to_science() {
        let repo = ConfigRepository::builtin();
        assert_eq!(
            repo.resolve_config("unknown-subject-123"),
            &repo.configs().science
        );
    }

    #[test]
    fn science_cq_weighs_written_cq_at_20() {
        let repo = ConfigRepository::builtin();
        assert_eq!(repo.configs().science.cq.activities.get("Written CQ"), Some(&20.0));
        assert_eq!(repo.aliases().normalize("Typewise CQ"), "Written CQ");
    }

    #[test]
    fn reading_counts_info_transfer_twice() {
        let repo = ConfigRepository::builtin();
        let reading = &repo.configs().language_reading;
        assert!(reading.mcq.activities.contains_key("Info Transfer"));
        assert!(reading.cq.activities.contains_key("Info Transfer"));
        let subject = repo.subject("english1st").unwrap();
        let occurrences = subject
            .activities
            .iter()
            .filter(|a| *a == "Info Transfer")
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn alias_table_has_no_chains() {
        let repo = ConfigRepository::builtin();
        assert!(repo.aliases().chained().is_empty());
    }

    #[test]
    fn catalog_covers_all_families() {
        let repo = ConfigRepository::builtin();
        for family in SubjectFamily::ALL {
            assert!(
                repo.subjects().iter().any(|s| repo.family_of(&s.id) == family),
                "no catalog subject in {family}"
            );
        }
    }
}

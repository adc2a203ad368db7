//! Weight configuration repository and subject config resolution.
//!
//! All constant tables (aliases, family lists, weight configs, subject
//! catalog) live in one immutable [`ConfigRepository`] that the engine is
//! constructed with, so tests can substitute alternate tables.

use std::collections::HashMap;

use crate::model::{SubjectConfig, SubjectData, SubjectFamily};
use crate::normalize::AliasTable;

/// One grading scheme per family.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightConfigs {
    pub science: SubjectConfig,
    pub math: SubjectConfig,
    pub language_reading: SubjectConfig,
    pub language_writing: SubjectConfig,
}

impl WeightConfigs {
    pub fn get(&self, family: SubjectFamily) -> &SubjectConfig {
        match family {
            SubjectFamily::Science => &self.science,
            SubjectFamily::Math => &self.math,
            SubjectFamily::LanguageReading => &self.language_reading,
            SubjectFamily::LanguageWriting => &self.language_writing,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubjectFamily, &SubjectConfig)> {
        SubjectFamily::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

/// Immutable, process-wide configuration tables.
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    aliases: AliasTable,
    families: HashMap<String, SubjectFamily>,
    configs: WeightConfigs,
    subjects: Vec<SubjectData>,
}

impl ConfigRepository {
    /// Build a repository. `families` lists the subject ids of every
    /// non-science family; ids not listed anywhere resolve to science.
    pub fn new(
        aliases: AliasTable,
        families: impl IntoIterator<Item = (SubjectFamily, Vec<String>)>,
        configs: WeightConfigs,
        subjects: Vec<SubjectData>,
    ) -> Self {
        let families = families
            .into_iter()
            .flat_map(|(family, ids)| ids.into_iter().map(move |id| (id, family)))
            .collect();
        Self {
            aliases,
            families,
            configs,
            subjects,
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn configs(&self) -> &WeightConfigs {
        &self.configs
    }

    pub fn subjects(&self) -> &[SubjectData] {
        &self.subjects
    }

    pub fn subject(&self, id: &str) -> Option<&SubjectData> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Family of a subject id. Total: unlisted ids are science.
    pub fn family_of(&self, subject_id: &str) -> SubjectFamily {
        self.families
            .get(subject_id)
            .copied()
            .unwrap_or(SubjectFamily::Science)
    }

    /// Grading scheme for a subject id. Never fails; see [`family_of`](Self::family_of).
    pub fn resolve_config(&self, subject_id: &str) -> &SubjectConfig {
        self.configs.get(self.family_of(subject_id))
    }

    /// Subject ids explicitly assigned to `family`, sorted.
    pub fn family_members(&self, family: SubjectFamily) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .families
            .iter()
            .filter(|(_, f)| **f == family)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionConfig;

    fn config(core: f64) -> SubjectConfig {
        SubjectConfig {
            core: SectionConfig::new(core, [("Lecture", core)]),
            mcq: SectionConfig::new(20.0, [("MCQ Practice", 20.0)]),
            cq: SectionConfig::new(80.0 - core, [("Written CQ", 80.0 - core)]),
            final_exam: None,
        }
    }

    fn repo() -> ConfigRepository {
        ConfigRepository::new(
            AliasTable::default(),
            [
                (SubjectFamily::Math, vec!["highermath".to_string()]),
                (SubjectFamily::LanguageReading, vec!["english1st".to_string()]),
            ],
            WeightConfigs {
                science: config(30.0),
                math: config(10.0),
                language_reading: config(20.0),
                language_writing: config(40.0),
            },
            vec![],
        )
    }

    #[test]
    fn resolves_listed_families() {
        let repo = repo();
        assert_eq!(repo.family_of("highermath"), SubjectFamily::Math);
        assert_eq!(repo.resolve_config("highermath").core.max, 10.0);
        assert_eq!(repo.resolve_config("english1st").core.max, 20.0);
    }

    #[test]
    fn unknown_subject_falls_back_to_science() {
        let repo = repo();
        assert_eq!(repo.family_of("unknown-subject-123"), SubjectFamily::Science);
        assert_eq!(repo.resolve_config("unknown-subject-123"), &repo.configs().science);
        assert_eq!(repo.resolve_config(""), &repo.configs().science);
    }

    #[test]
    fn family_members_sorted() {
        let repo = repo();
        assert_eq!(repo.family_members(SubjectFamily::Math), vec!["highermath"]);
        assert!(repo.family_members(SubjectFamily::LanguageWriting).is_empty());
    }
}

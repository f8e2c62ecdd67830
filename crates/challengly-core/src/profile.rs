//! Onboarding answers: interests, motivations and preferred difficulty.

use serde::{Deserialize, Serialize};

use crate::catalog::Difficulty;
use crate::error::{Result, ValidationError};
use crate::storage::{keys, load_json, save_json, KeyValueStore};

pub const INTERESTS: [&str; 5] = ["fitness", "creativity", "mindfulness", "learning", "social"];

pub const MOTIVATIONS: [&str; 5] = ["growth", "fun", "achievement", "community", "wellbeing"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub motivations: Vec<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            motivations: Vec::new(),
            difficulty: default_difficulty(),
        }
    }
}

impl Profile {
    /// What onboarding stores when the user skips it.
    pub fn skipped() -> Self {
        Self {
            interests: vec!["fitness".into(), "creativity".into(), "mindfulness".into()],
            motivations: Vec::new(),
            difficulty: Difficulty::Medium,
        }
    }

    /// Replace the interest selection. Rejects unknown ids and an empty
    /// selection; duplicates are collapsed in first-seen order.
    pub fn set_interests<I, T>(&mut self, ids: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.interests = validate_selection("interests", ids, &INTERESTS)?;
        Ok(())
    }

    pub fn set_motivations<I, T>(&mut self, ids: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.motivations = validate_selection("motivations", ids, &MOTIVATIONS)?;
        Ok(())
    }

    /// Stored profile, or the default if absent or unreadable.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(load_json(store, keys::PROFILE)?.unwrap_or_default())
    }

    /// Whether onboarding has been completed or skipped.
    pub fn exists<S: KeyValueStore + ?Sized>(store: &S) -> Result<bool> {
        Ok(store.get(keys::PROFILE)?.is_some())
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, keys::PROFILE, self)
    }
}

fn validate_selection<I, T>(
    field: &str,
    ids: I,
    known: &[&str],
) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut selected: Vec<String> = Vec::new();
    for id in ids {
        let id = id.as_ref().trim().to_ascii_lowercase();
        if !known.contains(&id.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                message: format!("unknown id '{id}', expected one of {}", known.join(", ")),
            });
        }
        if !selected.contains(&id) {
            selected.push(id);
        }
    }
    if selected.is_empty() {
        return Err(ValidationError::EmptyCollection(field.to_string()));
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn skipped_defaults() {
        let profile = Profile::skipped();
        assert_eq!(profile.interests, ["fitness", "creativity", "mindfulness"]);
        assert_eq!(profile.difficulty, Difficulty::Medium);
    }

    #[test]
    fn selection_is_validated() {
        let mut profile = Profile::default();
        profile.set_interests(["Learning", "social", "learning"]).unwrap();
        assert_eq!(profile.interests, ["learning", "social"]);
        assert!(profile.set_interests(["knitting"]).is_err());
        assert!(matches!(
            profile.set_motivations(Vec::<String>::new()),
            Err(ValidationError::EmptyCollection(_))
        ));
        // Failed updates leave the previous selection.
        assert_eq!(profile.interests, ["learning", "social"]);
    }

    #[test]
    fn persisted_through_store() {
        let mut store = MemoryStore::new();
        assert!(!Profile::exists(&store).unwrap());
        assert_eq!(Profile::load(&store).unwrap(), Profile::default());

        let mut profile = Profile::default();
        profile.set_motivations(["fun", "growth"]).unwrap();
        profile.difficulty = Difficulty::Hard;
        profile.save(&mut store).unwrap();

        assert!(Profile::exists(&store).unwrap());
        assert_eq!(Profile::load(&store).unwrap(), profile);
    }
}

//! Leaderboard entries and the validated, immutable list that holds them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use super::error::IntegrityError;
use super::field::{Field, ScoreType};
use super::score::ModelScore;

/// Id of the human-expert reference baseline.
///
/// This entry is left out of every per-domain ranking and never opens a
/// detail view.
pub const REFERENCE_BASELINE_ID: &str = "human-expert";

/// An entry as it appears in the data file, before validation.
///
/// Score objects stay as raw JSON values so that a missing object or a
/// non-numeric score surfaces as an [`IntegrityError`] for this entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawModelEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub org: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub eed: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub acc: Option<BTreeMap<String, Value>>,
}

impl RawModelEntry {
    /// Read the `index`-th element of the data file array.
    pub fn from_value(index: usize, value: Value) -> Result<Self, IntegrityError> {
        let entry = value
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));
        serde_json::from_value(value).map_err(|e| IntegrityError::InvalidEntry {
            entry,
            reason: e.to_string(),
        })
    }

    fn score_object(
        &self,
        score_type: ScoreType,
    ) -> Result<&BTreeMap<String, Value>, IntegrityError> {
        let object = match score_type {
            ScoreType::Eed => self.eed.as_ref(),
            ScoreType::Acc => self.acc.as_ref(),
        };
        object.ok_or_else(|| IntegrityError::MissingScoreObject {
            id: self.id.clone(),
            score_type,
        })
    }
}

/// One evaluated system: an LLM or the human-expert baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    id: String,
    name: String,
    icon: String,
    org: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    eed: ModelScore,
    acc: ModelScore,
}

impl ModelEntry {
    /// Create an entry from already validated scores.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        org: impl Into<String>,
        eed: ModelScore,
        acc: ModelScore,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            org: org.into(),
            note: None,
            eed,
            acc,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn score(&self, score_type: ScoreType) -> &ModelScore {
        match score_type {
            ScoreType::Eed => &self.eed,
            ScoreType::Acc => &self.acc,
        }
    }

    /// The value that drives ranking for a `(score_type, field)` selection.
    pub fn value(&self, score_type: ScoreType, field: Field) -> f64 {
        self.score(score_type).get(field)
    }

    pub fn is_reference_baseline(&self) -> bool {
        self.id == REFERENCE_BASELINE_ID
    }
}

impl TryFrom<RawModelEntry> for ModelEntry {
    type Error = IntegrityError;

    fn try_from(raw: RawModelEntry) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(IntegrityError::EmptyId);
        }
        let eed_map = raw.score_object(ScoreType::Eed)?;
        let acc_map = raw.score_object(ScoreType::Acc)?;
        let eed = ModelScore::from_map(&raw.id, ScoreType::Eed, eed_map)?;
        let acc = ModelScore::from_map(&raw.id, ScoreType::Acc, acc_map)?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            icon: raw.icon,
            org: raw.org,
            note: raw.note.filter(|n| !n.trim().is_empty()),
            eed,
            acc,
        })
    }
}

/// The loaded list of entries, in data-file order.
///
/// Immutable once built: ranking borrows it and never reorders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ModelEntry>,
}

impl Leaderboard {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate a list of entries. Ids must be unique.
    pub fn from_entries(entries: Vec<ModelEntry>) -> Result<Self, IntegrityError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(IntegrityError::DuplicateId(entry.id().to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// Validate raw data-file entries.
    pub fn from_raw(raw: Vec<RawModelEntry>) -> Result<Self, IntegrityError> {
        let entries = raw
            .into_iter()
            .map(ModelEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(id: &str) -> RawModelEntry {
        let map: BTreeMap<String, Value> = Field::ALL_FIELDS
            .iter()
            .map(|f| (f.as_str().to_string(), json!(42.0)))
            .collect();
        RawModelEntry {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "openai".to_string(),
            org: "Org".to_string(),
            note: None,
            eed: Some(map.clone()),
            acc: Some(map),
        }
    }

    #[test]
    fn raw_entry_converts() {
        let entry = ModelEntry::try_from(raw("gpt")).expect("valid");
        assert_eq!(entry.id(), "gpt");
        assert_eq!(entry.name(), "GPT");
        assert_eq!(entry.icon(), "openai");
        assert_eq!(entry.value(ScoreType::Acc, Field::Modern), 42.0);
        assert!(!entry.is_reference_baseline());
    }

    #[test]
    fn blank_note_is_dropped() {
        let mut r = raw("gpt");
        r.note = Some("  ".to_string());
        let entry = ModelEntry::try_from(r).expect("valid");
        assert_eq!(entry.note(), None);
    }

    #[test]
    fn empty_id_rejected() {
        assert_eq!(
            ModelEntry::try_from(raw(" ")).unwrap_err(),
            IntegrityError::EmptyId
        );
    }

    #[test]
    fn missing_score_object_rejected() {
        let mut r = raw("gpt");
        r.acc = None;
        assert_eq!(
            ModelEntry::try_from(r).unwrap_err(),
            IntegrityError::MissingScoreObject {
                id: "gpt".to_string(),
                score_type: ScoreType::Acc,
            }
        );
    }

    #[test]
    fn from_value_names_entry_on_schema_error() {
        let err =
            RawModelEntry::from_value(3, json!({"id": "o3", "org": "OpenAI"})).unwrap_err();
        assert!(matches!(err, IntegrityError::InvalidEntry { ref entry, .. } if entry == "o3"));

        let err = RawModelEntry::from_value(5, json!(42)).unwrap_err();
        assert!(matches!(err, IntegrityError::InvalidEntry { ref entry, .. } if entry == "#5"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Leaderboard::from_raw(vec![raw("a"), raw("b"), raw("a")]).unwrap_err();
        assert_eq!(err, IntegrityError::DuplicateId("a".to_string()));
    }

    #[test]
    fn baseline_is_recognised_by_id() {
        let entry = ModelEntry::try_from(raw(REFERENCE_BASELINE_ID)).expect("valid");
        assert!(entry.is_reference_baseline());
    }

    #[test]
    fn leaderboard_lookup_by_id() {
        let board = Leaderboard::from_raw(vec![raw("a"), raw("b")]).expect("valid");
        assert_eq!(board.len(), 2);
        assert_eq!(board.get("b").map(ModelEntry::name), Some("B"));
        assert!(board.get("c").is_none());
        assert!(Leaderboard::empty().is_empty());
    }
}

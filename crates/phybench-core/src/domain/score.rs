//! Per-field score vectors.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::IntegrityError;
use super::field::{Field, ScoreType};

/// Upper bound for either metric. Both are percentages.
pub const MAX_SCORE: f64 = 100.0;

/// Seven validated scores, one per [`Field`].
///
/// Only constructible through validation, so every value is finite and
/// inside `0..=100` and no key is ever absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelScore {
    values: [f64; 7],
}

impl ModelScore {
    /// Build from values in [`Field::ALL_FIELDS`] order.
    ///
    /// `id` and `score_type` only label the error.
    pub fn new(
        id: &str,
        score_type: ScoreType,
        values: [f64; 7],
    ) -> Result<Self, IntegrityError> {
        for field in Field::ALL_FIELDS {
            let value = values[field.index()];
            if !value.is_finite() || !(0.0..=MAX_SCORE).contains(&value) {
                return Err(IntegrityError::OutOfRange {
                    id: id.to_string(),
                    score_type,
                    field,
                    value,
                });
            }
        }
        Ok(Self { values })
    }

    /// Build from the keyed object found in the data file.
    ///
    /// Every key must be present with a number and no other key is
    /// allowed. A `null` counts as missing.
    pub fn from_map(
        id: &str,
        score_type: ScoreType,
        map: &BTreeMap<String, Value>,
    ) -> Result<Self, IntegrityError> {
        if let Some(key) = map
            .keys()
            .find(|k| !Field::ALL_FIELDS.iter().any(|f| f.as_str() == k.as_str()))
        {
            return Err(IntegrityError::UnknownField {
                id: id.to_string(),
                score_type,
                key: key.clone(),
            });
        }

        let mut values = [0.0; 7];
        for field in Field::ALL_FIELDS {
            values[field.index()] = match map.get(field.as_str()) {
                None | Some(Value::Null) => {
                    return Err(IntegrityError::MissingField {
                        id: id.to_string(),
                        score_type,
                        field,
                    })
                }
                Some(value) => value.as_f64().ok_or_else(|| IntegrityError::NotANumber {
                    id: id.to_string(),
                    score_type,
                    field,
                    found: value.to_string(),
                })?,
            };
        }
        Self::new(id, score_type, values)
    }

    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    /// `(field, value)` pairs in [`Field::ALL_FIELDS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Field::ALL_FIELDS.into_iter().map(|f| (f, self.get(f)))
    }

    /// The six domain values in [`Field::DOMAINS`] order.
    pub fn domains(&self) -> [f64; 6] {
        Field::DOMAINS.map(|f| self.get(f))
    }
}

impl Serialize for ModelScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), &value)?;
        }
        map.end()
    }
}

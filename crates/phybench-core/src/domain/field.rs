//! Score selectors: which metric and which physics field drive a ranking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven keys every score object carries.
///
/// `All` is the aggregate; the other six are the PHYBench physics domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    All,
    Mechanics,
    Electricity,
    Thermodynamics,
    Optics,
    Modern,
    Advanced,
}

impl Field {
    /// Every field, aggregate first.
    pub const ALL_FIELDS: [Field; 7] = [
        Field::All,
        Field::Mechanics,
        Field::Electricity,
        Field::Thermodynamics,
        Field::Optics,
        Field::Modern,
        Field::Advanced,
    ];

    /// The six physics domains, in radar-axis order.
    pub const DOMAINS: [Field; 6] = [
        Field::Mechanics,
        Field::Electricity,
        Field::Thermodynamics,
        Field::Optics,
        Field::Modern,
        Field::Advanced,
    ];

    /// Wire key as it appears in the data file.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::All => "ALL",
            Field::Mechanics => "MECHANICS",
            Field::Electricity => "ELECTRICITY",
            Field::Thermodynamics => "THERMODYNAMICS",
            Field::Optics => "OPTICS",
            Field::Modern => "MODERN",
            Field::Advanced => "ADVANCED",
        }
    }

    /// Position of this field inside a [`ModelScore`](super::ModelScore).
    pub(crate) fn index(self) -> usize {
        match self {
            Field::All => 0,
            Field::Mechanics => 1,
            Field::Electricity => 2,
            Field::Thermodynamics => 3,
            Field::Optics => 4,
            Field::Modern => 5,
            Field::Advanced => 6,
        }
    }

    pub fn is_aggregate(self) -> bool {
        self == Field::All
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Field`] or [`ScoreType`] from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseSelectorError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Field {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Field::ALL_FIELDS
            .into_iter()
            .find(|f| f.as_str() == upper)
            .ok_or_else(|| ParseSelectorError {
                kind: "field",
                value: s.to_string(),
            })
    }
}

/// Which metric a ranking is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreType {
    /// Expression edit-distance score, 0–100.
    Eed,
    /// Binary-correctness accuracy, as a percentage.
    Acc,
}

impl ScoreType {
    pub const BOTH: [ScoreType; 2] = [ScoreType::Eed, ScoreType::Acc];

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreType::Eed => "eed",
            ScoreType::Acc => "acc",
        }
    }

    /// Label shown on the selector control.
    pub fn label(self) -> &'static str {
        match self {
            ScoreType::Eed => "EED Score",
            ScoreType::Acc => "Accuracy Score",
        }
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreType {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eed" | "eed score" => Ok(ScoreType::Eed),
            "acc" | "accuracy" | "accuracy score" => Ok(ScoreType::Acc),
            _ => Err(ParseSelectorError {
                kind: "score type",
                value: s.to_string(),
            }),
        }
    }
}

//! Error taxonomy for the leaderboard core.

use super::field::{Field, ScoreType};

/// The data file could not be fetched or parsed.
///
/// Recoverable: a view that hits this shows an empty leaderboard.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error fetching {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("HTTP status {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("malformed leaderboard JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The data parsed but violates the leaderboard contract.
///
/// Never recovered by substituting defaults.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityError {
    #[error("entry {id}: {score_type} score is missing field {field}")]
    MissingField {
        id: String,
        score_type: ScoreType,
        field: Field,
    },

    #[error("entry {id}: {score_type} score has unknown field {key}")]
    UnknownField {
        id: String,
        score_type: ScoreType,
        key: String,
    },

    #[error("entry {id}: {score_type}.{field} is not a number: {found}")]
    NotANumber {
        id: String,
        score_type: ScoreType,
        field: Field,
        found: String,
    },

    #[error("entry {id}: {score_type} score object is missing")]
    MissingScoreObject { id: String, score_type: ScoreType },

    /// The entry is not an object, or a required attribute is absent or
    /// has the wrong type. `entry` is the id when readable, else `#<index>`.
    #[error("entry {entry}: {reason}")]
    InvalidEntry { entry: String, reason: String },

    #[error("entry {id}: {score_type}.{field} = {value} is outside 0..=100")]
    OutOfRange {
        id: String,
        score_type: ScoreType,
        field: Field,
        value: f64,
    },

    #[error("duplicate entry id: {0}")]
    DuplicateId(String),

    #[error("entry has an empty id")]
    EmptyId,
}

/// Why a detail view could not be opened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("model {0} is a reference baseline and has no detail view")]
    NotInteractive(String),
}

/// Leaderboard core errors.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("data integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("detail error: {0}")]
    Detail(#[from] DetailError),
}

impl LeaderboardError {
    /// True for failures a view may recover from by rendering empty.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LeaderboardError::DataLoad(_))
    }
}

/// Result type for leaderboard core operations.
pub type Result<T> = std::result::Result<T, LeaderboardError>;

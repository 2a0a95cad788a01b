//! Domain models for the PHYBench leaderboard.
//!
//! - `Field` / `ScoreType`: the two selector enumerations
//! - `ModelScore`: seven validated per-field scores
//! - `ModelEntry` / `Leaderboard`: one evaluated system, and the loaded list

pub mod entry;
pub mod error;
pub mod field;
pub mod score;

pub use entry::{Leaderboard, ModelEntry, RawModelEntry, REFERENCE_BASELINE_ID};
pub use error::{DataLoadError, DetailError, IntegrityError, LeaderboardError, Result};
pub use field::{Field, ParseSelectorError, ScoreType};
pub use score::{ModelScore, MAX_SCORE};

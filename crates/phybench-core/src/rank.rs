//! Ranking of leaderboard entries by a `(score type, field)` selection.
//!
//! Ranking is a pure function of the loaded entries and the two selectors.
//! It borrows the entries and returns a new ordering; the input slice is
//! never reordered or modified.

use crate::domain::{Field, ModelEntry, ScoreType};

/// Rank `entries` descending by `entry[score_type][field]`.
///
/// - When `field` is not [`Field::All`], the reference baseline is dropped.
/// - Equal scores keep their input order (the sort is stable).
pub fn rank(entries: &[ModelEntry], score_type: ScoreType, field: Field) -> Vec<&ModelEntry> {
    let mut ranked: Vec<&ModelEntry> = entries
        .iter()
        .filter(|e| field.is_aggregate() || !e.is_reference_baseline())
        .collect();
    ranked.sort_by(|a, b| {
        b.value(score_type, field)
            .total_cmp(&a.value(score_type, field))
    });
    ranked
}

/// A ranked entry paired with its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub rank: usize,
    pub entry: &'a ModelEntry,
}

/// [`rank`], with positions attached.
pub fn ranked_positions(
    entries: &[ModelEntry],
    score_type: ScoreType,
    field: Field,
) -> Vec<Ranked<'_>> {
    rank(entries, score_type, field)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| Ranked { rank: i + 1, entry })
        .collect()
}

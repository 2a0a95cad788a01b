use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::table::TableRow;
use crate::view::{LeaderboardView, Selection};

pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0";

/// One ranked row in the persisted snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotRow {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub org: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<TableRow> for SnapshotRow {
    fn from(row: TableRow) -> Self {
        Self {
            rank: row.rank,
            id: row.id,
            name: row.name,
            org: row.org,
            score: row.score,
            note: row.note,
        }
    }
}

/// A ranked leaderboard frozen for one selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardSnapshot {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub selection: Selection,
    /// SHA-256 hex of the data file the ranking came from.
    pub data_digest: String,
    pub rows: Vec<SnapshotRow>,
}

impl LeaderboardSnapshot {
    pub fn from_view(view: &LeaderboardView, source_bytes: &[u8]) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            selection: view.selection(),
            data_digest: data_digest(source_bytes),
            rows: view.table().into_iter().map(SnapshotRow::from).collect(),
        }
    }
}

/// SHA-256 hex digest of the raw data file.
pub fn data_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Write the snapshot in pretty JSON format.
pub fn write_snapshot_json(path: &Path, snapshot: &LeaderboardSnapshot) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot).context("serialize snapshot")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Render the snapshot as a Markdown table.
pub fn render_snapshot_md(snapshot: &LeaderboardSnapshot) -> String {
    let score_type = snapshot.selection.score_type;
    let mut out = String::new();
    out.push_str(&format!(
        "# PHYBench Leaderboard: {} ({})\n\n",
        score_type.label(),
        snapshot.selection.field
    ));
    let short_digest: String = snapshot.data_digest.chars().take(12).collect();
    out.push_str(&format!(
        "- generated: {}\n- data digest: `{}`\n\n",
        snapshot.generated_at.to_rfc3339(),
        short_digest
    ));

    if snapshot.rows.is_empty() {
        out.push_str("_No entries._\n");
        return out;
    }

    out.push_str(&format!(
        "| Rank | Model | Organization | {} |\n",
        score_type.label()
    ));
    out.push_str("|---:|---|---|---:|\n");
    for row in &snapshot.rows {
        out.push_str(&format!(
            "| {} | {} | {} | {:.1} |\n",
            row.rank, row.name, row.org, row.score
        ));
    }

    let notes: Vec<&SnapshotRow> = snapshot.rows.iter().filter(|r| r.note.is_some()).collect();
    if !notes.is_empty() {
        out.push_str("\n### Notes\n");
        for row in notes {
            if let Some(note) = &row.note {
                out.push_str(&format!("- **{}**: {}\n", row.name, note));
            }
        }
    }
    out
}

/// Write the Markdown rendering.
pub fn write_snapshot_md(path: &Path, snapshot: &LeaderboardSnapshot) -> Result<()> {
    let md = render_snapshot_md(snapshot);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

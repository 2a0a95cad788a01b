//! Ranked table projection.

use serde::Serialize;

use crate::domain::{Field, ModelEntry, ScoreType};

/// One table row. `interactive` is false for rows that open no detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub org: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub score: f64,
    pub interactive: bool,
}

/// Project ranked entries into rows, numbering from 1.
pub fn table_rows<'a, I>(ranked: I, score_type: ScoreType, field: Field) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a ModelEntry>,
{
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, entry)| TableRow {
            rank: i + 1,
            id: entry.id().to_string(),
            name: entry.name().to_string(),
            org: entry.org().to_string(),
            note: entry.note().map(str::to_string),
            score: entry.value(score_type, field),
            interactive: !entry.is_reference_baseline(),
        })
        .collect()
}

/// Render rows as an aligned text table.
///
/// Non-interactive rows are marked with `*`; notes are listed beneath.
pub fn render_table(rows: &[TableRow], score_type: ScoreType) -> String {
    let score_header = score_type.label();
    let name_w = rows
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once("Model".len()))
        .max()
        .unwrap_or(0);
    let org_w = rows
        .iter()
        .map(|r| r.org.chars().count())
        .chain(std::iter::once("Organization".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<name_w$}  {:<org_w$}  {:>w$}\n",
        "Rank",
        "Model",
        "Organization",
        score_header,
        name_w = name_w,
        org_w = org_w,
        w = score_header.len()
    ));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(4 + 2 + name_w + 2 + org_w + 2 + score_header.len())
    ));

    for row in rows {
        let marker = if row.interactive { ' ' } else { '*' };
        out.push_str(&format!(
            "{:>3}{}  {:<name_w$}  {:<org_w$}  {:>w$.1}\n",
            row.rank,
            marker,
            row.name,
            row.org,
            row.score,
            name_w = name_w,
            org_w = org_w,
            w = score_header.len()
        ));
    }

    let notes: Vec<&TableRow> = rows.iter().filter(|r| r.note.is_some()).collect();
    if !notes.is_empty() {
        out.push('\n');
        for row in notes {
            if let Some(note) = &row.note {
                out.push_str(&format!("  [{}] {}\n", row.name, note));
            }
        }
    }
    if rows.iter().any(|r| !r.interactive) {
        out.push_str("\n  * reference baseline, no detail view\n");
    }

    out.trim_end().to_string()
}

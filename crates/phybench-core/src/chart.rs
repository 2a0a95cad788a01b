//! Horizontal bar chart projection.
//!
//! [`bars`] is a lazy, side-effect-free projection of a ranked list;
//! [`render_bar_chart`] draws it as terminal text.

use serde::Serialize;

use crate::config::RenderConfig;
use crate::domain::{Field, ModelEntry, ScoreType, MAX_SCORE};

/// One bar: a model label and the selected score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarDatum<'a> {
    pub label: &'a str,
    pub value: f64,
}

/// Project ranked entries into bars, preserving order.
pub fn bars<'a, I>(
    ranked: I,
    score_type: ScoreType,
    field: Field,
) -> impl Iterator<Item = BarDatum<'a>>
where
    I: IntoIterator<Item = &'a ModelEntry>,
{
    ranked.into_iter().map(move |entry| BarDatum {
        label: entry.name(),
        value: entry.value(score_type, field),
    })
}

const EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Bar body for `value` on a 0–100 scale drawn `width` cells wide.
fn bar_glyphs(value: f64, width: usize, performance_mode: bool) -> String {
    let cells = (value.clamp(0.0, MAX_SCORE) / MAX_SCORE) * width as f64;
    if performance_mode {
        return "#".repeat(cells.round() as usize);
    }
    let eighths = (cells * 8.0).round() as usize;
    let mut out = "█".repeat(eighths / 8);
    if eighths % 8 != 0 {
        out.push(EIGHTHS[eighths % 8]);
    }
    out
}

/// Render bars as a titled text chart, one line per bar.
pub fn render_bar_chart<'a, I>(title: &str, bars: I, config: &RenderConfig) -> String
where
    I: IntoIterator<Item = BarDatum<'a>>,
{
    let bars: Vec<BarDatum<'a>> = bars.into_iter().collect();
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');

    if bars.is_empty() {
        out.push_str("(no data)");
        return out;
    }

    let label_width = bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let axis = if config.performance_mode { '|' } else { '│' };

    for bar in &bars {
        let body = bar_glyphs(bar.value, config.bar_width, config.performance_mode);
        let pad = config.bar_width.saturating_sub(body.chars().count());
        out.push_str(&format!(
            "{:<lw$} {}{}{} {:>5.1}\n",
            bar.label,
            axis,
            body,
            " ".repeat(pad),
            bar.value,
            lw = label_width
        ));
    }
    out.trim_end().to_string()
}

/// Chart title for a selection, e.g. `EED Score (MECHANICS)`.
pub fn chart_title(score_type: ScoreType, field: Field) -> String {
    format!("{} ({})", score_type.label(), field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelScore;

    fn entry(id: &str, name: &str, eed: f64) -> ModelEntry {
        ModelEntry::new(
            id,
            name,
            "org",
            ModelScore::new(id, ScoreType::Eed, [eed; 7]).expect("valid"),
            ModelScore::new(id, ScoreType::Acc, [0.0; 7]).expect("valid"),
        )
    }

    #[test]
    fn bars_follow_input_order() {
        let entries = vec![entry("b", "Beta", 80.0), entry("a", "Alpha", 50.0)];
        let got: Vec<_> = bars(&entries, ScoreType::Eed, Field::All).collect();
        assert_eq!(
            got,
            vec![
                BarDatum { label: "Beta", value: 80.0 },
                BarDatum { label: "Alpha", value: 50.0 },
            ]
        );
    }

    #[test]
    fn glyphs_scale_with_value() {
        assert_eq!(bar_glyphs(100.0, 10, true), "##########");
        assert_eq!(bar_glyphs(50.0, 10, true), "#####");
        assert_eq!(bar_glyphs(0.0, 10, false), "");
        assert_eq!(bar_glyphs(50.0, 10, false), "█████");
        // 12.5% of 10 cells = 1.25 cells = one full block plus two eighths
        assert_eq!(bar_glyphs(12.5, 10, false), "█▎");
    }

    #[test]
    fn render_aligns_labels() {
        let data = vec![
            BarDatum { label: "Gemini 2.5 Pro", value: 49.4 },
            BarDatum { label: "o3", value: 46.3 },
        ];
        let config = RenderConfig::default()
            .with_performance_mode(true)
            .with_bar_width(20);
        let out = render_bar_chart("EED Score (ALL)", data, &config);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "EED Score (ALL)");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("Gemini 2.5 Pro |"));
        assert!(lines[3].starts_with("o3             |"));
        assert!(lines[2].ends_with("49.4"));
    }

    #[test]
    fn render_empty_chart() {
        let out = render_bar_chart("Accuracy Score (OPTICS)", Vec::new(), &RenderConfig::default());
        assert!(out.ends_with("(no data)"));
    }

    #[test]
    fn title_names_selection() {
        assert_eq!(
            chart_title(ScoreType::Acc, Field::Modern),
            "Accuracy Score (MODERN)"
        );
    }
}

//! Per-model detail view: a two-series radar over the six domains plus a
//! full breakdown for the active score type.

use serde::Serialize;

use crate::domain::{DetailError, Field, Leaderboard, ModelEntry, ScoreType};

/// One radar polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub score_type: ScoreType,
    pub label: &'static str,
    /// Values in [`Field::DOMAINS`] order.
    pub values: [f64; 6],
}

/// Radar chart over the six domains, one series per score type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub axes: [Field; 6],
    pub series: [RadarSeries; 2],
}

impl RadarChart {
    pub fn for_entry(entry: &ModelEntry) -> Self {
        Self {
            axes: Field::DOMAINS,
            series: ScoreType::BOTH.map(|score_type| RadarSeries {
                score_type,
                label: score_type.label(),
                values: entry.score(score_type).domains(),
            }),
        }
    }

    pub fn series(&self, score_type: ScoreType) -> &RadarSeries {
        match score_type {
            ScoreType::Eed => &self.series[0],
            ScoreType::Acc => &self.series[1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: String,
    pub name: String,
    pub org: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub radar: RadarChart,
    pub active: ScoreType,
    /// All seven fields for the active score type.
    pub breakdown: Vec<(Field, f64)>,
}

impl DetailView {
    /// Build the view for `entry`. Refuses the reference baseline.
    pub fn for_entry(entry: &ModelEntry, active: ScoreType) -> Result<Self, DetailError> {
        if entry.is_reference_baseline() {
            return Err(DetailError::NotInteractive(entry.id().to_string()));
        }
        Ok(Self {
            id: entry.id().to_string(),
            name: entry.name().to_string(),
            org: entry.org().to_string(),
            note: entry.note().map(str::to_string),
            radar: RadarChart::for_entry(entry),
            active,
            breakdown: entry.score(active).iter().collect(),
        })
    }

    /// Render as terminal text: header, radar table, breakdown.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} ({})\n", self.name, self.org));
        if let Some(note) = &self.note {
            out.push_str(&format!("note: {}\n", note));
        }

        out.push_str("\nRadar\n-----\n");
        let axis_w = self
            .radar
            .axes
            .iter()
            .map(|f| f.as_str().len())
            .max()
            .unwrap_or(0);
        out.push_str(&format!(
            "{:<axis_w$}  {:>9}  {:>14}\n",
            "",
            ScoreType::Eed.label(),
            ScoreType::Acc.label(),
            axis_w = axis_w
        ));
        let eed = self.radar.series(ScoreType::Eed);
        let acc = self.radar.series(ScoreType::Acc);
        for (i, axis) in self.radar.axes.iter().enumerate() {
            out.push_str(&format!(
                "{:<axis_w$}  {:>9.1}  {:>14.1}\n",
                axis.as_str(),
                eed.values[i],
                acc.values[i],
                axis_w = axis_w
            ));
        }

        out.push_str(&format!("\n{}\n", self.active.label()));
        out.push_str(&"-".repeat(self.active.label().len()));
        out.push('\n');
        for (field, value) in &self.breakdown {
            out.push_str(&format!(
                "{:<axis_w$}  {:>6.1}\n",
                field.as_str(),
                value,
                axis_w = axis_w
            ));
        }
        out.trim_end().to_string()
    }
}

/// Look up `id` and build its detail view.
pub fn open_detail(
    leaderboard: &Leaderboard,
    id: &str,
    active: ScoreType,
) -> Result<DetailView, DetailError> {
    let entry = leaderboard
        .get(id)
        .ok_or_else(|| DetailError::UnknownModel(id.to_string()))?;
    DetailView::for_entry(entry, active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelScore, REFERENCE_BASELINE_ID};

    fn board() -> Leaderboard {
        let model = ModelEntry::new(
            "gemini-2.5-pro",
            "Gemini 2.5 Pro",
            "Google",
            ModelScore::new("g", ScoreType::Eed, [49.4, 55.0, 50.1, 48.0, 47.2, 44.0, 40.5])
                .expect("valid"),
            ModelScore::new("g", ScoreType::Acc, [36.9, 41.0, 38.2, 35.1, 33.3, 30.0, 28.8])
                .expect("valid"),
        )
        .with_note("thinking enabled");
        let human = ModelEntry::new(
            REFERENCE_BASELINE_ID,
            "Human Expert",
            "PKU",
            ModelScore::new("h", ScoreType::Eed, [70.4; 7]).expect("valid"),
            ModelScore::new("h", ScoreType::Acc, [61.9; 7]).expect("valid"),
        );
        Leaderboard::from_entries(vec![human, model]).expect("valid")
    }

    #[test]
    fn radar_has_both_series_over_six_domains() {
        let view = open_detail(&board(), "gemini-2.5-pro", ScoreType::Eed).expect("detail");
        assert_eq!(view.radar.axes, Field::DOMAINS);
        assert_eq!(
            view.radar.series(ScoreType::Eed).values,
            [55.0, 50.1, 48.0, 47.2, 44.0, 40.5]
        );
        assert_eq!(
            view.radar.series(ScoreType::Acc).values,
            [41.0, 38.2, 35.1, 33.3, 30.0, 28.8]
        );
    }

    #[test]
    fn breakdown_follows_active_score_type() {
        let eed = open_detail(&board(), "gemini-2.5-pro", ScoreType::Eed).expect("detail");
        assert_eq!(eed.breakdown.len(), 7);
        assert_eq!(eed.breakdown[0], (Field::All, 49.4));

        let acc = open_detail(&board(), "gemini-2.5-pro", ScoreType::Acc).expect("detail");
        assert_eq!(acc.breakdown[0], (Field::All, 36.9));
        assert_eq!(acc.breakdown[6], (Field::Advanced, 28.8));
    }

    #[test]
    fn baseline_has_no_detail() {
        let err = open_detail(&board(), REFERENCE_BASELINE_ID, ScoreType::Eed).unwrap_err();
        assert_eq!(err, DetailError::NotInteractive(REFERENCE_BASELINE_ID.to_string()));
    }

    #[test]
    fn unknown_model_reported() {
        let err = open_detail(&board(), "nope", ScoreType::Eed).unwrap_err();
        assert_eq!(err, DetailError::UnknownModel("nope".to_string()));
    }

    #[test]
    fn text_lists_axes_and_note() {
        let text = open_detail(&board(), "gemini-2.5-pro", ScoreType::Acc)
            .expect("detail")
            .to_text();
        assert!(text.starts_with("Gemini 2.5 Pro (Google)"));
        assert!(text.contains("note: thinking enabled"));
        assert!(text.contains("THERMODYNAMICS"));
        assert!(text.contains("Accuracy Score\n--------------"));
        assert!(text.lines().any(|l| l.starts_with("ALL") && l.ends_with("36.9")));
    }
}

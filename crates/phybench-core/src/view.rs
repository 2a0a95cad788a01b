//! The leaderboard view: loaded data plus the two selectors.
//!
//! Every projection (ranking, chart, table, detail) is recomputed from
//! `(leaderboard, selection)` on demand. Changing a selector never touches
//! the data source.
//!
//! Loading is the only suspension point. [`mount`] checks a [`MountToken`]
//! after the fetch resolves and discards the result if the owning
//! [`MountGuard`] has been unmounted in the meantime.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::Instrument;

use crate::chart::{bars, chart_title, render_bar_chart, BarDatum};
use crate::config::RenderConfig;
use crate::detail::{open_detail, DetailView};
use crate::domain::{DetailError, Field, Leaderboard, ModelEntry, Result, ScoreType};
use crate::loader::{load_or_empty, DataSource};
use crate::metrics::METRICS;
use crate::obs;
use crate::rank::rank;
use crate::table::{render_table, table_rows, TableRow};

/// The selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub score_type: ScoreType,
    pub field: Field,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            score_type: ScoreType::Eed,
            field: Field::All,
        }
    }
}

impl Selection {
    pub fn new(score_type: ScoreType, field: Field) -> Self {
        Self { score_type, field }
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardView {
    leaderboard: Leaderboard,
    selection: Selection,
    config: RenderConfig,
}

impl LeaderboardView {
    pub fn new(leaderboard: Leaderboard, config: RenderConfig) -> Self {
        Self {
            leaderboard,
            selection: Selection::default(),
            config,
        }
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn select_score_type(&mut self, score_type: ScoreType) {
        self.select(Selection {
            score_type,
            ..self.selection
        });
    }

    pub fn select_field(&mut self, field: Field) {
        self.select(Selection {
            field,
            ..self.selection
        });
    }

    /// Replace both selectors at once. A no-op selection does not re-rank.
    pub fn select(&mut self, selection: Selection) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        METRICS.inc_reranks();
        obs::emit_reranked(selection.score_type, selection.field, self.ranked().len());
    }

    pub fn ranked(&self) -> Vec<&ModelEntry> {
        rank(
            self.leaderboard.entries(),
            self.selection.score_type,
            self.selection.field,
        )
    }

    pub fn chart(&self) -> impl Iterator<Item = BarDatum<'_>> + '_ {
        bars(
            self.ranked(),
            self.selection.score_type,
            self.selection.field,
        )
    }

    pub fn table(&self) -> Vec<TableRow> {
        table_rows(
            self.ranked(),
            self.selection.score_type,
            self.selection.field,
        )
    }

    /// Open the detail view for `id` using the active score type.
    pub fn detail(&self, id: &str) -> std::result::Result<DetailView, DetailError> {
        let view = open_detail(&self.leaderboard, id, self.selection.score_type)?;
        METRICS.inc_details_opened();
        obs::emit_detail_opened(id, self.selection.score_type);
        Ok(view)
    }

    pub fn render_chart(&self) -> String {
        render_bar_chart(
            &chart_title(self.selection.score_type, self.selection.field),
            self.chart(),
            &self.config,
        )
    }

    pub fn render_table(&self) -> String {
        render_table(&self.table(), self.selection.score_type)
    }
}

/// Owned by whatever displays the view. Dropping it unmounts.
#[derive(Debug)]
pub struct MountGuard {
    live: Arc<AtomicBool>,
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> MountToken {
        MountToken {
            live: Arc::clone(&self.live),
        }
    }

    pub fn unmount(&self) {
        self.live.store(false, Ordering::Release);
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Cheap handle checked by in-flight work before it writes view state.
#[derive(Debug, Clone)]
pub struct MountToken {
    live: Arc<AtomicBool>,
}

impl MountToken {
    pub fn is_mounted(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Load the leaderboard and build a view, unless unmounted meanwhile.
///
/// Returns `Ok(None)` when the guard went away during the fetch.
/// Recoverable load failures produce an empty view; integrity errors are
/// returned.
pub async fn mount(
    source: &dyn DataSource,
    token: &MountToken,
    config: RenderConfig,
) -> Result<Option<LeaderboardView>> {
    let leaderboard = load_or_empty(source)
        .instrument(tracing::info_span!("phybench.mount", source = %source.describe()))
        .await?;
    if !token.is_mounted() {
        obs::emit_stale_load_discarded(&source.describe());
        return Ok(None);
    }
    Ok(Some(LeaderboardView::new(leaderboard, config)))
}

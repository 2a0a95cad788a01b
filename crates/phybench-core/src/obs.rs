//! Structured observability hooks for leaderboard view lifecycle events.
//!
//! This module provides:
//! - View-scoped tracing spans via the `ViewSpan` RAII guard
//! - Emission functions for load, re-rank, detail and TOC events
//!
//! Events are emitted at `info!` level (filter with `RUST_LOG`).
//! For JSON output, pass `--json-logs` to the CLI.

use tracing::info;

use crate::domain::{Field, ScoreType};

/// RAII guard that enters a view-scoped tracing span while alive.
///
/// # Example
///
/// ```ignore
/// let _span = ViewSpan::enter("leaderboard");
/// // tracing calls are now associated with view = "leaderboard"
/// ```
pub struct ViewSpan {
    _span: tracing::span::EnteredSpan,
}

impl ViewSpan {
    pub fn enter(view: &str) -> Self {
        let span = tracing::info_span!("phybench.view", view = %view);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: leaderboard data loaded.
pub fn emit_data_loaded(source: &str, entries: usize) {
    info!(event = "data.loaded", source = %source, entries = entries);
}

/// Emit event: leaderboard data failed to load (warning level).
pub fn emit_data_load_failed(source: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "data.load_failed", source = %source, error = %error);
}

/// Emit event: the view re-ranked after a selector change.
pub fn emit_reranked(score_type: ScoreType, field: Field, ranked: usize) {
    info!(
        event = "view.reranked",
        score_type = %score_type,
        field = %field,
        ranked = ranked,
    );
}

/// Emit event: a stale load was discarded because its view unmounted.
pub fn emit_stale_load_discarded(source: &str) {
    tracing::debug!(event = "view.stale_load_discarded", source = %source);
}

/// Emit event: a model's detail view was opened.
pub fn emit_detail_opened(model_id: &str, score_type: ScoreType) {
    info!(event = "detail.opened", model_id = %model_id, score_type = %score_type);
}

/// Emit event: the TOC's active heading changed.
pub fn emit_toc_activated(heading_id: &str, index: usize, progress: f64) {
    tracing::debug!(
        event = "toc.activated",
        heading_id = %heading_id,
        index = index,
        progress = progress,
    );
}

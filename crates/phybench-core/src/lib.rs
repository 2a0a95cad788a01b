//! PHYBench Leaderboard Core Library
//!
//! Loads the leaderboard data file, ranks models by a selected score type
//! and physics field, and projects the ranking into chart, table and
//! detail views. Also hosts the documentation page's TOC scroll tracking
//! and the news timeline.

pub mod chart;
pub mod config;
pub mod detail;
pub mod domain;
pub mod loader;
pub mod metrics;
pub mod news;
pub mod obs;
pub mod rank;
pub mod reporting;
pub mod table;
pub mod telemetry;
pub mod toc;
pub mod view;

pub use domain::{
    DataLoadError, DetailError, Field, IntegrityError, Leaderboard, LeaderboardError,
    ModelEntry, ModelScore, ParseSelectorError, RawModelEntry, Result, ScoreType,
    REFERENCE_BASELINE_ID,
};

pub use chart::{bars, chart_title, render_bar_chart, BarDatum};
pub use config::{RenderConfig, SiteConfig, DEFAULT_DATA_SOURCE, DEFAULT_NEWS_SOURCE};
pub use detail::{open_detail, DetailView, RadarChart, RadarSeries};
pub use loader::{
    load, load_or_empty, load_with_bytes, parse_leaderboard, source_for, BytesSource,
    DataSource, FileSource, HttpSource,
};
pub use news::{
    load_news, parse_news, render_timeline, ClampedText, NewsPost, Timeline, TimelineDay,
};
pub use rank::{rank, ranked_positions, Ranked};
pub use reporting::{
    data_digest, render_snapshot_md, write_snapshot_json, write_snapshot_md,
    LeaderboardSnapshot, SnapshotRow,
};
pub use table::{render_table, table_rows, TableRow};
pub use toc::{
    intersections, markdown_headings, Heading, HeadingBox, Intersection, Toc, TocItem, Viewport,
};
pub use view::{mount, LeaderboardView, MountGuard, MountToken, Selection};

pub use metrics::METRICS;
pub use obs::{
    emit_data_load_failed, emit_data_loaded, emit_detail_opened, emit_reranked,
    emit_toc_activated, ViewSpan,
};
pub use telemetry::init_tracing;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

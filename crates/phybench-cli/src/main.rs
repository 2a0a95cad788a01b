//! PHYBench Leaderboard CLI
//!
//! The `phybench` command renders the leaderboard and documentation TOC in
//! the terminal.
//!
//! ## Commands
//!
//! - `rank`: Bar chart and ranked table for a score type and field
//! - `detail`: Radar and per-field breakdown for one model
//! - `export`: Write a ranked snapshot as JSON (and optionally Markdown)
//! - `toc`: Table of contents for a Markdown document at a scroll position
//! - `news`: News timeline, newest day first

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use phybench_core::{
    intersections, load_news, load_with_bytes, markdown_headings, mount, render_timeline,
    source_for, write_snapshot_json, write_snapshot_md, BarDatum, Field, HeadingBox, LeaderboardSnapshot, LeaderboardView,
    MountGuard, RenderConfig, ScoreType, Selection, SiteConfig, TableRow, Toc, ViewSpan,
    Viewport, METRICS,
};

#[derive(Parser)]
#[command(name = "phybench")]
#[command(author = "PHYBench Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "PHYBench leaderboard and docs renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Leaderboard data file path or http(s) URL
    #[arg(long, env = "PHYBENCH_DATA")]
    data: Option<String>,

    /// Plain ASCII bars
    #[arg(long)]
    performance_mode: bool,

    /// Width of a full-score bar, in cells
    #[arg(long)]
    bar_width: Option<usize>,
}

impl DataArgs {
    /// Merge flags over the environment-derived config.
    fn resolve(&self) -> (String, RenderConfig) {
        let config = SiteConfig::from_env();
        let data = self.data.clone().unwrap_or(config.data_source);
        let mut render = config.render;
        if self.performance_mode {
            render = render.with_performance_mode(true);
        }
        if let Some(width) = self.bar_width {
            render = render.with_bar_width(width);
        }
        (data, render)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank models and print the bar chart and table
    Rank {
        #[command(flatten)]
        data: DataArgs,

        /// Score type: eed or acc
        #[arg(short, long, default_value = "eed")]
        score: ScoreType,

        /// Field: ALL, MECHANICS, ELECTRICITY, THERMODYNAMICS, OPTICS, MODERN, ADVANCED
        #[arg(short, long, default_value = "ALL")]
        field: Field,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the detail view for one model
    Detail {
        /// Model id
        id: String,

        #[command(flatten)]
        data: DataArgs,

        /// Score type used for the breakdown
        #[arg(short, long, default_value = "eed")]
        score: ScoreType,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write a ranked snapshot to disk
    Export {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short, long, default_value = "eed")]
        score: ScoreType,

        #[arg(short, long, default_value = "ALL")]
        field: Field,

        /// Output JSON path
        #[arg(short, long)]
        out: PathBuf,

        /// Optional Markdown output path
        #[arg(long)]
        markdown: Option<PathBuf>,
    },

    /// Print the table of contents of a Markdown document
    Toc {
        /// Markdown document
        doc: PathBuf,

        /// First visible line
        #[arg(long, default_value = "0")]
        scroll: usize,

        /// Visible lines
        #[arg(long, default_value = "40")]
        viewport: usize,
    },

    /// Print the news timeline
    News {
        /// News file path or http(s) URL
        #[arg(long, env = "PHYBENCH_NEWS")]
        news: Option<String>,

        /// Show full post text instead of the collapsed form
        #[arg(long)]
        expand: bool,

        /// Only days on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    phybench_core::init_tracing(cli.json_logs, level);

    let result = match cli.command {
        Commands::Rank {
            data,
            score,
            field,
            format,
        } => cmd_rank(&data, Selection::new(score, field), format).await,
        Commands::Detail {
            id,
            data,
            score,
            format,
        } => cmd_detail(&data, &id, score, format).await,
        Commands::Export {
            data,
            score,
            field,
            out,
            markdown,
        } => cmd_export(&data, Selection::new(score, field), &out, markdown.as_deref()).await,
        Commands::Toc {
            doc,
            scroll,
            viewport,
        } => cmd_toc(&doc, scroll, viewport),
        Commands::News {
            news,
            expand,
            since,
            format,
        } => cmd_news(news, expand, since, format).await,
    };

    METRICS.flush();
    result
}

/// Load the data file into a mounted view.
async fn open_view(data: &DataArgs) -> Result<LeaderboardView> {
    let (location, render) = data.resolve();
    let source = source_for(&location).context("Failed to create data source")?;
    let guard = MountGuard::new();
    let view = mount(source.as_ref(), &guard.token(), render)
        .await
        .with_context(|| format!("Failed to load leaderboard from {}", location))?
        .context("View was unmounted before the data arrived")?;
    Ok(view)
}

#[derive(Serialize)]
struct RankOutput<'a> {
    selection: Selection,
    chart: Vec<BarDatum<'a>>,
    table: Vec<TableRow>,
}

async fn cmd_rank(data: &DataArgs, selection: Selection, format: OutputFormat) -> Result<()> {
    let mut view = open_view(data).await?;
    let _span = ViewSpan::enter("leaderboard");
    view.select(selection);

    match format {
        OutputFormat::Json => {
            let output = RankOutput {
                selection: view.selection(),
                chart: view.chart().collect(),
                table: view.table(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}\n", view.render_chart());
            println!("{}", view.render_table());
        }
    }
    Ok(())
}

async fn cmd_detail(
    data: &DataArgs,
    id: &str,
    score: ScoreType,
    format: OutputFormat,
) -> Result<()> {
    let mut view = open_view(data).await?;
    let _span = ViewSpan::enter("detail");
    view.select_score_type(score);

    let detail = view
        .detail(id)
        .with_context(|| format!("Cannot open detail for {}", id))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
        OutputFormat::Text => println!("{}", detail.to_text()),
    }
    Ok(())
}

async fn cmd_export(
    data: &DataArgs,
    selection: Selection,
    out: &Path,
    markdown: Option<&Path>,
) -> Result<()> {
    let (location, render) = data.resolve();
    let source = source_for(&location).context("Failed to create data source")?;
    let (leaderboard, bytes) = load_with_bytes(source.as_ref())
        .await
        .with_context(|| format!("Failed to load leaderboard from {}", location))?;

    let mut view = LeaderboardView::new(leaderboard, render);
    view.select(selection);
    let snapshot = LeaderboardSnapshot::from_view(&view, &bytes);

    write_snapshot_json(out, &snapshot)?;
    info!(path = %out.display(), rows = snapshot.rows.len(), "snapshot written");
    println!("✓ Wrote {} rows to {}", snapshot.rows.len(), out.display());

    if let Some(md_path) = markdown {
        write_snapshot_md(md_path, &snapshot)?;
        println!("✓ Wrote Markdown to {}", md_path.display());
    }
    Ok(())
}

fn cmd_toc(doc: &Path, scroll: usize, viewport: usize) -> Result<()> {
    let content = std::fs::read_to_string(doc)
        .with_context(|| format!("Failed to read document: {:?}", doc))?;
    let _span = ViewSpan::enter("docs");

    let headings = markdown_headings(&content);
    let mut toc = Toc::from_headings(
        &headings
            .iter()
            .map(|(_, h)| h.clone())
            .collect::<Vec<_>>(),
    );
    if toc.is_empty() {
        println!("No level-2 headings found in {:?}", doc);
        return Ok(());
    }

    let boxes: Vec<HeadingBox> = headings
        .iter()
        .zip(toc.items())
        .map(|((line, _), item)| HeadingBox {
            heading_id: item.heading_id.clone(),
            top: *line as f64,
            height: 1.0,
        })
        .collect();
    let records = intersections(
        &boxes,
        Viewport {
            scroll_top: scroll as f64,
            height: viewport as f64,
        },
    );
    toc.observe(&records);

    println!("Contents");
    println!("========");
    for (i, item) in toc.items().iter().enumerate() {
        let marker = if toc.is_active(i) { '>' } else { ' ' };
        println!("{} {}  (#{})", marker, item.text, item.anchor_id);
    }
    println!("\nprogress: {:.0}%", toc.progress_percent());
    Ok(())
}

async fn cmd_news(
    news: Option<String>,
    expand: bool,
    since: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<()> {
    let location = news.unwrap_or_else(|| SiteConfig::from_env().news_source);
    let source = source_for(&location).context("Failed to create news source")?;
    let _span = ViewSpan::enter("news");

    let mut timeline = load_news(source.as_ref())
        .await
        .with_context(|| format!("Failed to load news from {}", location))?;
    if let Some(since) = since {
        timeline = timeline.since(since);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&timeline)?),
        OutputFormat::Text => println!("{}", render_timeline(&timeline, expand)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rank_parses_selectors() {
        let cli = Cli::try_parse_from([
            "phybench", "rank", "--score", "acc", "--field", "optics", "--format", "json",
        ])
        .expect("parse");
        match cli.command {
            Commands::Rank {
                score,
                field,
                format,
                ..
            } => {
                assert_eq!(score, ScoreType::Acc);
                assert_eq!(field, Field::Optics);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected rank"),
        }
    }

    #[test]
    fn news_parses_since_date() {
        let cli = Cli::try_parse_from(["phybench", "news", "--since", "2025-05-01", "--expand"])
            .expect("parse");
        match cli.command {
            Commands::News { since, expand, .. } => {
                assert_eq!(since, NaiveDate::from_ymd_opt(2025, 5, 1));
                assert!(expand);
            }
            _ => panic!("expected news"),
        }
        assert!(Cli::try_parse_from(["phybench", "news", "--since", "May 1"]).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(Cli::try_parse_from(["phybench", "rank", "--field", "QUANTUM"]).is_err());
    }

    #[test]
    fn flags_override_render_config() {
        let args = DataArgs {
            data: Some("board.json".to_string()),
            performance_mode: true,
            bar_width: Some(5),
        };
        let (data, render) = args.resolve();
        assert_eq!(data, "board.json");
        assert!(render.performance_mode);
        assert_eq!(render.bar_width, phybench_core::config::MIN_BAR_WIDTH);
    }
}

//! News timeline: dated posts about the benchmark, newest day first.
//!
//! Posts come from a JSON array (see `data/news.json`) fetched through the
//! same [`DataSource`] as the leaderboard. Long post text is collapsed to
//! [`COLLAPSED_LINES`] lines until expanded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::domain::{LeaderboardError, Result};
use crate::loader::DataSource;
use crate::obs;

/// Lines of post text shown while collapsed.
pub const COLLAPSED_LINES: usize = 10;

/// Where a post was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Arxiv,
    Huggingface,
    Wechat,
    X,
    #[serde(other)]
    Web,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Arxiv => "arXiv",
            SourceKind::Huggingface => "Hugging Face",
            SourceKind::Wechat => "WeChat",
            SourceKind::X => "X",
            SourceKind::Web => "web",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub handle: String,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub kind: SourceKind,
    pub url: String,
}

/// Preview card for a linked article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCard {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub views: Option<String>,
    #[serde(default)]
    pub likes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub author: String,
    pub text: String,
    /// Free-form, as shown under the reply (e.g. `May 1`).
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPost {
    pub date: NaiveDate,
    pub author: Author,
    #[serde(default)]
    pub source: Option<SourceLink>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub card: Option<LinkCard>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub reply: Option<Reply>,
}

impl NewsPost {
    pub fn body(&self) -> ClampedText<'_> {
        ClampedText::new(&self.text)
    }
}

/// Post text that shows at most [`COLLAPSED_LINES`] lines until expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedText<'a> {
    text: &'a str,
    expanded: bool,
}

impl<'a> ClampedText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            expanded: false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// True when the collapsed form hides some lines.
    pub fn is_truncated(&self) -> bool {
        self.text.lines().count() > COLLAPSED_LINES
    }

    /// The toggle is offered while text is hidden, and after expanding.
    pub fn shows_toggle(&self) -> bool {
        self.is_truncated() || self.expanded
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Show less"
        } else {
            "Show more"
        }
    }

    pub fn visible(&self) -> Cow<'a, str> {
        if self.expanded || !self.is_truncated() {
            return Cow::Borrowed(self.text);
        }
        let mut shown = self
            .text
            .lines()
            .take(COLLAPSED_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        shown.push_str(" …");
        Cow::Owned(shown)
    }
}

/// Posts grouped by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub posts: Vec<NewsPost>,
}

/// The whole timeline, newest day first. Posts of one day keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    days: Vec<TimelineDay>,
}

impl Timeline {
    pub fn from_posts(mut posts: Vec<NewsPost>) -> Self {
        // stable: same-day posts stay in file order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let mut days: Vec<TimelineDay> = Vec::new();
        for post in posts {
            match days.last_mut() {
                Some(day) if day.date == post.date => day.posts.push(post),
                _ => days.push(TimelineDay {
                    date: post.date,
                    posts: vec![post],
                }),
            }
        }
        Self { days }
    }

    pub fn days(&self) -> &[TimelineDay] {
        &self.days
    }

    pub fn post_count(&self) -> usize {
        self.days.iter().map(|d| d.posts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Keep only days on or after `since`.
    pub fn since(mut self, since: NaiveDate) -> Self {
        self.days.retain(|d| d.date >= since);
        self
    }
}

/// Parse a news document.
pub fn parse_news(bytes: &[u8]) -> Result<Timeline> {
    let posts: Vec<NewsPost> =
        serde_json::from_slice(bytes).map_err(|e| LeaderboardError::DataLoad(e.into()))?;
    Ok(Timeline::from_posts(posts))
}

/// Fetch and parse the news timeline.
pub async fn load_news(source: &dyn DataSource) -> Result<Timeline> {
    let location = source.describe();
    let outcome = match source.fetch().await {
        Ok(bytes) => parse_news(&bytes),
        Err(e) => Err(e.into()),
    };
    match &outcome {
        Ok(timeline) => obs::emit_data_loaded(&location, timeline.post_count()),
        Err(e) => obs::emit_data_load_failed(&location, e),
    }
    outcome
}

/// Render the timeline as terminal text.
pub fn render_timeline(timeline: &Timeline, expand: bool) -> String {
    if timeline.is_empty() {
        return "(no news)".to_string();
    }
    let mut out = String::new();
    for day in timeline.days() {
        out.push_str(&format!("{}\n", day.date.format("%Y-%m-%d")));
        out.push_str("==========\n");
        for post in &day.posts {
            render_post(&mut out, post, expand);
        }
    }
    out.trim_end().to_string()
}

fn render_post(out: &mut String, post: &NewsPost, expand: bool) {
    let check = if post.author.verified { " ✓" } else { "" };
    out.push_str(&format!(
        "{}{} @{} · {}\n",
        post.author.name,
        check,
        post.author.handle,
        post.date.format("%b %-d, %Y")
    ));
    if let Some(source) = &post.source {
        out.push_str(&format!("  via {}: {}\n", source.kind.label(), source.url));
    }

    let body = post.body().expanded(expand);
    for line in body.visible().lines() {
        out.push_str(&format!("  {}\n", line));
    }
    if body.shows_toggle() {
        out.push_str(&format!("  [{}]\n", body.toggle_label()));
    }

    if let Some(card) = &post.card {
        out.push_str(&format!("  > {}\n  > {}\n", card.title, card.url));
        if let (Some(views), Some(likes)) = (&card.views, &card.likes) {
            out.push_str(&format!("  > views {} · likes {}\n", views, likes));
        }
    }
    for image in &post.images {
        out.push_str(&format!("  [image: {}] {}\n", image.alt, image.src));
    }
    if let Some(reply) = &post.reply {
        out.push_str(&format!("    ↳ {}: {}", reply.author, reply.text));
        if !reply.timestamp.is_empty() {
            out.push_str(&format!(" ({})", reply.timestamp));
        }
        out.push('\n');
    }
    out.push('\n');
}

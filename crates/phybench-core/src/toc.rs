//! Table of contents with scroll tracking for the documentation page.
//!
//! The TOC is built from level-2 headings. Heading positions are reported
//! as [`HeadingBox`]es; [`intersections`] decides which of them are inside
//! the observation band of a [`Viewport`], and [`Toc::observe`] moves the
//! active entry accordingly.

use serde::{Deserialize, Serialize};

use crate::obs;

/// Fraction of the viewport height cut from the top of the observation band.
pub const ROOT_MARGIN_TOP: f64 = 0.2;
/// Fraction of the viewport height cut from the bottom of the band.
pub const ROOT_MARGIN_BOTTOM: f64 = 0.6;
/// Minimum visible fraction of a heading for it to count as intersecting.
pub const INTERSECTION_THRESHOLD: f64 = 0.2;

/// A heading as found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub id: Option<String>,
    pub text: String,
}

impl Heading {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Id of the observed heading.
    pub heading_id: String,
    /// Link target, placed just above the heading.
    pub anchor_id: String,
    pub text: String,
}

/// Vertical extent of a rendered heading, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBox {
    pub heading_id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

impl Viewport {
    /// `(top, bottom)` of the observation band.
    pub fn band(&self) -> (f64, f64) {
        (
            self.scroll_top + self.height * ROOT_MARGIN_TOP,
            self.scroll_top + self.height * (1.0 - ROOT_MARGIN_BOTTOM),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub heading_id: String,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Compute an intersection record for every box against the band.
///
/// Zero-height boxes count as fully visible when their top is in the band.
pub fn intersections(boxes: &[HeadingBox], viewport: Viewport) -> Vec<Intersection> {
    let (band_top, band_bottom) = viewport.band();
    boxes
        .iter()
        .map(|b| {
            let ratio = if b.height <= 0.0 {
                if (band_top..=band_bottom).contains(&b.top) {
                    1.0
                } else {
                    0.0
                }
            } else {
                let visible = (band_bottom.min(b.top + b.height) - band_top.max(b.top)).max(0.0);
                (visible / b.height).min(1.0)
            };
            Intersection {
                heading_id: b.heading_id.clone(),
                is_intersecting: ratio > 0.0 && ratio >= INTERSECTION_THRESHOLD,
                ratio,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toc {
    items: Vec<TocItem>,
    active: Option<usize>,
}

impl Toc {
    /// Build items from headings, filling in missing ids and text.
    pub fn from_headings(headings: &[Heading]) -> Self {
        let items = headings
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let heading_id = h
                    .id
                    .clone()
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("heading-{}", i));
                let text = if h.text.trim().is_empty() {
                    format!("Section {}", i + 1)
                } else {
                    h.text.trim().to_string()
                };
                TocItem {
                    anchor_id: format!("anchor-{}", heading_id),
                    heading_id,
                    text,
                }
            })
            .collect();
        Self {
            items,
            active: None,
        }
    }

    /// Build from the `## ` headings of a Markdown document.
    pub fn from_markdown(markdown: &str) -> Self {
        let headings: Vec<Heading> = markdown_headings(markdown)
            .into_iter()
            .map(|(_, h)| h)
            .collect();
        Self::from_headings(&headings)
    }

    pub fn items(&self) -> &[TocItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&TocItem> {
        self.active.and_then(|i| self.items.get(i))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Apply a batch of intersection records.
    ///
    /// The last intersecting record for a known heading wins. Records for
    /// unknown headings are ignored and nothing intersecting leaves the
    /// active entry unchanged. Returns the active index afterwards.
    pub fn observe(&mut self, records: &[Intersection]) -> Option<usize> {
        let previous = self.active;
        for record in records.iter().filter(|r| r.is_intersecting) {
            if let Some(index) = self
                .items
                .iter()
                .position(|item| item.heading_id == record.heading_id)
            {
                self.active = Some(index);
            }
        }
        if let Some(index) = self.active.filter(|_| self.active != previous) {
            obs::emit_toc_activated(
                &self.items[index].heading_id,
                index,
                self.progress_percent(),
            );
        }
        self.active
    }

    /// How far through the TOC the active item is, in percent.
    pub fn progress_percent(&self) -> f64 {
        match self.active {
            None => 0.0,
            Some(_) if self.items.is_empty() => 0.0,
            Some(i) if i + 1 >= self.items.len() => 100.0,
            Some(i) => i as f64 / (self.items.len() - 1) as f64 * 100.0,
        }
    }
}

/// `## ` headings of a Markdown document with their 0-based line numbers.
///
/// A trailing `{#id}` sets the heading id. Fenced code blocks are skipped
/// (a fence closes only with the same marker, at least as long), and lines
/// indented four or more columns are code, not headings.
pub fn markdown_headings(markdown: &str) -> Vec<(usize, Heading)> {
    let mut fence: Option<(char, usize)> = None;
    let mut out = Vec::new();
    for (line_no, line) in markdown.lines().enumerate() {
        let (indent, trimmed) = split_indent(line);
        if indent >= 4 {
            continue;
        }
        match fence {
            Some(open) => {
                if closes_fence(trimmed, open) {
                    fence = None;
                }
                continue;
            }
            None => {
                if let Some(open) = opening_fence(trimmed) {
                    fence = Some(open);
                    continue;
                }
            }
        }
        let Some(rest) = trimmed.strip_prefix("##") else {
            continue;
        };
        if !(rest.is_empty() || rest.starts_with(' ')) {
            continue;
        }
        out.push((line_no, parse_heading_text(rest.trim())));
    }
    out
}

/// Indent width in columns (tab = 4) and the rest of the line.
fn split_indent(line: &str) -> (usize, &str) {
    let mut width = 0;
    for (i, c) in line.char_indices() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => return (width, &line[i..]),
        }
    }
    (width, "")
}

fn opening_fence(trimmed: &str) -> Option<(char, usize)> {
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len))
}

fn closes_fence(trimmed: &str, (marker, open_len): (char, usize)) -> bool {
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    len >= open_len && trimmed[len * marker.len_utf8()..].trim().is_empty()
}

fn parse_heading_text(text: &str) -> Heading {
    let text = text.trim_end_matches('#').trim_end();
    if let Some(open) = text.rfind("{#") {
        if let Some(id) = text[open + 2..].strip_suffix('}') {
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return Heading::new(text[..open].trim_end()).with_id(id);
            }
        }
    }
    Heading::new(text)
}

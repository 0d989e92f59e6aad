//! Page layout: wrapped lines plus section anchors in pixel space.
//!
//! A page is laid out for a given content width into a flat list of
//! [`PageLine`]s. Sections register an [`Anchor`] at the line where they
//! start. One terminal row is [`ROW_HEIGHT_PX`] pixels tall, so scroll
//! offsets and anchor tops share one coordinate space.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::signal::AnchorLookup;

/// Height of one terminal row in layout pixels.
pub const ROW_HEIGHT_PX: u32 = 20;

/// Styling class of a laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Page or hero title
    Title,
    /// Hero subtitle or page subtitle
    Subtitle,
    /// Section heading
    Heading,
    /// Card or subsection heading
    Subheading,
    Body,
    /// Small print: dates, categories, read times
    Meta,
    /// A button-like call to action
    Action,
    /// A form input; `focused` marks the one receiving keystrokes
    Input { focused: bool },
    Rule,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub text: String,
    pub kind: LineKind,
}

impl PageLine {
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A section anchor at a line of the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub id: String,
    pub line: usize,
}

impl Anchor {
    pub fn top_px(&self) -> u32 {
        line_to_px(self.line)
    }
}

/// Pixel offset of the top of `line`.
pub fn line_to_px(line: usize) -> u32 {
    u32::try_from(line)
        .unwrap_or(u32::MAX)
        .saturating_mul(ROW_HEIGHT_PX)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    lines: Vec<PageLine>,
    anchors: Vec<Anchor>,
    width: u16,
}

impl PageLayout {
    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Line where the anchor `id` starts.
    pub fn anchor_line(&self, id: &str) -> Option<usize> {
        self.anchors
            .iter()
            .find(|anchor| anchor.id == id)
            .map(|anchor| anchor.line)
    }

    /// Total height in pixels.
    pub fn height_px(&self) -> u32 {
        line_to_px(self.lines.len())
    }

    /// Lines from `offset` to `offset + count`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[PageLine] {
        let start = offset.min(self.lines.len());
        let end = offset.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }
}

impl AnchorLookup for PageLayout {
    fn anchor_top(&self, id: &str) -> Option<u32> {
        self.anchor_line(id).map(line_to_px)
    }
}

/// Incremental layout writer.
#[derive(Debug)]
pub struct LayoutBuilder {
    width: u16,
    lines: Vec<PageLine>,
    anchors: Vec<Anchor>,
}

impl LayoutBuilder {
    /// Start a layout wrapping text to `width` columns (at least 8).
    pub fn new(width: u16) -> Self {
        Self {
            width: width.max(8),
            lines: Vec::new(),
            anchors: Vec::new(),
        }
    }

    /// Register a section anchor at the next line.
    ///
    /// A second anchor with an id already in use is ignored so ids stay
    /// unique.
    pub fn anchor(&mut self, id: &str) -> &mut Self {
        if self.anchors.iter().any(|anchor| anchor.id == id) {
            tracing::warn!(id, "duplicate section anchor ignored");
        } else {
            self.anchors.push(Anchor {
                id: id.to_string(),
                line: self.lines.len(),
            });
        }
        self
    }

    pub fn text(&mut self, text: &str, kind: LineKind) -> &mut Self {
        self.indented(text, kind, "", "")
    }

    /// Wrapped text with a prefix on the first line and another on the
    /// continuation lines.
    pub fn indented(&mut self, text: &str, kind: LineKind, first: &str, rest: &str) -> &mut Self {
        let prefix_width = first.width().max(rest.width());
        let avail = usize::from(self.width).saturating_sub(prefix_width).max(1);
        for (i, line) in wrap_text(text, avail).into_iter().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            self.lines.push(PageLine::new(format!("{prefix}{line}"), kind));
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(PageLine::new(String::new(), LineKind::Blank));
        self
    }

    pub fn rule(&mut self) -> &mut Self {
        self.lines
            .push(PageLine::new("─".repeat(usize::from(self.width)), LineKind::Rule));
        self
    }

    pub fn build(self) -> PageLayout {
        PageLayout {
            lines: self.lines,
            anchors: self.anchors,
            width: self.width,
        }
    }
}

/// Greedy word wrap by display width.
///
/// Words wider than `width` (long CJK runs have no spaces) are broken
/// between characters. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let gap = usize::from(!current.is_empty());
        if current_width + gap + word_width <= width {
            if gap == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += gap + word_width;
            continue;
        }
        if word_width <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        // Break an over-long word, continuing on the current line.
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current).trim_end().to_string());
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

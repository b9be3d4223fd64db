//! Markdown display pipeline
//!
//! Converts the constrained dialect used by the analysis agents (headers
//! `#`/`##`/`###`, bold `**text**`, italic `*text*`, `- ` bullets, line
//! breaks) into block/inline tokens the UI styles directly.
//!
//! Two explicit passes, order is part of the contract:
//! 1. Line pass: each source line becomes one [`Block`] (longest header
//!    prefix wins, so `###` is checked before `##` before `#`).
//! 2. Inline pass: bold is resolved before italic, so `**x**` can never be
//!    mis-parsed as nested italics; italic then runs over the remaining
//!    text, including bold interiors.
//!
//! Lenient: unrecognized or unterminated syntax stays literal
//! text, never an error. One-directional display transform; the original
//! markup is not reconstructible from the output.

/// A styled span of inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    /// Italic marker inside a bold span; both styles apply.
    BoldItalic(String),
}

impl Inline {
    /// The visible characters of the span, markers stripped.
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(s) | Inline::Bold(s) | Inline::Italic(s) | Inline::BoldItalic(s) => s,
        }
    }
}

/// One display line of the formatted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`/`##`/`###` heading; level is 1-3.
    Heading { level: u8, spans: Vec<Inline> },
    /// Line starting with `- `.
    Bullet(Vec<Inline>),
    Paragraph(Vec<Inline>),
    Blank,
}

impl Block {
    /// Visible text of the whole line, markers stripped.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { spans, .. } | Block::Bullet(spans) | Block::Paragraph(spans) => {
                spans.iter().map(Inline::text).collect()
            }
            Block::Blank => String::new(),
        }
    }
}

/// Tokenize markup into display blocks, one per source line.
///
/// Line breaks are the final pass of the original transform; here every
/// source line is its own block and blank lines survive as [`Block::Blank`],
/// which preserves the same visual structure.
pub fn parse(text: &str) -> Vec<Block> {
    text.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> Block {
    if line.trim().is_empty() {
        return Block::Blank;
    }
    // Longest prefix first, and the space is required, matching the dialect.
    if let Some(rest) = line.strip_prefix("### ") {
        return Block::Heading {
            level: 3,
            spans: parse_inlines(rest),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            spans: parse_inlines(rest),
        };
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Block::Heading {
            level: 1,
            spans: parse_inlines(rest),
        };
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return Block::Bullet(parse_inlines(rest));
    }
    Block::Paragraph(parse_inlines(line))
}

/// Inline pass: bold first, then italic over every remaining segment.
fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    for segment in split_bold(text) {
        match segment {
            BoldSegment::Bold(inner) => {
                // `****` yields an empty bold span, matching the dialect.
                if inner.is_empty() {
                    spans.push(Inline::Bold(String::new()));
                    continue;
                }
                for span in split_italic(&inner) {
                    match span {
                        ItalicSegment::Italic(s) => spans.push(Inline::BoldItalic(s)),
                        ItalicSegment::Plain(s) => spans.push(Inline::Bold(s)),
                    }
                }
            }
            BoldSegment::Plain(outer) => {
                for span in split_italic(&outer) {
                    match span {
                        ItalicSegment::Italic(s) => spans.push(Inline::Italic(s)),
                        ItalicSegment::Plain(s) => spans.push(Inline::Text(s)),
                    }
                }
            }
        }
    }
    spans
}

enum BoldSegment {
    Bold(String),
    Plain(String),
}

/// Split on non-greedy `**...**` pairs; an unpaired `**` stays literal.
fn split_bold(text: &str) -> Vec<BoldSegment> {
    let mut segments = Vec::new();
    let mut rest = text;
    loop {
        let Some(open) = rest.find("**") else {
            break;
        };
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        if open > 0 {
            segments.push(BoldSegment::Plain(rest[..open].to_string()));
        }
        segments.push(BoldSegment::Bold(after_open[..close].to_string()));
        rest = &after_open[close + 2..];
    }
    if !rest.is_empty() {
        segments.push(BoldSegment::Plain(rest.to_string()));
    }
    segments
}

enum ItalicSegment {
    Italic(String),
    Plain(String),
}

/// Split on non-greedy `*...*` pairs; an unpaired `*` stays literal.
fn split_italic(text: &str) -> Vec<ItalicSegment> {
    let mut segments = Vec::new();
    let mut rest = text;
    loop {
        let Some(open) = rest.find('*') else {
            break;
        };
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('*') else {
            break;
        };
        if open > 0 {
            segments.push(ItalicSegment::Plain(rest[..open].to_string()));
        }
        segments.push(ItalicSegment::Italic(after_open[..close].to_string()));
        rest = &after_open[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(ItalicSegment::Plain(rest.to_string()));
    }
    segments
}

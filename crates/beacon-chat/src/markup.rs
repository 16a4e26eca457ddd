//! Emphasis markup used in composed replies.
//!
//! Replies mark bold text with paired `**` delimiters. Renderers split each
//! line into [`Segment`]s and style the emphasised runs however they like.

use std::sync::LazyLock;

use regex::Regex;

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid emphasis regex"));

/// A run of reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Emphasis(&'a str),
}

/// Split `text` into plain and emphasised runs.
///
/// Delimiters are matched non-greedily; an unpaired `**` stays plain text.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for caps in EMPHASIS_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            out.push(Segment::Plain(&text[cursor..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            out.push(Segment::Emphasis(inner.as_str()));
        }
        cursor = whole.end();
    }

    if cursor < text.len() {
        out.push(Segment::Plain(&text[cursor..]));
    }
    out
}

/// Strip the markup, keeping only the visible text.
pub fn to_plain(text: &str) -> String {
    segments(text)
        .into_iter()
        .map(|s| match s {
            Segment::Plain(t) | Segment::Emphasis(t) => t,
        })
        .collect()
}

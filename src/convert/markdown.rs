//! Markdown helpers: front matter stripping and heading anchors.
//!
//! Headings may carry an explicit anchor as a trailing `{#custom-id}`.
//! Without one, the anchor is a GitHub-style slug of the heading text,
//! with `-1`, `-2`, ... appended to repeats.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A heading and the anchor it can be linked by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingAnchor {
    pub level: usize,
    pub text: String,
    pub anchor: String,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(#{1,6})[ \t]+(.*?)[ \t]*$").unwrap())
}

fn custom_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*\{#([a-zA-Z0-9_-]+)\}\s*$").unwrap())
}

/// Remove a leading `---` delimited YAML block.
///
/// Text without a complete front matter block is returned unchanged.
///
/// ```
/// use mastery::convert::strip_frontmatter;
///
/// assert_eq!(strip_frontmatter("---\ntitle: Guide\n---\n# Guide\n"), "# Guide\n");
/// assert_eq!(strip_frontmatter("# No front matter"), "# No front matter");
/// ```
pub fn strip_frontmatter(text: &str) -> &str {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return text;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end() == "---" {
            return &rest[offset..];
        }
    }
    text
}

/// GitHub-style slug: lowercase, punctuation dropped, spaces become `-`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// Split a trailing `{#id}` off heading text.
fn split_custom_id(text: &str) -> (&str, Option<&str>) {
    match custom_id_pattern().captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(text.len(), |m| m.start());
            (&text[..whole], caps.get(1).map(|m| m.as_str()))
        }
        None => (text, None),
    }
}

/// Extract ATX headings outside fenced code blocks.
pub fn headings(body: &str) -> Vec<HeadingAnchor> {
    let mut anchors = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut fence: Option<char> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();

        // Track ``` and ~~~ fences so commented code is not read as headings
        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                Some(open) if open == marker => fence = None,
                Some(_) => {}
                None => fence = Some(marker),
            }
            continue;
        }
        if fence.is_some() {
            continue;
        }

        let Some(caps) = heading_pattern().captures(line) else {
            continue;
        };
        let level = caps[1].len();
        let (text, custom) = split_custom_id(&caps[2]);
        let text = text.trim().to_string();

        let anchor = match custom {
            Some(id) => id.to_string(),
            None => {
                let base = slugify(&text);
                let count = seen.entry(base.clone()).or_insert(0);
                let anchor = if *count == 0 {
                    base
                } else {
                    format!("{base}-{count}")
                };
                *count += 1;
                anchor
            }
        };

        anchors.push(HeadingAnchor {
            level,
            text,
            anchor,
        });
    }

    anchors
}

fn fence_marker(line: &str) -> Option<char> {
    if line.starts_with("```") {
        Some('`')
    } else if line.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

/// A heading line with any `{#id}` suffix removed, for display.
pub fn display_heading(line: &str) -> Cow<'_, str> {
    if !heading_pattern().is_match(line) {
        return Cow::Borrowed(line);
    }
    match split_custom_id(line) {
        (text, Some(_)) => Cow::Borrowed(text),
        (_, None) => Cow::Borrowed(line),
    }
}

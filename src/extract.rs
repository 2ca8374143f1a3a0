// ABOUTME: Slide extractor for the mdslides application
// ABOUTME: Derives a title and body text from a single slide block

use crate::segment::SlideBlock;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Opening/closing marker of a fenced code section
pub const CODE_FENCE: &str = "```";

static SLIDE_NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Slide\s+\d+:\s*").expect("slide number prefix pattern is valid")
});

/// Title and body text of one slide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSlide {
    pub title: String,
    pub body: String,
}

impl ParsedSlide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Extract the title and body from a slide block.
///
/// The first heading, `Slide N: Title` line or other non-blank line becomes the
/// title. Fenced code is copied into the body verbatim and never supplies a
/// title. An empty title is returned when nothing qualifies; callers supply
/// their own fallback.
pub fn extract(block: &SlideBlock<'_>) -> ParsedSlide {
    let text = block.text();
    let mut title = String::new();
    let mut body: Vec<&str> = Vec::new();
    let mut in_code_fence = false;

    for line in text.trim().lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() && title.is_empty() {
            continue;
        }

        if trimmed.starts_with(CODE_FENCE) {
            in_code_fence = !in_code_fence;
            continue;
        }

        if in_code_fence {
            body.push(line);
            continue;
        }

        if title.is_empty() {
            if let Some(candidate) = heading_title(line) {
                title = candidate;
                continue;
            }
            if line.contains("Slide") {
                if let Some((_, rest)) = line.split_once(':') {
                    title = rest.trim().to_string();
                    continue;
                }
            }
            if !trimmed.is_empty() {
                title = trimmed.to_string();
                continue;
            }
        }

        if !trimmed.is_empty() {
            body.push(line);
        }
    }

    if in_code_fence {
        debug!("Slide block ends inside an unterminated code fence");
    }

    ParsedSlide {
        title,
        body: body.join("\n"),
    }
}

/// Title from a level-1 or level-2 heading line, if `line` is one
fn heading_title(line: &str) -> Option<String> {
    let rest = line
        .strip_prefix("# ")
        .or_else(|| line.strip_prefix("## "))?;
    Some(strip_slide_number(rest.trim()).to_string())
}

/// Remove a leading `Slide <digits>:` label
fn strip_slide_number(title: &str) -> &str {
    match SLIDE_NUMBER_PREFIX.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

// ABOUTME: Segmenter for the mdslides application
// ABOUTME: Splits markdown text into slide blocks on `---` separator lines

use std::iter::FusedIterator;
use std::str::Lines;

/// Line content (after trimming) that ends one slide and starts the next
pub const SLIDE_SEPARATOR: &str = "---";

/// The lines belonging to a single slide, borrowed from the source text.
///
/// A block produced by [`segment`] always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideBlock<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SlideBlock<'a> {
    pub fn new(lines: Vec<&'a str>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// The block's lines joined back together with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Lazy iterator over the slide blocks of a document.
///
/// Created by [`segment`].
pub struct Segments<'a> {
    lines: Lines<'a>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = SlideBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = Vec::new();

        for line in self.lines.by_ref() {
            if line.trim() == SLIDE_SEPARATOR {
                // Adjacent or leading separators produce no empty blocks
                if !current.is_empty() {
                    return Some(SlideBlock::new(current));
                }
                continue;
            }
            current.push(line);
        }

        if current.is_empty() {
            None
        } else {
            Some(SlideBlock::new(current))
        }
    }
}

impl FusedIterator for Segments<'_> {}

/// Split `text` into slide blocks.
///
/// Text without separator lines yields a single block; empty text yields none.
pub fn segment(text: &str) -> Segments<'_> {
    Segments {
        lines: text.lines(),
    }
}

// ABOUTME: Library module for the mdslides program.
// ABOUTME: Contains the markdown segmenter, slide extractor and PPTX writer.

pub mod config;
pub mod deck;
pub mod errors;
pub mod extract;
pub mod pptx;
pub mod segment;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use deck::{ConversionReport, build_presentation, convert, parse_slides, read_document};
pub use errors::{DeckError, Result};
pub use extract::{ParsedSlide, extract};
pub use pptx::{Presentation, SlideLayout};
pub use segment::{SlideBlock, segment};

#[cfg(test)]
mod tests;

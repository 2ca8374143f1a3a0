// ABOUTME: Deck pipeline for the mdslides application
// ABOUTME: Reads markdown, parses slides and renders them into a presentation

use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::extract::{ParsedSlide, extract};
use crate::pptx::{
    ParagraphStyle, Presentation, RgbColor, SlideLayout, TextStyle, inches,
};
use crate::segment::segment;
use crate::utils;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Slide width in inches
pub const SLIDE_WIDTH_IN: f64 = 10.0;

/// Slide height in inches
pub const SLIDE_HEIGHT_IN: f64 = 7.5;

/// Formatting of every slide title
pub fn title_style() -> TextStyle {
    TextStyle {
        size: 44.0,
        bold: true,
        color: Some(RgbColor(0, 51, 102)),
    }
}

/// Formatting of every body paragraph
pub fn body_style() -> ParagraphStyle {
    ParagraphStyle {
        size: 18.0,
        space_after: 12.0,
    }
}

/// Outcome of a completed conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub slides: Vec<ParsedSlide>,
}

impl ConversionReport {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Read the whole markdown document into memory
pub fn read_document(path: &Path) -> Result<String> {
    info!("Reading markdown document: {:?}", path);
    utils::validate_file_exists(path)?;
    fs::read_to_string(path).map_err(DeckError::FileReadError)
}

/// Title used for the slide at 1-based `position` when none could be extracted
pub fn fallback_title(position: usize) -> String {
    format!("Slide {}", position)
}

/// Split a document into slides, filling in positional titles where needed
pub fn parse_slides(text: &str) -> Vec<ParsedSlide> {
    segment(text)
        .enumerate()
        .map(|(i, block)| {
            let mut slide = extract(&block);
            if slide.title.is_empty() {
                debug!("Slide {} has no title, using fallback", i + 1);
                slide.title = fallback_title(i + 1);
            }
            slide
        })
        .collect()
}

/// Render parsed slides, in order, into a new presentation
pub fn build_presentation(slides: &[ParsedSlide], config: &Config) -> Presentation {
    let mut presentation = Presentation::new(inches(SLIDE_WIDTH_IN), inches(SLIDE_HEIGHT_IN))
        .with_properties(config.get_document_properties());

    for parsed in slides {
        let slide = presentation.add_slide(SlideLayout::TitleAndContent);
        slide.set_title(parsed.title.as_str()).set_title_style(title_style());
        // Empty bodies leave the content placeholder untouched
        if !parsed.body.trim().is_empty() {
            slide
                .set_body(parsed.body.as_str())
                .set_body_paragraph_style(body_style());
        }
    }

    presentation
}

/// Convert the configured markdown file into a presentation on disk
pub fn convert(config: &Config) -> Result<ConversionReport> {
    let text = read_document(&config.input_path)?;
    let slides = parse_slides(&text);
    info!("Found {} slides", slides.len());

    let presentation = build_presentation(&slides, config);
    presentation.save(&config.output_path)?;

    Ok(ConversionReport {
        output_path: config.output_path.clone(),
        slides,
    })
}

use super::*;
use std::fs;
use std::io::Read;
use tempfile::TempDir;
use zip::ZipArchive;

fn read_slide_xml(pptx_path: &std::path::Path, slide_num: usize) -> String {
    let file = fs::File::open(pptx_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    let mut part = archive
        .by_name(&format!("ppt/slides/slide{}.xml", slide_num))
        .expect("Missing slide part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("Failed to read slide XML");
    xml
}

#[test]
fn test_parse_slides_headings_and_slide_labels() {
    let slides = parse_slides("# Intro\nHello\n---\n## Slide 2: Details\nMore text\n");

    assert_eq!(
        slides,
        vec![
            ParsedSlide::new("Intro", "Hello"),
            ParsedSlide::new("Details", "More text"),
        ]
    );
}

#[test]
fn test_parse_slides_plain_slide_label() {
    let slides = parse_slides("Slide 1: Welcome\nBody line\n");
    assert_eq!(slides, vec![ParsedSlide::new("Welcome", "Body line")]);
}

#[test]
fn test_parse_slides_empty_input() {
    assert!(parse_slides("").is_empty());
}

#[test]
fn test_parse_slides_positional_fallback_title() {
    let slides = parse_slides("# First\n---\n```\ncode here\n```\n");

    assert_eq!(slides.len(), 2);
    assert_eq!(slides[1], ParsedSlide::new("Slide 2", "code here"));
}

#[test]
fn test_build_presentation_uses_title_and_content_layout() {
    let slides = vec![
        ParsedSlide::new("Agenda", "- one\n- two"),
        ParsedSlide::new("Questions?", ""),
    ];
    let presentation = build_presentation(&slides, &Config::new());

    assert_eq!(presentation.width(), 9_144_000);
    assert_eq!(presentation.height(), 6_858_000);
    assert_eq!(presentation.properties().title, "QuickAI Presentation");

    let built = presentation.slides();
    assert_eq!(built.len(), 2);
    assert_eq!(built[0].layout(), SlideLayout::TitleAndContent);
    assert_eq!(built[0].title(), "Agenda");
    assert_eq!(built[0].body(), Some("- one\n- two"));
    assert_eq!(built[1].layout(), SlideLayout::TitleAndContent);
    assert_eq!(built[1].body(), None);
}

#[test]
fn test_convert_writes_presentation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("deck.md");
    let output = temp_dir.path().join("out").join("deck.pptx");
    fs::write(
        &input,
        "# Slide 1: Overview\n- Fast\n- Small\n---\n## Code\n```\nfn main() {}\n```\n",
    )
    .expect("Failed to write markdown file");

    let config = Config::new().with_paths(Some(input), Some(output.clone()));
    let report = convert(&config).expect("Conversion failed");

    assert_eq!(report.slide_count(), 2);
    assert_eq!(report.output_path, output);
    assert!(output.exists(), "PPTX file was not created");

    let first = read_slide_xml(&output, 1);
    assert!(first.contains("<a:t>Overview</a:t>"));
    assert!(first.contains("<a:t>- Fast</a:t>"));
    assert!(first.contains(r#"<a:srgbClr val="003366"/>"#));

    let second = read_slide_xml(&output, 2);
    assert!(second.contains("<a:t>fn main() {}</a:t>"));
}

#[test]
fn test_convert_empty_document_still_saves() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("empty.md");
    let output = temp_dir.path().join("empty.pptx");
    fs::write(&input, "").expect("Failed to write markdown file");

    let config = Config::new().with_paths(Some(input), Some(output.clone()));
    let report = convert(&config).expect("Conversion failed");

    assert_eq!(report.slide_count(), 0);
    assert!(output.exists(), "PPTX file was not created");
}

#[test]
fn test_convert_missing_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("missing.md");
    let output = temp_dir.path().join("never.pptx");

    let config = Config::new().with_paths(Some(input.clone()), Some(output.clone()));
    match convert(&config) {
        Err(DeckError::PathNotFoundError(path)) => assert_eq!(path, input),
        other => panic!("Expected PathNotFoundError, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_control_characters_survive_as_valid_xml() {
    let slides = parse_slides("# Title\u{B}with vt\nbody\u{1}line\n");
    let presentation = build_presentation(&slides, &Config::new());

    let mut buffer = std::io::Cursor::new(Vec::new());
    presentation
        .write_to(&mut buffer)
        .expect("Failed to write package");
    let mut archive = ZipArchive::new(buffer).expect("Failed to read package");
    let mut xml = String::new();
    archive
        .by_name("ppt/slides/slide1.xml")
        .expect("Missing slide part")
        .read_to_string(&mut xml)
        .expect("Failed to read slide XML");

    assert!(!xml.contains('\u{B}') && !xml.contains('\u{1}'));
    assert!(xml.contains("<a:br/>"));
    assert!(xml.contains("<a:t>body_x0001_line</a:t>"));
}

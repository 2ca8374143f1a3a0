// ABOUTME: Main entry point for the mdslides program.
// ABOUTME: Converts a markdown outline into a PowerPoint deck and reports progress.

use anyhow::Context;
use clap::Parser;
use mdslides::{Config, DeckError, utils};
use std::path::PathBuf;

/// Longest title prefix shown in progress output
const TITLE_PREVIEW_CHARS: usize = 50;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Markdown file to convert [default: QuickAI_Presentation.md]
    input: Option<PathBuf>,

    /// Presentation file to write [default: QuickAI_Presentation.pptx]
    output: Option<PathBuf>,

    /// Enable informational logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::from_env().with_paths(cli.input, cli.output);

    // Failures are reported on the console; the exit status stays zero
    if let Err(e) = run(&config) {
        match e.downcast_ref::<DeckError>() {
            Some(DeckError::PathNotFoundError(path)) => {
                println!("[ERROR] {} not found!", path.display());
                println!("Make sure you're running this command from the directory containing it");
            }
            _ => println!("[ERROR] {:#}", e),
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    println!("Reading markdown file: {}", config.input_path.display());
    let text = mdslides::read_document(&config.input_path)?;

    let slides = mdslides::parse_slides(&text);
    println!("Found {} slides", slides.len());

    for (i, slide) in slides.iter().enumerate() {
        println!(
            "Processing slide {}: {}...",
            i + 1,
            utils::truncate_chars(&slide.title, TITLE_PREVIEW_CHARS)
        );
    }

    let presentation = mdslides::build_presentation(&slides, config);
    presentation.save(&config.output_path).with_context(|| {
        format!(
            "Failed to save presentation to {}",
            config.output_path.display()
        )
    })?;

    println!();
    println!(
        "[SUCCESS] Presentation saved to: {}",
        config.output_path.display()
    );
    println!("Total slides: {}", slides.len());
    Ok(())
}

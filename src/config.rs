// ABOUTME: Configuration module for the mdslides application
// ABOUTME: Provides default paths, document metadata and environment variable handling

use crate::pptx::DocumentProperties;
use std::env;
use std::path::PathBuf;

/// Markdown file converted when no input is given
pub const DEFAULT_INPUT: &str = "QuickAI_Presentation.md";

/// Presentation written when no output is given
pub const DEFAULT_OUTPUT: &str = "QuickAI_Presentation.pptx";

const DEFAULT_TITLE: &str = "QuickAI Presentation";
const DEFAULT_AUTHOR: &str = "QuickAI";
const DEFAULT_COMPANY: &str = "QuickAI";

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub title: String,
    pub author: String,
    pub company: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            company: DEFAULT_COMPANY.to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|value| !value.trim().is_empty());

        Self {
            title: non_empty("DECK_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            author: non_empty("DECK_AUTHOR").unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            company: non_empty("DECK_COMPANY").unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            ..Self::default()
        }
    }

    /// Override the input and output paths, keeping the defaults for any left unset
    pub fn with_paths(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input_path = input;
        }
        if let Some(output) = output {
            self.output_path = output;
        }
        self
    }

    /// Get the document properties written into the presentation package
    pub fn get_document_properties(&self) -> DocumentProperties {
        DocumentProperties {
            title: self.title.clone(),
            author: self.author.clone(),
            company: self.company.clone(),
        }
    }
}

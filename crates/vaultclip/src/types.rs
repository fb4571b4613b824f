//! Core types for VaultClip

use crate::filename::Profile;
use std::fmt;
use std::path::PathBuf;

/// Raw page fetched from the network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// The fetched URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

/// Main article region isolated by the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDocument {
    /// Best-guess title, empty when none was found
    pub title: String,
    /// Partial markup of the article body
    pub content_fragment: String,
}

impl ArticleDocument {
    /// True when extraction produced nothing usable
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content_fragment.trim().is_empty()
    }
}

/// Block-level tag kinds the selector keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Paragraph,
    Heading2,
    Heading3,
    Blockquote,
    ListItem,
}

impl TagKind {
    /// Map an HTML element name to a tag kind
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "p" => Some(TagKind::Paragraph),
            "h2" => Some(TagKind::Heading2),
            "h3" => Some(TagKind::Heading3),
            "blockquote" => Some(TagKind::Blockquote),
            "li" => Some(TagKind::ListItem),
            _ => None,
        }
    }

    /// HTML element name for this kind
    pub fn tag_name(&self) -> &'static str {
        match self {
            TagKind::Paragraph => "p",
            TagKind::Heading2 => "h2",
            TagKind::Heading3 => "h3",
            TagKind::Blockquote => "blockquote",
            TagKind::ListItem => "li",
        }
    }
}

/// One retained block-level element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub tag_kind: TagKind,
    /// Visible text with whitespace collapsed
    pub text: String,
    /// Outer HTML of the element
    pub raw_markup: String,
}

/// Final note ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArtifact {
    pub filename: String,
    pub markdown_body: String,
}

/// Parameters for a single clipping run
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Article URL (must be http:// or https://)
    pub url: String,
    /// Folder the note is written into
    pub folder: PathBuf,
    /// Site profile used for the filename date suffix
    pub profile: Profile,
    /// Filter blocks and convert through the local LLM
    pub use_llm: bool,
}

impl RunRequest {
    /// Create a new request for the given URL and folder
    pub fn new(url: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            folder: folder.into(),
            ..Default::default()
        }
    }

    /// Set the site profile
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Enable LLM relevance filtering and conversion
    pub fn use_llm(mut self, enable: bool) -> Self {
        self.use_llm = enable;
        self
    }
}

/// Non-fatal degradation recorded during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Readability could not isolate an article; an empty document was used
    ExtractionDegraded { reason: String },
    /// Some blocks were dropped because classification failed
    ClassificationFailed { failures: usize },
    /// Markdown conversion failed and a fallback body was written
    ConversionFailed { reason: String },
    /// No blocks survived, the note body is empty
    EmptyContent,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ExtractionDegraded { reason } => {
                write!(f, "article extraction failed: {}", reason)
            }
            Warning::ClassificationFailed { failures } => write!(
                f,
                "{} block(s) dropped because classification failed",
                failures
            ),
            Warning::ConversionFailed { reason } => {
                write!(f, "markdown conversion failed: {}", reason)
            }
            Warning::EmptyContent => write!(f, "no content blocks survived, note is empty"),
        }
    }
}

/// Result of a run that reached `Done`
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub artifact: OutputArtifact,
    /// Full path of the written note
    pub path: PathBuf,
    pub warnings: Vec<Warning>,
}

impl RunOutcome {
    /// True if any stage fell back to a degraded result
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Pipeline stage, reported through the status callback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Fetching,
    Extracting,
    Selecting,
    Classifying,
    Converting,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Selecting => "selecting",
            Stage::Classifying => "classifying",
            Stage::Converting => "converting",
            Stage::Writing => "writing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

//! VaultClip - clip web articles into Markdown notes
//!
//! Fetches a page, isolates the article with a readability pass, keeps the
//! substantial paragraphs, headings, quotes and list items, optionally asks
//! a local LLM which of them belong to the article, converts the result to
//! Markdown and writes it into a notes folder.
//!
//! ## Collaborators
//!
//! The [`Pipeline`] talks to the outside world only through traits, so each
//! one can be replaced through [`PipelineBuilder`]:
//! - [`Fetcher`] - page download ([`HttpFetcher`] by default)
//! - [`Extractor`] - main-content extraction ([`ReadabilityExtractor`])
//! - [`LlmClient`] - relevance classification and conversion ([`OllamaClient`])

pub mod blocks;
pub mod convert;
mod error;
pub mod extract;
pub mod fetchers;
pub mod filename;
pub mod llm;
mod pipeline;
pub mod relevance;
mod types;
mod writer;

pub use blocks::{select_blocks, MIN_BLOCK_CHARS};
pub use convert::{convert_locally, convert_with_llm, Conversion};
pub use error::ClipError;
pub use extract::{Extractor, ReadabilityExtractor};
pub use fetchers::{Fetcher, HttpFetcher};
pub use filename::{build_filename, sanitize_title, Profile, SiteProfile};
pub use llm::{LlmClient, LlmError, OllamaClient};
pub use pipeline::{run, Pipeline, PipelineBuilder};
pub use relevance::{RelevanceFilter, RelevanceReport};
pub use types::{
    ArticleDocument, ContentBlock, FetchResult, OutputArtifact, RunOutcome, RunRequest, Stage,
    TagKind, Warning,
};
pub use writer::write_note;

/// Desktop browser User-Agent sent with page requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Default local Ollama server
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model for classification and conversion
pub const DEFAULT_MODEL: &str = "phi";

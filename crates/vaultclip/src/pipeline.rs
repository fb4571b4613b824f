//! Clipping pipeline
//!
//! Runs the stages strictly in order:
//! fetch, extract, select, classify (optional), convert, write.
//! A fatal error in any stage aborts the run before anything is written.
//! Degradations are collected as [`Warning`]s and the run still completes.

use crate::blocks::select_blocks;
use crate::convert::{convert_locally, convert_with_llm};
use crate::error::ClipError;
use crate::extract::{extract_or_empty, Extractor, ReadabilityExtractor};
use crate::fetchers::{validate_url, Fetcher, HttpFetcher};
use crate::filename::build_filename;
use crate::llm::{LlmClient, OllamaClient};
use crate::relevance::RelevanceFilter;
use crate::types::{OutputArtifact, RunOutcome, RunRequest, Stage, Warning};
use crate::writer::write_note;
use crate::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_USER_AGENT};
use tracing::{error, info, warn};

/// Builder for configuring the pipeline
#[derive(Default)]
pub struct PipelineBuilder {
    user_agent: Option<String>,
    ollama_url: Option<String>,
    model: Option<String>,
    fetcher: Option<Box<dyn Fetcher>>,
    extractor: Option<Box<dyn Extractor>>,
    llm: Option<Box<dyn LlmClient>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent for page fetches
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the Ollama server base URL
    pub fn ollama_url(mut self, url: impl Into<String>) -> Self {
        self.ollama_url = Some(url.into());
        self
    }

    /// Set the model used for classification and conversion
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Replace the page fetcher
    pub fn fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replace the article extractor
    pub fn extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Replace the LLM backend
    pub fn llm(mut self, llm: Box<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Box::new(HttpFetcher::with_user_agent(user_agent)));
        let extractor = self
            .extractor
            .unwrap_or_else(|| Box::new(ReadabilityExtractor::new()));
        let llm = self.llm.unwrap_or_else(|| {
            Box::new(OllamaClient::new(
                self.ollama_url
                    .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
                self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ))
        });

        Pipeline {
            fetcher,
            extractor,
            llm,
        }
    }
}

/// Configured clipping pipeline
pub struct Pipeline {
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    llm: Box<dyn LlmClient>,
}

impl Default for Pipeline {
    fn default() -> Self {
        PipelineBuilder::new().build()
    }
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the pipeline
    pub async fn run(&self, request: RunRequest) -> Result<RunOutcome, ClipError> {
        self.run_with_status(request, |_| {}).await
    }

    /// Run the pipeline, reporting each stage transition
    pub async fn run_with_status<F>(
        &self,
        request: RunRequest,
        mut status_callback: F,
    ) -> Result<RunOutcome, ClipError>
    where
        F: FnMut(Stage),
    {
        match self.execute(&request, &mut status_callback).await {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    warn!(url = %request.url, "Run degraded: {}", warning);
                }
                info!(path = %outcome.path.display(), "Markdown saved");
                status_callback(Stage::Done);
                Ok(outcome)
            }
            Err(e) => {
                error!(url = %request.url, "Run failed: {}", e);
                status_callback(Stage::Failed);
                Err(e)
            }
        }
    }

    async fn execute<F>(
        &self,
        request: &RunRequest,
        status_callback: &mut F,
    ) -> Result<RunOutcome, ClipError>
    where
        F: FnMut(Stage),
    {
        validate_url(&request.url)?;
        if request.folder.as_os_str().is_empty() {
            return Err(ClipError::MissingFolder);
        }

        let mut warnings = Vec::new();

        status_callback(Stage::Fetching);
        info!(url = %request.url, fetcher = self.fetcher.name(), "Fetching page");
        let page = self.fetcher.fetch(&request.url).await?;

        status_callback(Stage::Extracting);
        let (article, failure) =
            extract_or_empty(self.extractor.as_ref(), &page.body, Some(page.url.as_str()));
        if let Some(reason) = failure {
            warnings.push(Warning::ExtractionDegraded { reason });
        } else if article.is_empty() {
            warn!(url = %page.url, "Extractor found no article content");
        }
        info!(title = %article.title, "Extracted article");

        status_callback(Stage::Selecting);
        let mut blocks = select_blocks(&article.content_fragment);
        let filename = build_filename(&article.title, &blocks, request.profile.site_profile());

        if request.use_llm {
            status_callback(Stage::Classifying);
            let report = RelevanceFilter::new(self.llm.as_ref())
                .filter(&article.title, blocks)
                .await;
            if report.failures > 0 {
                warnings.push(Warning::ClassificationFailed {
                    failures: report.failures,
                });
            }
            blocks = report.kept;
        }

        status_callback(Stage::Converting);
        let markdown_body = if blocks.is_empty() {
            warnings.push(Warning::EmptyContent);
            String::new()
        } else {
            let conversion = if request.use_llm {
                convert_with_llm(self.llm.as_ref(), &blocks).await
            } else {
                convert_locally(&blocks)
            };
            if let Some(reason) = conversion.failure {
                warnings.push(Warning::ConversionFailed { reason });
            }
            conversion.markdown
        };

        status_callback(Stage::Writing);
        let path = write_note(&request.folder, &filename, &markdown_body).await?;

        Ok(RunOutcome {
            artifact: OutputArtifact {
                filename,
                markdown_body,
            },
            path,
            warnings,
        })
    }
}

/// Run a request with the default collaborators
///
/// Uses the browser User-Agent and the local Ollama server.
/// For custom configuration, use [`Pipeline::builder`].
pub async fn run(request: RunRequest) -> Result<RunOutcome, ClipError> {
    Pipeline::default().run(request).await
}

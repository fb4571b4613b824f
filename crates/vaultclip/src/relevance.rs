//! LLM relevance filter
//!
//! Asks the model, one block at a time, whether a block belongs to the
//! article's main content. Any failure counts as "not relevant".

use crate::llm::LlmClient;
use crate::types::ContentBlock;
use tracing::{info, warn};

const CLASSIFY_SYSTEM_PROMPT: &str = "You are a content classifier for web articles. \
You will be given the title of an article and one paragraph taken from the page. \
Decide whether the paragraph is part of the article's main content, as opposed to \
navigation, advertising, author bios, comment sections, newsletter prompts or other \
boilerplate. Answer only YES or NO.";

/// Outcome of filtering a sequence of blocks
#[derive(Debug, Clone, Default)]
pub struct RelevanceReport {
    /// Blocks classified relevant, in their original order
    pub kept: Vec<ContentBlock>,
    /// Blocks dropped because the classification request failed
    pub failures: usize,
}

/// True when a model reply counts as a "yes"
///
/// Any occurrence of "yes", in any case, counts.
pub fn is_affirmative(response: &str) -> bool {
    response.to_uppercase().contains("YES")
}

/// Build the per-block classification prompt
pub fn classification_prompt(title: &str, text: &str) -> String {
    format!(
        "ARTICLE TITLE: \"{}\"\n\nPARAGRAPH: \"{}\"\n\nIs this paragraph part of the article's main content? Answer YES or NO.",
        title, text
    )
}

/// Relevance filter backed by an [`LlmClient`]
pub struct RelevanceFilter<'a> {
    llm: &'a dyn LlmClient,
}

impl<'a> RelevanceFilter<'a> {
    pub fn new(llm: &'a dyn LlmClient) -> Self {
        Self { llm }
    }

    /// Classify a single block; request failures yield `false`
    pub async fn classify(&self, title: &str, block: &ContentBlock) -> bool {
        self.try_classify(title, block).await.unwrap_or(false)
    }

    /// Classify, returning `None` when the request failed
    async fn try_classify(&self, title: &str, block: &ContentBlock) -> Option<bool> {
        let prompt = classification_prompt(title, &block.text);
        match self.llm.generate(&prompt, CLASSIFY_SYSTEM_PROMPT).await {
            Ok(response) => {
                let verdict = is_affirmative(&response);
                info!(
                    tag = block.tag_kind.tag_name(),
                    verdict,
                    text = %preview(&block.text),
                    "Classified block"
                );
                Some(verdict)
            }
            Err(e) => {
                warn!(
                    model = self.llm.model_name(),
                    text = %preview(&block.text),
                    "Classification failed, dropping block: {}",
                    e
                );
                None
            }
        }
    }

    /// Filter blocks sequentially, preserving their order
    pub async fn filter(&self, title: &str, blocks: Vec<ContentBlock>) -> RelevanceReport {
        let total = blocks.len();
        let mut report = RelevanceReport::default();

        for block in blocks {
            match self.try_classify(title, &block).await {
                Some(true) => report.kept.push(block),
                Some(false) => {}
                None => report.failures += 1,
            }
        }

        info!(
            total,
            kept = report.kept.len(),
            failures = report.failures,
            "Relevance filtering finished"
        );
        report
    }
}

/// First few words of a block for log lines
fn preview(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{}...", head)
    }
}

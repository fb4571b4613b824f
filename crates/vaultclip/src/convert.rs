//! Markdown conversion
//!
//! Two modes: the LLM mode sends the blocks' markup to the local model for a
//! literal HTML to Markdown rewrite, the local mode runs `htmd` over the
//! blocks' joined text.

use crate::llm::LlmClient;
use crate::types::ContentBlock;

const CONVERT_SYSTEM_PROMPT: &str = "You are a Markdown formatter. The user will give you HTML content extracted from a blog post. \
This HTML has already been cleaned to include only the main article (no sidebars, ads, or navigation). \
Your job is to convert it into valid, readable Markdown. \
Preserve all content, including headers, paragraphs, emphasis, and inline links. \
Do not summarize, rephrase, or exclude anything. \
Return only the Markdown output, with no explanations or comments.";

/// Body written when the LLM conversion request fails
pub const CONVERSION_FAILED_MARKDOWN: &str =
    "# LLM processing failed\n\nAn error occurred while calling the local model.";

/// Markdown produced by a converter, with the failure reason if it degraded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub markdown: String,
    pub failure: Option<String>,
}

/// Convert blocks through the LLM
///
/// Blocks' raw markup is joined with newlines and sent as the prompt.
/// On failure the placeholder document is returned.
pub async fn convert_with_llm(llm: &dyn LlmClient, blocks: &[ContentBlock]) -> Conversion {
    let html = blocks
        .iter()
        .map(|b| b.raw_markup.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    match llm.generate(&html, CONVERT_SYSTEM_PROMPT).await {
        Ok(response) => Conversion {
            markdown: filter_excessive_newlines(response.trim()),
            failure: None,
        },
        Err(e) => {
            tracing::warn!(model = llm.model_name(), "LLM conversion failed: {}", e);
            Conversion {
                markdown: CONVERSION_FAILED_MARKDOWN.to_string(),
                failure: Some(e.to_string()),
            }
        }
    }
}

/// Join block text, tab-indented and separated by blank lines
pub fn join_block_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(|b| format!("\t{}", b.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Convert blocks locally
///
/// The joined input is plain text rather than markup, so `htmd` mostly
/// passes it through. If `htmd` fails the joined text is used as-is.
pub fn convert_locally(blocks: &[ContentBlock]) -> Conversion {
    let joined = join_block_text(blocks);

    match htmd::convert(&joined) {
        Ok(markdown) => Conversion {
            markdown: filter_excessive_newlines(markdown.trim()),
            failure: None,
        },
        Err(e) => {
            tracing::warn!("Local markdown conversion failed: {}", e);
            Conversion {
                markdown: joined,
                failure: Some(e.to_string()),
            }
        }
    }
}

/// Collapse every whitespace run to one space and trim
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_space = true;

    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    if result.ends_with(' ') {
        result.pop();
    }
    result
}

/// Filter excessive newlines: keep at most 2 consecutive newlines
pub fn filter_excessive_newlines(s: &str) -> String {
    let mut result = String::new();
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::types::TagKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoLlm {
        seen: Mutex<Option<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl LlmClient for EchoLlm {
        async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
            *self.seen.lock().unwrap() = Some((prompt.to_string(), system.to_string()));
            if self.fail {
                Err(LlmError::Status(500))
            } else {
                Ok("\n\n# Converted\n\n\n\nBody text\n".to_string())
            }
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    fn block(tag_kind: TagKind, text: &str, raw: &str) -> ContentBlock {
        ContentBlock {
            tag_kind,
            text: text.to_string(),
            raw_markup: raw.to_string(),
        }
    }

    fn sample_blocks() -> Vec<ContentBlock> {
        vec![
            block(
                TagKind::Heading2,
                "Why we moved to a monorepo",
                "<h2>Why we moved to a monorepo</h2>",
            ),
            block(
                TagKind::Paragraph,
                "It made cross cutting changes much easier",
                "<p>It made <em>cross cutting</em> changes much easier</p>",
            ),
        ]
    }

    #[tokio::test]
    async fn test_llm_mode_sends_markup_and_trims() {
        let llm = EchoLlm {
            seen: Mutex::new(None),
            fail: false,
        };
        let conversion = convert_with_llm(&llm, &sample_blocks()).await;

        assert_eq!(conversion.markdown, "# Converted\n\nBody text");
        assert!(conversion.failure.is_none());

        let (prompt, system) = llm.seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            prompt,
            "<h2>Why we moved to a monorepo</h2>\n<p>It made <em>cross cutting</em> changes much easier</p>"
        );
        assert!(system.contains("Do not summarize"));
    }

    #[tokio::test]
    async fn test_llm_mode_failure_placeholder() {
        let llm = EchoLlm {
            seen: Mutex::new(None),
            fail: true,
        };
        let conversion = convert_with_llm(&llm, &sample_blocks()).await;

        assert_eq!(conversion.markdown, CONVERSION_FAILED_MARKDOWN);
        assert!(conversion.failure.unwrap().contains("HTTP 500"));
    }

    #[test]
    fn test_join_block_text() {
        assert_eq!(
            join_block_text(&sample_blocks()),
            "\tWhy we moved to a monorepo\n\n\tIt made cross cutting changes much easier"
        );
    }

    #[test]
    fn test_local_mode_keeps_text() {
        let conversion = convert_locally(&sample_blocks());
        assert!(conversion.failure.is_none());
        assert!(conversion.markdown.contains("Why we moved to a monorepo"));
        assert!(conversion.markdown.contains("It made cross cutting changes much easier"));
        assert!(!conversion.markdown.contains("<em>"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
        assert_eq!(collapse_whitespace("\n\n"), "");
        assert_eq!(collapse_whitespace("one"), "one");
    }

    #[test]
    fn test_filter_excessive_newlines() {
        let input = "line1\n\n\n\n\nline2";
        let output = filter_excessive_newlines(input);
        assert_eq!(output, "line1\n\nline2");
    }
}

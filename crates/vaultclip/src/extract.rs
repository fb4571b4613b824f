//! Main-content extraction
//!
//! Readability work is delegated to `dom_smoothie`. The pipeline only relies
//! on the contract: given any markup, return a title and a content fragment,
//! never failing the run.

use crate::types::ArticleDocument;
use dom_smoothie::{Config, Readability};

/// Upper bound on elements readability will score
const MAX_ELEMENTS_TO_PARSE: usize = 9000;

/// Isolates the article region of a page
pub trait Extractor: Send + Sync {
    /// Extract the article, or explain why nothing could be isolated
    fn extract(&self, raw_html: &str, url: Option<&str>) -> Result<ArticleDocument, String>;
}

/// Readability-based extractor
#[derive(Debug, Clone, Default)]
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ReadabilityExtractor {
    fn extract(&self, raw_html: &str, url: Option<&str>) -> Result<ArticleDocument, String> {
        let cfg = Config {
            max_elements_to_parse: MAX_ELEMENTS_TO_PARSE,
            ..Default::default()
        };

        let mut readability =
            Readability::new(raw_html, url, Some(cfg)).map_err(|e| e.to_string())?;
        let article = readability.parse().map_err(|e| e.to_string())?;

        Ok(ArticleDocument {
            title: article.title.trim().to_string(),
            content_fragment: article.content.to_string(),
        })
    }
}

/// Run an extractor, degrading to an empty document on failure
///
/// Returns the document and, when extraction failed, the reason.
pub fn extract_or_empty(
    extractor: &dyn Extractor,
    raw_html: &str,
    url: Option<&str>,
) -> (ArticleDocument, Option<String>) {
    match extractor.extract(raw_html, url) {
        Ok(doc) => (doc, None),
        Err(reason) => {
            tracing::warn!(reason = %reason, "Readability extraction failed, using empty document");
            (ArticleDocument::default(), Some(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Understanding Ownership</title></head>
<body>
  <nav><a href="/">Home</a> | <a href="/about">About</a></nav>
  <article>
    <p>Ownership is the set of rules that govern how a program manages memory while it runs, and every value has exactly one owner at a time.</p>
    <p>When the owner goes out of scope the value is dropped, which means memory is returned without a garbage collector or manual free calls.</p>
    <p>Borrowing lets code use a value without taking ownership, and the borrow checker makes sure references never outlive the data they point to.</p>
    <p>These rules are checked at compile time, so none of them slow down the program once it is running on real hardware in production.</p>
  </article>
  <footer>Copyright notice and a pile of unrelated links</footer>
</body>
</html>"#;

    struct FailingExtractor;

    impl Extractor for FailingExtractor {
        fn extract(&self, _raw_html: &str, _url: Option<&str>) -> Result<ArticleDocument, String> {
            Err("no candidates".to_string())
        }
    }

    #[test]
    fn test_readability_extracts_title_and_body() {
        let doc = ReadabilityExtractor::new()
            .extract(ARTICLE, Some("https://example.com/ownership"))
            .unwrap();
        assert_eq!(doc.title, "Understanding Ownership");
        assert!(doc.content_fragment.contains("borrow checker"));
    }

    #[test]
    fn test_extract_or_empty_degrades() {
        let (doc, reason) = extract_or_empty(&FailingExtractor, "<html></html>", None);
        assert!(doc.is_empty());
        assert_eq!(reason.as_deref(), Some("no candidates"));
    }

    #[test]
    fn test_extract_or_empty_never_panics_on_garbage() {
        let (doc, _) = extract_or_empty(&ReadabilityExtractor::new(), "<<<>>> not html", None);
        assert!(doc.title.len() < 100);
    }
}

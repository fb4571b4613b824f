//! Block selection
//!
//! Walks the extracted fragment for paragraphs, h2/h3 headings, blockquotes
//! and list items, keeping those with enough visible text. Document order is
//! preserved: the first surviving block feeds the filename date suffix.

use crate::convert::collapse_whitespace;
use crate::types::{ContentBlock, TagKind};
use scraper::{Html, Selector};

/// Minimum visible characters for a block to be kept
pub const MIN_BLOCK_CHARS: usize = 30;

const BLOCK_SELECTOR: &str = "p, h2, h3, blockquote, li";

/// Select content blocks from an article fragment
pub fn select_blocks(fragment: &str) -> Vec<ContentBlock> {
    if fragment.trim().is_empty() {
        return Vec::new();
    }

    let selector = match Selector::parse(BLOCK_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Invalid block selector: {}", e);
            return Vec::new();
        }
    };

    let document = Html::parse_fragment(fragment);
    let mut blocks = Vec::new();

    for element in document.select(&selector) {
        let Some(tag_kind) = TagKind::from_tag_name(element.value().name()) else {
            continue;
        };

        let text = collapse_whitespace(&element.text().collect::<String>());
        if text.chars().count() < MIN_BLOCK_CHARS {
            continue;
        }

        blocks.push(ContentBlock {
            tag_kind,
            text,
            raw_markup: element.html(),
        });
    }

    tracing::debug!(count = blocks.len(), "Selected content blocks");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let short = "a".repeat(29);
        let exact = "b".repeat(30);
        let html = format!("<p>{}</p><p>{}</p>", short, exact);

        let blocks = select_blocks(&html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, exact);
    }

    #[test]
    fn test_empty_and_whitespace_blocks_dropped() {
        let html = "<p></p><p>   \n\t  </p><li> </li>";
        assert!(select_blocks(html).is_empty());
    }

    #[test]
    fn test_whitespace_collapsed_before_measuring() {
        // 20 visible chars padded out with whitespace
        let html = "<p>   short     text     here      ok           </p>";
        assert!(select_blocks(html).is_empty());
    }

    #[test]
    fn test_document_order_and_kinds() {
        let html = r#"
            <h2>The first heading is long enough to keep</h2>
            <p>A paragraph that follows the heading in the document.</p>
            <ul><li>A list item with plenty of words inside it.</li></ul>
            <blockquote>A quotation that someone important once said.</blockquote>
            <h3>A smaller heading that is also long enough</h3>
            <h4>An h4 heading is skipped even when it is long</h4>
        "#;

        let blocks = select_blocks(html);
        let kinds: Vec<TagKind> = blocks.iter().map(|b| b.tag_kind).collect();
        assert_eq!(
            kinds,
            vec![
                TagKind::Heading2,
                TagKind::Paragraph,
                TagKind::ListItem,
                TagKind::Blockquote,
                TagKind::Heading3,
            ]
        );
    }

    #[test]
    fn test_inline_markup_kept_in_raw_only() {
        let html = r#"<p>Read the <a href="https://example.com">full guide</a> before you start.</p>"#;
        let blocks = select_blocks(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Read the full guide before you start.");
        assert!(blocks[0].raw_markup.starts_with("<p>"));
        assert!(blocks[0].raw_markup.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_empty_fragment() {
        assert!(select_blocks("").is_empty());
        assert!(select_blocks("   ").is_empty());
    }
}

use std::sync::LazyLock;

use fed_core::{normalize_document_text, ExtractionRule};
use scraper::{ElementRef, Html, Selector};

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("invalid selector: p"));

static ARTICLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#article").expect("invalid selector: #article"));

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("content container {0} not found")]
    MissingContainer(String),
    #[error("page has no document text")]
    EmptyDocument,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, rule: ExtractionRule) -> Result<String, ExtractError>;
}

/// Paragraph-based extraction shared by every document series.
///
/// - `Historical`: every `<p>` in the page
/// - `Modern`: the `<p>` elements inside the content container; a container
///   without paragraphs yields [`ExtractError::EmptyDocument`]
#[derive(Debug, Clone)]
pub struct ParagraphExtractor {
    container: Selector,
    container_css: &'static str,
}

impl ParagraphExtractor {
    /// Modern detail pages on federalreserve.gov wrap the body in `#article`.
    pub fn article() -> Self {
        Self {
            container: ARTICLE.clone(),
            container_css: "#article",
        }
    }

    /// `None` when `container_css` is not a valid CSS selector.
    pub fn with_container(container_css: &'static str) -> Option<Self> {
        let container = Selector::parse(container_css).ok()?;
        Some(Self {
            container,
            container_css,
        })
    }
}

impl Extractor for ParagraphExtractor {
    fn extract(&self, html: &str, rule: ExtractionRule) -> Result<String, ExtractError> {
        let doc = Html::parse_document(html);
        let raw = match rule {
            ExtractionRule::Historical => join_paragraphs(doc.select(&PARAGRAPH)),
            ExtractionRule::Modern => {
                let container = doc
                    .select(&self.container)
                    .next()
                    .ok_or_else(|| ExtractError::MissingContainer(self.container_css.to_string()))?;
                join_paragraphs(container.select(&PARAGRAPH))
            }
        };

        let text = normalize_document_text(&raw);
        if text.is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        Ok(text)
    }
}

fn join_paragraphs<'a>(paragraphs: impl Iterator<Item = ElementRef<'a>>) -> String {
    paragraphs
        .map(|p| p.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

use std::sync::LazyLock;

use fed_core::{date_from_link, DatePrecision, IndexEntry};
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector: a[href]"));

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid index page url {url}: {message}")]
    InvalidPageUrl { url: String, message: String },
    #[error("no recognizable document links ({dropped} candidate rows dropped)")]
    NoEntries { dropped: usize },
}

/// A listing page to scan for document links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    pub url: String,
    /// `None` for the series' primary listing page.
    pub archive_year: Option<i32>,
}

impl IndexPage {
    pub fn primary(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            archive_year: None,
        }
    }

    pub fn archive(url: impl Into<String>, year: i32) -> Self {
        Self {
            url: url.into(),
            archive_year: Some(year),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.archive_year.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexParse {
    pub entries: Vec<IndexEntry>,
    pub dropped: usize,
}

/// How one document series appears on its listing pages.
pub struct RowShape {
    /// Matched against the path of the resolved link.
    pub modern_path: &'static LazyLock<Regex>,
    /// Archive rows are recognised by link text (plus href hints).
    pub is_archival_row: fn(href: &str, text: &str) -> bool,
    pub precision: DatePrecision,
}

/// Scans every anchor on a listing page and keeps the document links.
///
/// A candidate is any anchor with the modern link shape or an archive-row
/// label. The date in the link picks the extraction rule, whichever shape
/// the row had. Candidates whose date cannot be read are counted in
/// `dropped`.
pub fn parse_index_page(
    html: &str,
    page_url: &str,
    shape: &RowShape,
    historical_split: i32,
) -> Result<IndexParse, ParseError> {
    let base = Url::parse(page_url).map_err(|err| ParseError::InvalidPageUrl {
        url: page_url.to_string(),
        message: err.to_string(),
    })?;
    let doc = Html::parse_document(html);

    let mut parse = IndexParse::default();
    for anchor in doc.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        let text = anchor.text().collect::<String>();
        let text = text.trim();

        let modern = shape.modern_path.is_match(resolved.path());
        let archival = (shape.is_archival_row)(href, text);
        if !modern && !archival {
            continue;
        }

        let Some(release_date) = date_from_link(resolved.path(), shape.precision) else {
            parse.dropped += 1;
            continue;
        };
        parse
            .entries
            .push(IndexEntry::new(release_date, resolved.as_str(), historical_split));
    }

    if parse.entries.is_empty() {
        return Err(ParseError::NoEntries {
            dropped: parse.dropped,
        });
    }
    Ok(parse)
}

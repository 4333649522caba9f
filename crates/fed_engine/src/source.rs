use std::sync::LazyLock;

use fed_core::{DatePrecision, DocumentKind, SourceConfig};
use regex::Regex;

use crate::extract::{Extractor, ParagraphExtractor};
use crate::index::{parse_index_page, IndexPage, IndexParse, ParseError, RowShape};

static STATEMENT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/newsevents/pressreleases/monetary\d{8}a\.htm$").expect("invalid regex: statement path")
});

static MINUTES_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/monetarypolicy/fomcminutes\d{8}\.htm$").expect("invalid regex: minutes path")
});

static BEIGE_BOOK_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/monetarypolicy/beigebook\d{6}(\d{2})?\.htm$").expect("invalid regex: beige book path")
});

static STATEMENT_SHAPE: RowShape = RowShape {
    modern_path: &STATEMENT_PATH,
    is_archival_row: is_statement_row,
    precision: DatePrecision::Day,
};

static MINUTES_SHAPE: RowShape = RowShape {
    modern_path: &MINUTES_PATH,
    is_archival_row: is_minutes_row,
    precision: DatePrecision::Day,
};

static BEIGE_BOOK_SHAPE: RowShape = RowShape {
    modern_path: &BEIGE_BOOK_PATH,
    is_archival_row: is_beige_book_row,
    precision: DatePrecision::Month,
};

fn is_statement_row(_href: &str, text: &str) -> bool {
    text == "Statement"
}

// Archive years link minutes as "HTML" or "Minutes" next to PDF versions.
fn is_minutes_row(href: &str, text: &str) -> bool {
    matches!(text, "HTML" | "Minutes") && href.to_ascii_lowercase().contains("minutes")
}

fn is_beige_book_row(_href: &str, text: &str) -> bool {
    text.starts_with("HTML")
}

/// Everything that differs between document series: where the listings
/// live, what a document row looks like, and how a page is read.
pub trait DocumentSource: Send + Sync {
    fn kind(&self) -> DocumentKind;

    fn row_shape(&self) -> &RowShape;

    fn extractor(&self) -> &dyn Extractor;

    fn archive_url(&self, base_url: &str, year: i32) -> String;

    /// The primary listing followed by one archive page per year.
    fn index_pages(&self, config: &SourceConfig) -> Vec<IndexPage> {
        let base_url = config.base_url.trim_end_matches('/');
        std::iter::once(IndexPage::primary(config.index_url.clone()))
            .chain(
                config
                    .archive_years()
                    .map(|year| IndexPage::archive(self.archive_url(base_url, year), year)),
            )
            .collect()
    }

    fn parse_index(
        &self,
        html: &str,
        page: &IndexPage,
        config: &SourceConfig,
    ) -> Result<IndexParse, ParseError> {
        parse_index_page(html, &page.url, self.row_shape(), config.historical_split)
    }
}

/// FOMC policy statements.
#[derive(Debug, Clone)]
pub struct FomcStatements {
    extractor: ParagraphExtractor,
}

impl Default for FomcStatements {
    fn default() -> Self {
        Self {
            extractor: ParagraphExtractor::article(),
        }
    }
}

impl DocumentSource for FomcStatements {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Statements
    }

    fn row_shape(&self) -> &RowShape {
        &STATEMENT_SHAPE
    }

    fn extractor(&self) -> &dyn Extractor {
        &self.extractor
    }

    fn archive_url(&self, base_url: &str, year: i32) -> String {
        format!("{base_url}/monetarypolicy/fomchistorical{year}.htm")
    }
}

/// FOMC meeting minutes.
#[derive(Debug, Clone)]
pub struct FomcMinutes {
    extractor: ParagraphExtractor,
}

impl Default for FomcMinutes {
    fn default() -> Self {
        Self {
            extractor: ParagraphExtractor::article(),
        }
    }
}

impl DocumentSource for FomcMinutes {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Minutes
    }

    fn row_shape(&self) -> &RowShape {
        &MINUTES_SHAPE
    }

    fn extractor(&self) -> &dyn Extractor {
        &self.extractor
    }

    fn archive_url(&self, base_url: &str, year: i32) -> String {
        format!("{base_url}/monetarypolicy/fomchistorical{year}.htm")
    }
}

/// Beige Book regional reports. Dated by month only.
#[derive(Debug, Clone)]
pub struct BeigeBooks {
    extractor: ParagraphExtractor,
}

impl Default for BeigeBooks {
    fn default() -> Self {
        Self {
            extractor: ParagraphExtractor::article(),
        }
    }
}

impl DocumentSource for BeigeBooks {
    fn kind(&self) -> DocumentKind {
        DocumentKind::BeigeBooks
    }

    fn row_shape(&self) -> &RowShape {
        &BEIGE_BOOK_SHAPE
    }

    fn extractor(&self) -> &dyn Extractor {
        &self.extractor
    }

    fn archive_url(&self, base_url: &str, year: i32) -> String {
        format!("{base_url}/monetarypolicy/beigebook{year}.htm")
    }
}

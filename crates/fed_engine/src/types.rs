use std::fmt;

use chrono::NaiveDate;
use fed_core::{ConfigError, ResultTable};
use thiserror::Error;

use crate::decode::DecodeError;
use crate::extract::ExtractError;
use crate::index::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a single document was left out of the table. Never fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("extract failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Errors that abort a whole harvest.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to fetch index page {url}: {source}")]
    IndexFetch { url: String, source: FetchError },
    #[error("failed to decode index page {url}: {source}")]
    IndexDecode { url: String, source: DecodeError },
    #[error("failed to parse index page {url}: {source}")]
    IndexParse { url: String, source: ParseError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub release_date: NaiveDate,
    pub detail_url: String,
    pub reason: DocumentError,
}

/// Counts and failures gathered during one harvest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub index_pages: usize,
    pub index_entries: usize,
    /// Candidate index rows without a usable date or with a shape that does
    /// not fit their date range.
    pub dropped_rows: usize,
    pub duplicate_urls: usize,
    pub collapsed_dates: usize,
    pub fetched: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl HarvestReport {
    pub fn skipped_dates(&self) -> Vec<NaiveDate> {
        self.skipped.iter().map(|s| s.release_date).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub table: ResultTable,
    pub report: HarvestReport,
}

/// Per-entry progress, reported as documents are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    IndexParsed { entries: usize },
    EntryStarted { ordinal: usize, url: String },
    EntryFinished { ordinal: usize, ok: bool },
}

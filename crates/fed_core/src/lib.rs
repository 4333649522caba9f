//! Fed core: pure domain types for harvesting Federal Reserve documents.
//!
//! Nothing in this crate performs IO. Index entries, extraction rules and the
//! result table assembler live here so they can be tested without a network.
mod config;
mod date;
mod entry;
mod table;

pub use config::{
    ConfigError, DocumentKind, SourceConfig, DEFAULT_BASE_URL, DEFAULT_WORKER_COUNT,
    EARLIEST_ARCHIVE_YEAR, LATEST_ARCHIVE_YEAR,
};
pub use date::{date_from_link, DatePrecision};
pub use entry::{ExtractionRule, IndexEntry};
pub use table::{normalize_document_text, Assembled, DocumentRecord, ResultTable};

//! Fed engine: HTTP fetching, index parsing, extraction and the harvester.
mod decode;
mod extract;
mod fetch;
mod harvest;
mod index;
mod persist;
mod source;
mod types;

pub use decode::{decode_html, decode_page, DecodeError};
pub use extract::{ExtractError, Extractor, ParagraphExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use harvest::{
    fetch_document, ChannelProgressSink, Harvester, NullProgressSink, ProgressSink,
};
pub use index::{parse_index_page, IndexPage, IndexParse, ParseError, RowShape};
pub use persist::{ensure_output_dir, load_snapshot, write_snapshot, AtomicFileWriter, PersistError};
pub use source::{BeigeBooks, DocumentSource, FomcMinutes, FomcStatements};
pub use types::{
    DocumentError, FailureKind, FetchError, FetchMetadata, FetchOutput, HarvestError,
    HarvestEvent, HarvestOutcome, HarvestReport, SkippedEntry,
};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fed_core::{DocumentRecord, IndexEntry, ResultTable, SourceConfig};
use fed_logging::{fed_debug, fed_info, fed_verbose};
use futures_util::stream::{self, StreamExt};

use crate::decode::decode_page;
use crate::extract::Extractor;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::persist::{write_snapshot, PersistError};
use crate::source::{BeigeBooks, DocumentSource, FomcMinutes, FomcStatements};
use crate::{
    DocumentError, FetchError, HarvestError, HarvestEvent, HarvestOutcome, HarvestReport,
    SkippedEntry,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Discards all progress.
#[derive(Debug, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: HarvestEvent) {}
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<HarvestEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<HarvestEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: HarvestEvent) {
        let _ = self.tx.send(event);
    }
}

/// Bounded-concurrency harvester for one document series.
///
/// Holds the outcome of the most recent successful harvest: `None` until
/// the first one completes, then replaced wholesale by each later success.
/// A failed harvest leaves the previous outcome in place.
pub struct Harvester<S, F = ReqwestFetcher> {
    source: S,
    config: SourceConfig,
    fetcher: F,
    sink: Arc<dyn ProgressSink>,
    latest: Option<HarvestOutcome>,
}

impl<S: DocumentSource> Harvester<S, ReqwestFetcher> {
    pub fn new(source: S, config: SourceConfig) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::new(FetchSettings::default())?;
        Ok(Self::with_fetcher(source, config, fetcher))
    }
}

impl Harvester<FomcStatements, ReqwestFetcher> {
    pub fn statements(config: SourceConfig) -> Result<Self, FetchError> {
        Self::new(FomcStatements::default(), config)
    }
}

impl Harvester<FomcMinutes, ReqwestFetcher> {
    pub fn minutes(config: SourceConfig) -> Result<Self, FetchError> {
        Self::new(FomcMinutes::default(), config)
    }
}

impl Harvester<BeigeBooks, ReqwestFetcher> {
    pub fn beige_books(config: SourceConfig) -> Result<Self, FetchError> {
        Self::new(BeigeBooks::default(), config)
    }
}

impl<S: DocumentSource, F: Fetcher> Harvester<S, F> {
    pub fn with_fetcher(source: S, config: SourceConfig, fetcher: F) -> Self {
        Self {
            source,
            config,
            fetcher,
            sink: Arc::new(NullProgressSink),
            latest: None,
        }
    }

    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn latest(&self) -> Option<&HarvestOutcome> {
        self.latest.as_ref()
    }

    /// Runs a full harvest and stores its outcome as the latest one.
    pub async fn harvest(&mut self) -> Result<&HarvestOutcome, HarvestError> {
        self.config.validate()?;
        let outcome = run_harvest(&self.source, &self.config, &self.fetcher, self.sink.as_ref()).await?;
        Ok(self.latest.insert(outcome))
    }

    /// Writes the latest table to `directory` under the series' snapshot name.
    pub fn pickle_data(&self, directory: impl AsRef<Path>) -> Result<PathBuf, PersistError> {
        let outcome = self.latest.as_ref().ok_or(PersistError::NoHarvest)?;
        let path = write_snapshot(
            &outcome.table,
            directory.as_ref(),
            self.source.kind().snapshot_filename(),
        )?;
        if self.config.verbose {
            fed_info!("Wrote {} rows to {}", outcome.table.len(), path.display());
        }
        Ok(path)
    }
}

impl<F: Fetcher> Harvester<FomcStatements, F> {
    pub async fn find_statements(&mut self) -> Result<&ResultTable, HarvestError> {
        Ok(&self.harvest().await?.table)
    }
}

impl<F: Fetcher> Harvester<FomcMinutes, F> {
    pub async fn find_minutes(&mut self) -> Result<&ResultTable, HarvestError> {
        Ok(&self.harvest().await?.table)
    }
}

impl<F: Fetcher> Harvester<BeigeBooks, F> {
    pub async fn find_beige_books(&mut self) -> Result<&ResultTable, HarvestError> {
        Ok(&self.harvest().await?.table)
    }
}

/// Fetches one detail page and extracts its text under the entry's rule.
pub async fn fetch_document<F: Fetcher + ?Sized>(
    fetcher: &F,
    extractor: &dyn Extractor,
    entry: &IndexEntry,
) -> Result<DocumentRecord, DocumentError> {
    let output = fetcher.fetch(entry.detail_url()).await?;
    let html = decode_page(&output)?;
    let text = extractor.extract(&html, entry.rule())?;
    Ok(DocumentRecord::new(entry.release_date(), text))
}

async fn run_harvest<S: DocumentSource, F: Fetcher>(
    source: &S,
    config: &SourceConfig,
    fetcher: &F,
    sink: &dyn ProgressSink,
) -> Result<HarvestOutcome, HarvestError> {
    let verbose = config.verbose;
    let kind = source.kind();
    let mut report = HarvestReport::default();

    let (entries, dropped) = collect_entries(source, config, fetcher, &mut report).await?;
    report.dropped_rows = dropped;

    let listed = entries.len();
    let mut seen = HashSet::new();
    let entries: Vec<IndexEntry> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.detail_url().to_string()))
        .collect();
    report.index_entries = entries.len();
    report.duplicate_urls = listed - entries.len();
    sink.emit(HarvestEvent::IndexParsed {
        entries: entries.len(),
    });
    if verbose {
        fed_info!(
            "Extracting {} {} documents with {} workers",
            entries.len(),
            kind.column(),
            config.worker_count
        );
    }

    let extractor = source.extractor();
    let mut finished: Vec<(usize, Result<DocumentRecord, DocumentError>)> =
        stream::iter(entries.iter().enumerate())
            .map(|(ordinal, entry)| async move {
                sink.emit(HarvestEvent::EntryStarted {
                    ordinal,
                    url: entry.detail_url().to_string(),
                });
                let result = fetch_document(fetcher, extractor, entry).await;
                sink.emit(HarvestEvent::EntryFinished {
                    ordinal,
                    ok: result.is_ok(),
                });
                (ordinal, result)
            })
            .buffer_unordered(config.worker_count)
            .collect()
            .await;
    finished.sort_by_key(|(ordinal, _)| *ordinal);

    let mut records = Vec::with_capacity(finished.len());
    for (ordinal, result) in finished {
        let entry = &entries[ordinal];
        match result {
            Ok(record) => records.push(record),
            Err(reason) => {
                fed_verbose!(
                    verbose,
                    "Skipping {} ({}): {}",
                    entry.release_date(),
                    entry.detail_url(),
                    reason
                );
                report.skipped.push(SkippedEntry {
                    release_date: entry.release_date(),
                    detail_url: entry.detail_url().to_string(),
                    reason,
                });
            }
        }
    }
    report.fetched = records.len();

    let assembled = ResultTable::assemble(kind.column(), records);
    report.collapsed_dates = assembled.collapsed;
    if assembled.collapsed > 0 {
        fed_debug!("{} records replaced by later entries with the same date", assembled.collapsed);
    }
    if verbose {
        fed_info!(
            "Harvested {} {} rows ({} skipped, {} index rows dropped)",
            assembled.table.len(),
            kind.column(),
            report.skipped.len(),
            report.dropped_rows
        );
    }

    Ok(HarvestOutcome {
        table: assembled.table,
        report,
    })
}

/// Fetches and parses every index page, in page order.
async fn collect_entries<S: DocumentSource, F: Fetcher>(
    source: &S,
    config: &SourceConfig,
    fetcher: &F,
    report: &mut HarvestReport,
) -> Result<(Vec<IndexEntry>, usize), HarvestError> {
    let pages = source.index_pages(config);
    report.index_pages = pages.len();
    if config.verbose {
        fed_info!(
            "Reading {} index pages for {} (archives {}..={})",
            pages.len(),
            source.kind().column(),
            config.start_year,
            config.historical_split
        );
    }

    let fetched: Vec<_> = stream::iter(pages.iter())
        .map(|page| async move { (page, fetcher.fetch(&page.url).await) })
        .buffered(config.worker_count)
        .collect()
        .await;

    let mut entries = Vec::new();
    let mut dropped = 0;
    for (page, result) in fetched {
        let output = result.map_err(|err| HarvestError::IndexFetch {
            url: page.url.clone(),
            source: err,
        })?;
        let html = decode_page(&output).map_err(|err| HarvestError::IndexDecode {
            url: page.url.clone(),
            source: err,
        })?;
        match source.parse_index(&html, page, config) {
            Ok(parse) => {
                fed_debug!("{}: {} entries, {} dropped", page.url, parse.entries.len(), parse.dropped);
                dropped += parse.dropped;
                entries.extend(parse.entries);
            }
            Err(err) if page.is_primary() => {
                return Err(HarvestError::IndexParse {
                    url: page.url.clone(),
                    source: err,
                });
            }
            Err(err) => {
                fed_verbose!(config.verbose, "Archive page {} contributed nothing: {}", page.url, err);
            }
        }
    }
    Ok((entries, dropped))
}

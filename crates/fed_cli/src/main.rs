mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fed_core::{DocumentKind, SourceConfig};
use fed_engine::{
    DocumentSource, Fetcher, HarvestEvent, HarvestOutcome, Harvester, ProgressSink,
};
use fed_logging::{fed_info, fed_warn};

use crate::logging::LogDestination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Statements,
    Minutes,
    BeigeBooks,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Statements => DocumentKind::Statements,
            KindArg::Minutes => DocumentKind::Minutes,
            KindArg::BeigeBooks => DocumentKind::BeigeBooks,
        }
    }
}

/// Harvest Federal Reserve publications into a dated JSON table.
#[derive(Debug, Parser)]
#[command(name = "fedharvest", version)]
struct Cli {
    /// Document series to collect.
    #[arg(long, value_enum, default_value = "statements")]
    kind: KindArg,

    /// Directory the snapshot is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Maximum number of documents fetched at once.
    #[arg(long)]
    workers: Option<usize>,

    /// First archive year to visit.
    #[arg(long)]
    start_year: Option<i32>,

    /// Documents dated before this year are read as historical pages.
    #[arg(long)]
    historical_split: Option<i32>,

    /// Site root, for mirrors.
    #[arg(long)]
    base_url: Option<String>,

    /// Only report warnings and errors.
    #[arg(long)]
    quiet: bool,

    /// Also write the full log to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        let kind = DocumentKind::from(self.kind);
        let mut config = match &self.base_url {
            Some(base) => SourceConfig::with_base_url(kind, base.as_str()),
            None => SourceConfig::for_kind(kind),
        };
        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(year) = self.start_year {
            config.start_year = year;
        }
        if let Some(year) = self.historical_split {
            config.historical_split = year;
        }
        config.verbose = !self.quiet;
        config
    }
}

/// One dot per finished document on stderr.
struct DotProgress;

impl ProgressSink for DotProgress {
    fn emit(&self, event: HarvestEvent) {
        if let HarvestEvent::EntryFinished { ok, .. } = event {
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(if ok { b"." } else { b"x" });
            let _ = stderr.flush();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, !cli.quiet);

    let config = cli.source_config();
    match cli.kind {
        KindArg::Statements => {
            let harvester = Harvester::statements(config).context("building HTTP client")?;
            run(harvester, &cli).await
        }
        KindArg::Minutes => {
            let harvester = Harvester::minutes(config).context("building HTTP client")?;
            run(harvester, &cli).await
        }
        KindArg::BeigeBooks => {
            let harvester = Harvester::beige_books(config).context("building HTTP client")?;
            run(harvester, &cli).await
        }
    }
}

async fn run<S: DocumentSource, F: Fetcher>(
    harvester: Harvester<S, F>,
    cli: &Cli,
) -> anyhow::Result<()> {
    let mut harvester = if cli.quiet {
        harvester
    } else {
        harvester.with_progress(Arc::new(DotProgress))
    };

    let kind = harvester.source().kind();
    fed_info!("Harvesting {} from {}", kind.column(), harvester.config().index_url);
    let outcome = harvester
        .harvest()
        .await
        .with_context(|| format!("harvesting {}", kind.column()))?;
    if !cli.quiet {
        eprintln!();
    }
    report(outcome);
    let rows = outcome.table.len();

    let path = harvester
        .pickle_data(&cli.out_dir)
        .with_context(|| format!("writing snapshot to {}", cli.out_dir.display()))?;
    println!("{rows} rows written to {}", path.display());
    Ok(())
}

fn report(outcome: &HarvestOutcome) {
    let report = &outcome.report;
    fed_info!(
        "{} index pages, {} entries, {} fetched, {} skipped",
        report.index_pages,
        report.index_entries,
        report.fetched,
        report.skipped.len()
    );
    if report.collapsed_dates > 0 {
        fed_warn!("{} entries shared a release date with a later one", report.collapsed_dates);
    }
    for skipped in &report.skipped {
        fed_warn!(
            "Skipped {} ({}): {}",
            skipped.release_date,
            skipped.detail_url,
            skipped.reason
        );
    }
}

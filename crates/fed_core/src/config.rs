use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.federalreserve.gov";
pub const DEFAULT_WORKER_COUNT: usize = 10;

/// Earliest year any series publishes on the site (FOMC minutes, 1993).
pub const EARLIEST_ARCHIVE_YEAR: i32 = 1993;
/// Links carry four-digit years.
pub const LATEST_ARCHIVE_YEAR: i32 = 9999;

/// The document series a harvester collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Statements,
    Minutes,
    BeigeBooks,
}

impl DocumentKind {
    /// Name of the text column in the result table.
    pub fn column(self) -> &'static str {
        match self {
            DocumentKind::Statements => "FOMC_Statements",
            DocumentKind::Minutes => "Federal_Reserve_Mins",
            DocumentKind::BeigeBooks => "Beige_Book",
        }
    }

    pub fn snapshot_filename(self) -> &'static str {
        match self {
            DocumentKind::Statements => "fomc_statements.json",
            DocumentKind::Minutes => "fomc_minutes.json",
            DocumentKind::BeigeBooks => "beige_books.json",
        }
    }

    fn index_path(self) -> &'static str {
        match self {
            DocumentKind::Statements | DocumentKind::Minutes => "/monetarypolicy/fomccalendars.htm",
            DocumentKind::BeigeBooks => "/monetarypolicy/beige-book-default.htm",
        }
    }

    fn default_start_year(self) -> i32 {
        match self {
            DocumentKind::Statements => 1994,
            DocumentKind::Minutes => 1993,
            DocumentKind::BeigeBooks => 1996,
        }
    }

    fn default_historical_split(self) -> i32 {
        match self {
            DocumentKind::Statements | DocumentKind::Minutes => 2014,
            DocumentKind::BeigeBooks => 2022,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker_count must be at least 1")]
    NoWorkers,
    #[error("{field} {value} is outside {min}..={max}")]
    YearOutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("invalid {field} {value:?}: {message}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        message: String,
    },
}

/// Construction-time settings for one harvester instance.
///
/// Nothing here is checked until [`SourceConfig::validate`] runs at the start
/// of a harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub index_url: String,
    /// First year whose annual archive page is visited.
    pub start_year: i32,
    /// Entries dated before this year use the historical extraction rule.
    pub historical_split: i32,
    pub verbose: bool,
    pub worker_count: usize,
}

impl SourceConfig {
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_url: format!("{DEFAULT_BASE_URL}{}", kind.index_path()),
            start_year: kind.default_start_year(),
            historical_split: kind.default_historical_split(),
            verbose: true,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }

    /// Points the whole configuration at another site root, index page included.
    pub fn with_base_url(kind: DocumentKind, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            index_url: format!("{base_url}{}", kind.index_path()),
            base_url,
            ..Self::for_kind(kind)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }
        check_year("start_year", self.start_year)?;
        check_year("historical_split", self.historical_split)?;
        check_url("base_url", &self.base_url)?;
        check_url("index_url", &self.index_url)?;
        Ok(())
    }

    /// Years whose archive pages belong to this harvest; empty when
    /// `start_year` is past the split.
    pub fn archive_years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year..=self.historical_split
    }
}

fn check_year(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if (EARLIEST_ARCHIVE_YEAR..=LATEST_ARCHIVE_YEAR).contains(&value) {
        return Ok(());
    }
    Err(ConfigError::YearOutOfRange {
        field,
        value,
        min: EARLIEST_ARCHIVE_YEAR,
        max: LATEST_ARCHIVE_YEAR,
    })
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|err| ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_document_kind() {
        let statements = SourceConfig::for_kind(DocumentKind::Statements);
        assert_eq!(
            statements.index_url,
            "https://www.federalreserve.gov/monetarypolicy/fomccalendars.htm"
        );
        assert_eq!(statements.historical_split, 2014);
        assert_eq!(statements.worker_count, 10);
        assert!(statements.verbose);

        let beige = SourceConfig::for_kind(DocumentKind::BeigeBooks);
        assert_eq!(beige.start_year, 1996);
        assert_eq!(beige.historical_split, 2022);
        assert!(beige.index_url.ends_with("/beige-book-default.htm"));
    }

    #[test]
    fn base_url_override_moves_index_page() {
        let config = SourceConfig::with_base_url(DocumentKind::Minutes, "http://127.0.0.1:4000/");
        assert_eq!(config.base_url, "http://127.0.0.1:4000");
        assert_eq!(
            config.index_url,
            "http://127.0.0.1:4000/monetarypolicy/fomccalendars.htm"
        );
        assert_eq!(config.start_year, 1993);
    }

    #[test]
    fn validation_is_lazy_and_checks_workers_and_urls() {
        let mut config = SourceConfig::for_kind(DocumentKind::Statements);
        config.worker_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers));

        config.worker_count = 3;
        config.index_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { field: "index_url", .. })
        ));
    }

    #[test]
    fn years_outside_the_archive_are_rejected() {
        let mut config = SourceConfig::for_kind(DocumentKind::Statements);
        config.start_year = -2_000_000_000;
        assert_eq!(
            config.validate(),
            Err(ConfigError::YearOutOfRange {
                field: "start_year",
                value: -2_000_000_000,
                min: EARLIEST_ARCHIVE_YEAR,
                max: LATEST_ARCHIVE_YEAR,
            })
        );

        config.start_year = EARLIEST_ARCHIVE_YEAR;
        assert_eq!(config.validate(), Ok(()));

        config.historical_split = 2_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::YearOutOfRange { field: "historical_split", .. })
        ));
    }

    #[test]
    fn archive_years_empty_past_split() {
        let mut config = SourceConfig::for_kind(DocumentKind::Statements);
        config.start_year = 2020;
        assert_eq!(config.archive_years().count(), 0);
        config.start_year = 2012;
        assert_eq!(config.archive_years().collect::<Vec<_>>(), vec![2012, 2013, 2014]);
    }
}

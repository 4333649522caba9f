use chrono::{Datelike, NaiveDate};

/// Which markup a detail page is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionRule {
    /// Archive pages: every paragraph in the document.
    Historical,
    /// Current pages: paragraphs inside the content container only.
    Modern,
}

impl ExtractionRule {
    pub fn for_date(release_date: NaiveDate, historical_split: i32) -> Self {
        if release_date.year() < historical_split {
            ExtractionRule::Historical
        } else {
            ExtractionRule::Modern
        }
    }
}

/// One document listed on an index page.
///
/// The rule is fixed at construction from the release date, so it can never
/// disagree with the date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    release_date: NaiveDate,
    detail_url: String,
    rule: ExtractionRule,
}

impl IndexEntry {
    pub fn new(release_date: NaiveDate, detail_url: impl Into<String>, historical_split: i32) -> Self {
        Self {
            release_date,
            detail_url: detail_url.into(),
            rule: ExtractionRule::for_date(release_date, historical_split),
        }
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }

    pub fn rule(&self) -> ExtractionRule {
        self.rule
    }

    pub fn is_historical(&self) -> bool {
        self.rule == ExtractionRule::Historical
    }
}

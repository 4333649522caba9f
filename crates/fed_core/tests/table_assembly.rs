use std::sync::Once;

use chrono::NaiveDate;
use fed_core::{
    normalize_document_text, DocumentRecord, ExtractionRule, IndexEntry, ResultTable,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(fed_logging::initialize_for_tests);
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn assemble_sorts_ascending_by_release_date() {
    init_logging();
    let records = vec![
        DocumentRecord::new(ymd(2021, 3, 17), "modern"),
        DocumentRecord::new(ymd(2012, 1, 1), "historical"),
        DocumentRecord::new(ymd(2016, 6, 15), "middle"),
    ];

    let assembled = ResultTable::assemble("FOMC_Statements", records);

    assert_eq!(assembled.collapsed, 0);
    assert_eq!(assembled.table.column(), "FOMC_Statements");
    assert_eq!(
        assembled.table.dates(),
        vec![ymd(2012, 1, 1), ymd(2016, 6, 15), ymd(2021, 3, 17)]
    );
    assert!(assembled.table.is_well_formed());
}

#[test]
fn duplicate_date_keeps_later_record_in_index_order() {
    init_logging();
    let date = ymd(2008, 3, 18);
    let records = vec![
        DocumentRecord::new(date, "T1"),
        DocumentRecord::new(ymd(2008, 1, 30), "other"),
        DocumentRecord::new(date, "T2"),
    ];

    let assembled = ResultTable::assemble("FOMC_Statements", records);

    assert_eq!(assembled.collapsed, 1);
    assert_eq!(assembled.table.len(), 2);
    assert_eq!(assembled.table.get(date), Some("T2"));
}

#[test]
fn assemble_of_nothing_is_empty_table() {
    let assembled = ResultTable::assemble("Beige_Book", Vec::new());
    assert!(assembled.table.is_empty());
    assert_eq!(assembled.table.get(ymd(2020, 1, 1)), None);
}

#[test]
fn extraction_rule_routes_strictly_below_split() {
    for split in [1995, 2008, 2014, 2022] {
        for year in 1990..2030 {
            let entry = IndexEntry::new(ymd(year, 6, 1), "/doc.htm", split);
            let expected = if year < split {
                ExtractionRule::Historical
            } else {
                ExtractionRule::Modern
            };
            assert_eq!(entry.rule(), expected, "year {year} split {split}");
            assert_eq!(entry.is_historical(), year < split);
        }
    }
}

#[test]
fn normalization_flattens_whitespace_like_the_published_tables() {
    let raw = "First paragraph.\n\nSecond\tparagraph\u{a0}here.\r\n";
    assert_eq!(
        normalize_document_text(raw),
        "First paragraph.  Secondparagraphhere."
    );
    assert_eq!(normalize_document_text(" \n\t "), "");
}

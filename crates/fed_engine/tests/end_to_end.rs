use chrono::NaiveDate;
use fed_core::{DocumentKind, SourceConfig};
use fed_engine::{load_snapshot, Harvester};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn minutes_harvest_over_http_and_persist() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/monetarypolicy/fomccalendars.htm",
        r#"<html><body>
            <a href="/monetarypolicy/fomcminutes20210317.htm">HTML</a>
            <a href="/monetarypolicy/fomcminutes20210127.htm">HTML</a>
        </body></html>"#,
    )
    .await;
    serve(
        &server,
        "/monetarypolicy/fomchistorical2013.htm",
        r#"<html><body>
            <a href="/monetarypolicy/fomcminutes20131030.htm">HTML</a>
            <a href="/monetarypolicy/files/fomcminutes20131030.pdf">PDF</a>
        </body></html>"#,
    )
    .await;
    // No meetings listed for 2014 in this fixture.
    serve(&server, "/monetarypolicy/fomchistorical2014.htm", "<html><body></body></html>").await;
    serve(
        &server,
        "/monetarypolicy/fomcminutes20210317.htm",
        r#"<div id="article"><p>Minutes of the Federal Open Market Committee</p><p>March 16-17, 2021</p></div>"#,
    )
    .await;
    serve(
        &server,
        "/monetarypolicy/fomcminutes20131030.htm",
        "<html><body><p>Minutes of the Federal Open Market Committee October 29-30, 2013</p></body></html>",
    )
    .await;
    // fomcminutes20210127.htm is not mounted: wiremock answers 404.

    let config = SourceConfig {
        start_year: 2013,
        historical_split: 2014,
        worker_count: 2,
        ..SourceConfig::with_base_url(DocumentKind::Minutes, server.uri())
    };
    let mut harvester = Harvester::minutes(config).unwrap();

    let table = harvester.find_minutes().await.unwrap().clone();
    assert_eq!(table.column(), "Federal_Reserve_Mins");
    assert_eq!(
        table.dates(),
        vec![
            NaiveDate::from_ymd_opt(2013, 10, 30).unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 17).unwrap(),
        ]
    );
    assert_eq!(
        table.get(NaiveDate::from_ymd_opt(2021, 3, 17).unwrap()),
        Some("Minutes of the Federal Open Market Committee  March 16-17, 2021")
    );

    let report = &harvester.latest().unwrap().report;
    assert_eq!(report.index_pages, 3);
    assert_eq!(
        report.skipped_dates(),
        vec![NaiveDate::from_ymd_opt(2021, 1, 27).unwrap()]
    );

    let temp = tempfile::TempDir::new().unwrap();
    let written = harvester.pickle_data(temp.path().join("snapshots")).unwrap();
    assert_eq!(written.file_name().unwrap(), "fomc_minutes.json");
    assert_eq!(load_snapshot(&written).unwrap(), table);
}

mod common;

use httpmock::Method::GET;
use httpmock::MockServer;
use sec_filings::error::Status;
use sec_filings::{Cik, FORM_10K, Kind};

use crate::common::{ACCESSION, CIK, PRIMARY_DOCUMENT, SUBMISSIONS_PATH, USER_AGENT};

#[test]
fn fetch_index_should_send_identification_headers() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(SUBMISSIONS_PATH)
            .header("user-agent", USER_AGENT)
            .header("accept", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(common::submissions());
    });

    let index = client.filing_index().fetch_index(Cik::new(CIK)?)?;

    mock.assert();
    assert_eq!(index.cik(), Cik::new(CIK)?);
    assert_eq!(index.name(), Some("LOCKHEED MARTIN CORP"));
    assert_eq!(index.len(), 4);
    assert_eq!(
        index.filings()[0].primary_document.as_deref(),
        Some("xslF345X05/wk-form4_1706822435.xml")
    );
    assert_eq!(index.filings()[3].primary_document, None);

    Ok(())
}

#[test]
fn filings_should_return_matching_forms_in_order() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    server.mock(|when, then| {
        when.method(GET).path(SUBMISSIONS_PATH);
        then.status(200).json_body(common::submissions());
    });

    let filings = client.filing_index().filings(Cik::new(CIK)?, FORM_10K)?;

    assert_eq!(filings.len(), 2);
    assert_eq!(filings[0].accession_number, ACCESSION);
    assert_eq!(filings[0].filing_date.to_string(), "2024-01-23");
    assert_eq!(filings[0].primary_document.as_deref(), Some(PRIMARY_DOCUMENT));
    assert_eq!(filings[1].accession_number, "0000936468-23-000007");
    assert_eq!(filings[1].primary_document, None);
    assert!(filings.iter().all(|filing| filing.form == FORM_10K));

    Ok(())
}

#[test]
fn filings_without_match_should_be_empty_not_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    server.mock(|when, then| {
        when.method(GET).path(SUBMISSIONS_PATH);
        then.status(200).json_body(common::submissions());
    });

    let filings = client.filing_index().filings(Cik::new(CIK)?, "S-1")?;

    assert!(filings.is_empty());

    Ok(())
}

#[test]
fn not_found_should_be_network_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/submissions/CIK0000000001.json");
        then.status(404).body("Not Found");
    });

    let err = client
        .filing_index()
        .fetch_index(Cik::new(1)?)
        .unwrap_err();

    mock.assert();
    assert_eq!(err.kind(), Kind::Network);
    let status = err.downcast_ref::<Status>().expect("status source");
    assert_eq!(status.status_code.as_u16(), 404);
    assert_eq!(status.path, "/submissions/CIK0000000001.json");
    assert_eq!(status.message, "Not Found");

    Ok(())
}

#[test]
fn malformed_json_should_be_network_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    server.mock(|when, then| {
        when.method(GET).path(SUBMISSIONS_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .body("{\"filings\": ");
    });

    let err = client
        .filing_index()
        .fetch_index(Cik::new(CIK)?)
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Network);

    Ok(())
}

#[test]
fn missing_recent_filings_should_be_network_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    server.mock(|when, then| {
        when.method(GET).path(SUBMISSIONS_PATH);
        then.status(200)
            .json_body(serde_json::json!({ "cik": "936468", "filings": {} }));
    });

    let err = client
        .filing_index()
        .filings(Cik::new(CIK)?, FORM_10K)
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Network);
    assert!(err.downcast_ref::<serde_json::Error>().is_some());

    Ok(())
}

#[test]
fn transport_failure_should_be_network_error() -> anyhow::Result<()> {
    // Nothing listens on port 1.
    let host = url::Url::parse("http://127.0.0.1:1/")?;
    let config = sec_filings::Config::builder()
        .company_name("Example Company")
        .email("example@email.com")
        .data_host(host)
        .timeout(std::time::Duration::from_secs(5))
        .build();

    let client = sec_filings::Client::new(config)?;
    let err = client
        .filing_index()
        .fetch_index(Cik::new(CIK)?)
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Network);
    assert!(err.downcast_ref::<reqwest::Error>().is_some());

    Ok(())
}

#[test]
fn consecutive_requests_should_share_rate_limiter() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path(SUBMISSIONS_PATH);
        then.status(200).json_body(common::submissions());
    });

    client.filing_index().fetch_index(Cik::new(CIK)?)?;
    let first = client.rate_limiter().last_issued().expect("first request");
    client.filing_index().fetch_index(Cik::new(CIK)?)?;
    let second = client.rate_limiter().last_issued().expect("second request");

    mock.assert_calls(2);
    assert!(second.duration_since(first) >= client.rate_limiter().interval());

    Ok(())
}

#[test]
fn malformed_filing_date_should_fail_whole_index() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = common::client(&server);

    server.mock(|when, then| {
        when.method(GET).path(SUBMISSIONS_PATH);
        then.status(200).json_body(serde_json::json!({
            "filings": {
                "recent": {
                    "form": ["10-K", "10-K"],
                    "filingDate": ["2024-01-23", ""],
                    "accessionNumber": [ACCESSION, "0000936468-23-000007"],
                    "primaryDocument": [PRIMARY_DOCUMENT]
                }
            }
        }));
    });

    let err = client
        .filing_index()
        .filings(Cik::new(CIK)?, FORM_10K)
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Network);
    assert!(err.downcast_ref::<serde_json::Error>().is_some());

    Ok(())
}

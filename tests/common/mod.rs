#![allow(dead_code, reason = "not every test binary uses every helper")]

use httpmock::MockServer;
use sec_filings::{Client, Config};
use url::Url;

pub const USER_AGENT: &str = "Example Company example@email.com";

/// Lockheed Martin, the issuer used throughout the fixtures.
pub const CIK: u64 = 936_468;
pub const ACCESSION: &str = "0000936468-24-000029";
pub const PRIMARY_DOCUMENT: &str = "lmt-20231231.htm";
pub const ARCHIVE_PATH: &str =
    "/Archives/edgar/data/0000936468/000093646824000029/lmt-20231231.htm";
pub const SUBMISSIONS_PATH: &str = "/submissions/CIK0000936468.json";

pub fn config(server: &MockServer) -> Config {
    let host = Url::parse(&server.base_url()).expect("mock server url");
    Config::builder()
        .company_name("Example Company")
        .email("example@email.com")
        .requests_per_second(50)
        .data_host(host.clone())
        .archive_host(host)
        .build()
}

pub fn client(server: &MockServer) -> Client {
    Client::new(config(server)).expect("client")
}

pub fn submissions() -> serde_json::Value {
    serde_json::json!({
        "cik": "936468",
        "entityType": "operating",
        "sic": "3760",
        "name": "LOCKHEED MARTIN CORP",
        "tickers": ["LMT"],
        "filings": {
            "recent": {
                "accessionNumber": [
                    "0000936468-24-000031",
                    ACCESSION,
                    "0000936468-23-000054",
                    "0000936468-23-000007"
                ],
                "filingDate": ["2024-02-01", "2024-01-23", "2023-10-17", "2023-01-26"],
                "reportDate": ["", "2023-12-31", "2023-09-24", "2022-12-31"],
                "form": ["4", "10-K", "10-Q", "10-K"],
                "primaryDocument": [
                    "xslF345X05/wk-form4_1706822435.xml",
                    PRIMARY_DOCUMENT,
                    "lmt-20230924.htm"
                ]
            },
            "files": []
        }
    })
}

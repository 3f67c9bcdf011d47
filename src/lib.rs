//! Rate-limited client for SEC EDGAR filing indexes and archive documents.
//!
//! The pipeline is deliberately linear and blocking:
//! - fetch an issuer's submissions index and assemble it into [`FilingRecord`]s
//! - filter the records to one form type (e.g. [`FORM_10K`])
//! - download the selected filing's primary document to disk
//!
//! Every request goes through the single [`RateLimiter`] owned by the [`Client`].
//!
//! ```no_run
//! use sec_filings::{Cik, Client, Config, FORM_10K};
//!
//! # fn main() -> sec_filings::Result<()> {
//! let config = Config::builder()
//!     .company_name("Example Company")
//!     .email("example@email.com")
//!     .build();
//! let client = Client::new(config)?;
//!
//! let cik: Cik = "936468".parse()?;
//! let filings = client.filing_index().filings(cik, FORM_10K)?;
//! if let Some(latest) = filings.first() {
//!     let path = client
//!         .documents()
//!         .download_filing(cik, latest, &client.config().output_dir)?;
//!     let _preview = sec_filings::preview(&path, sec_filings::PREVIEW_CHARS)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod client;
pub mod config;
pub mod error;
pub mod index;
pub(crate) mod serde_helpers;
pub mod throttle;
pub mod types;

use std::result::Result as StdResult;

use reqwest::blocking::{Client as ReqwestClient, Request, Response};
use reqwest::header::HeaderMap;

pub use archive::{DocumentFetcher, PREVIEW_CHARS, preview};
pub use client::Client;
pub use config::Config;
pub use error::{Error, Kind};
pub use index::FilingIndexClient;
pub use throttle::RateLimiter;
pub use types::{Cik, FORM_10K, FilingIndex, FilingRecord, RecentFilings};

pub type Result<T> = StdResult<T, Error>;

/// Executes `request`, mapping transport failures and non-2xx statuses to `kind`.
fn request(
    client: &ReqwestClient,
    mut request: Request,
    headers: Option<HeaderMap>,
    kind: Kind,
) -> Result<Response> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    if let Some(h) = headers {
        request.headers_mut().extend(h);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(method = %method, url = %request.url(), "sending request");

    let response = client
        .execute(request)
        .map_err(|e| Error::with_source(kind, e))?;

    let status_code = response.status();
    if !status_code.is_success() {
        let message = response.text().unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = %status_code,
            method = %method,
            path = %path,
            message = %message,
            "EDGAR request failed"
        );

        return Err(Error::status(kind, status_code, method, path, message));
    }

    Ok(response)
}

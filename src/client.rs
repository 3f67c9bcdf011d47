use std::path::PathBuf;

use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::header::HeaderMap;
use url::Url;

use crate::archive::DocumentFetcher;
use crate::config::Config;
use crate::error::{Error, Kind};
use crate::index::FilingIndexClient;
use crate::throttle::RateLimiter;
use crate::types::{Cik, FilingRecord};
use crate::{Result, types};

/// Owns the HTTP client, the identification headers and the rate limiter.
///
/// The index and document components borrow from it, so every request they make shares
/// one limiter.
#[derive(Debug)]
pub struct Client {
    config: Config,
    data_host: Url,
    archive_host: Url,
    headers: HeaderMap,
    limiter: RateLimiter,
    client: ReqwestClient,
}

impl Client {
    /// Creates a client with a blocking HTTP client using the configured timeout.
    pub fn new(config: Config) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(config.timeout).build()?;
        Self::with_client(config, client)
    }

    /// Creates a client around a caller-built HTTP client.
    ///
    /// The identification headers are attached per request, so they do not need to be set
    /// on `client`.
    pub fn with_client(config: Config, client: ReqwestClient) -> Result<Self> {
        let headers = config.headers()?;
        let limiter = RateLimiter::new(config.rate()?);
        let data_host = config.data_host()?;
        let archive_host = config.archive_host()?;

        Ok(Self {
            config,
            data_host,
            archive_host,
            headers,
            limiter,
            client,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    #[must_use]
    pub fn filing_index(&self) -> FilingIndexClient<'_> {
        FilingIndexClient::new(self)
    }

    #[must_use]
    pub fn documents(&self) -> DocumentFetcher<'_> {
        DocumentFetcher::new(self)
    }

    /// Downloads the most recent filing of `form` into the configured output directory.
    ///
    /// Returns `Ok(None)` when the issuer has no filing of that form in its recent index.
    pub fn download_latest(
        &self,
        cik: Cik,
        form: &str,
    ) -> Result<Option<(FilingRecord, PathBuf)>> {
        let index = self.filing_index().fetch_index(cik)?;
        let Some(latest) = index.latest(form) else {
            #[cfg(feature = "tracing")]
            tracing::info!(%cik, form, "no filings of this form");
            return Ok(None);
        };

        let path = self
            .documents()
            .download_filing(cik, latest, &self.config.output_dir)?;
        Ok(Some((latest.clone(), path)))
    }

    pub(crate) fn submissions_url(&self, cik: Cik) -> Result<Url> {
        Ok(self
            .data_host
            .join(&format!("submissions/CIK{}.json", cik.padded()))?)
    }

    pub(crate) fn archive_url(
        &self,
        cik: Cik,
        accession_number: &str,
        primary_document: &str,
    ) -> Result<Url> {
        // Nested documents such as `xslF345X05/form4.xml` keep their `/`; each part is
        // percent-encoded on its own.
        let parts: Vec<&str> = primary_document.split('/').collect();
        if parts
            .iter()
            .any(|part| part.is_empty() || *part == "." || *part == "..")
        {
            return Err(Error::validation(format!(
                "primary document `{primary_document}` is not a relative file path"
            )));
        }

        let cik = cik.padded();
        let folder = types::accession_folder(accession_number);
        let mut url = self.archive_host.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::validation(format!("host {} cannot be a base url", self.archive_host))
            })?
            .pop_if_empty()
            .extend(["Archives", "edgar", "data", cik.as_str(), folder.as_str()])
            .extend(parts);
        Ok(url)
    }

    /// Rate-limited GET; failures are tagged with `kind`.
    pub(crate) fn get(&self, url: Url, kind: Kind) -> Result<Response> {
        let request = self
            .client
            .get(url)
            .build()
            .map_err(|e| Error::with_source(kind, e))?;

        self.limiter.throttle();
        crate::request(&self.client, request, Some(self.headers.clone()), kind)
    }
}

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::throttle::DEFAULT_REQUESTS_PER_SECOND;

pub const DEFAULT_DATA_HOST: &str = "https://data.sec.gov/";
pub const DEFAULT_ARCHIVE_HOST: &str = "https://www.sec.gov/";
pub const DEFAULT_OUTPUT_DIR: &str = "downloaded_10k";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
///
/// EDGAR rejects anonymous traffic, so a company name and contact email are required; they
/// are sent as `User-Agent: "{company_name} {email}"` on every request.
#[non_exhaustive]
#[derive(Clone, Debug, Builder)]
pub struct Config {
    #[builder(into)]
    pub company_name: String,
    #[builder(into)]
    pub email: String,
    #[builder(default = DEFAULT_REQUESTS_PER_SECOND)]
    pub requests_per_second: u32,
    #[builder(into, default = PathBuf::from(DEFAULT_OUTPUT_DIR))]
    pub output_dir: PathBuf,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Overrides the host serving `submissions/CIK##########.json`.
    ///
    /// A path prefix is kept whether or not it ends in `/`.
    pub data_host: Option<Url>,
    /// Overrides the host serving `Archives/edgar/data/...`, with the same path handling as
    /// `data_host`.
    pub archive_host: Option<Url>,
}

impl Config {
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{} {}", self.company_name.trim(), self.email.trim())
    }

    pub(crate) fn rate(&self) -> Result<NonZeroU32> {
        NonZeroU32::new(self.requests_per_second)
            .ok_or_else(|| Error::validation("requests_per_second must be greater than zero"))
    }

    pub(crate) fn data_host(&self) -> Result<Url> {
        resolve_host(self.data_host.as_ref(), DEFAULT_DATA_HOST)
    }

    pub(crate) fn archive_host(&self) -> Result<Url> {
        resolve_host(self.archive_host.as_ref(), DEFAULT_ARCHIVE_HOST)
    }

    /// Identification headers sent with every request.
    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        if self.company_name.trim().is_empty() {
            return Err(Error::validation("company_name must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::validation("email must not be empty"));
        }

        let user_agent = HeaderValue::from_str(&self.user_agent())
            .map_err(|e| Error::validation(format!("unusable user agent: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

fn resolve_host(host: Option<&Url>, default: &str) -> Result<Url> {
    let mut url = match host {
        Some(url) => url.clone(),
        None => Url::parse(default)?,
    };
    if url.cannot_be_a_base() {
        return Err(Error::validation(format!("host {url} cannot be a base url")));
    }
    // `Url::join` replaces the last segment unless the base ends in `/`.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

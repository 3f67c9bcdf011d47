use crate::Result;
use crate::client::Client;
use crate::error::{Error, Kind};
use crate::serde_helpers::deserialize_with_warnings;
use crate::types::{Cik, FilingIndex, FilingRecord, Submissions};

/// Reads issuer submissions indexes from the EDGAR data host.
#[derive(Clone, Copy, Debug)]
pub struct FilingIndexClient<'client> {
    client: &'client Client,
}

impl<'client> FilingIndexClient<'client> {
    pub(crate) fn new(client: &'client Client) -> Self {
        Self { client }
    }

    /// Fetches and assembles the recent filings for `cik`.
    ///
    /// Any transport failure, non-2xx status or undecodable body is a [`Kind::Network`]
    /// error. Filing dates are parsed as ISO `YYYY-MM-DD`, so a single malformed or empty
    /// `filingDate` entry fails the whole index rather than dropping that filing.
    pub fn fetch_index(&self, cik: Cik) -> Result<FilingIndex> {
        let result = self.fetch_submissions(cik);

        #[cfg(feature = "tracing")]
        if let Err(e) = &result {
            tracing::warn!(%cik, error = %e, "error retrieving filings");
        }

        let submissions = result?;
        Ok(FilingIndex::from_recent(
            cik,
            submissions.name,
            submissions.filings.recent,
        ))
    }

    /// Recent filings of `form` for `cik`, most recent first.
    ///
    /// An empty vector means the index was read and nothing matched.
    pub fn filings(&self, cik: Cik, form: &str) -> Result<Vec<FilingRecord>> {
        Ok(self.fetch_index(cik)?.filter_by_form(form))
    }

    fn fetch_submissions(&self, cik: Cik) -> Result<Submissions> {
        let url = self.client.submissions_url(cik)?;
        let response = self.client.get(url, Kind::Network)?;

        let value = response
            .json::<serde_json::Value>()
            .map_err(|e| Error::with_source(Kind::Network, e))?;
        deserialize_with_warnings::<Submissions>(value)
            .map_err(|e| Error::with_source(Kind::Network, e))
    }
}

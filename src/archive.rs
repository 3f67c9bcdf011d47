use std::fs;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::Result;
use crate::client::Client;
use crate::error::{Error, Kind};
use crate::types::{self, Cik, FilingRecord};

/// Characters shown by [`preview`] unless the caller asks otherwise.
pub const PREVIEW_CHARS: usize = 500;

/// Downloads filing documents from the EDGAR archive host.
#[derive(Clone, Copy, Debug)]
pub struct DocumentFetcher<'client> {
    client: &'client Client,
}

impl<'client> DocumentFetcher<'client> {
    pub(crate) fn new(client: &'client Client) -> Self {
        Self { client }
    }

    /// Downloads the primary document of `filing`.
    ///
    /// A filing without a primary document fails with [`crate::error::MissingDocument`]
    /// before any request is made.
    pub fn download_filing(
        &self,
        cik: Cik,
        filing: &FilingRecord,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let Some(primary_document) = filing.primary_document.as_deref() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                %cik,
                accession_number = %filing.accession_number,
                "filing has no primary document"
            );
            return Err(Error::missing_document(&filing.accession_number));
        };

        self.download(cik, &filing.accession_number, primary_document, output_dir)
    }

    /// Downloads one archive document to `{output_dir}/{cik}_{accession}.html`.
    ///
    /// The body is received in full and written through a temporary file in `output_dir`
    /// that is renamed into place, so a failed download never leaves a file at the
    /// returned path.
    pub fn download(
        &self,
        cik: Cik,
        accession_number: &str,
        primary_document: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let result = self.try_download(cik, accession_number, primary_document, output_dir);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(path) => {
                tracing::info!(%cik, accession_number, path = %path.display(), "downloaded document");
            }
            Err(e) => {
                tracing::warn!(%cik, accession_number, error = %e, "error downloading document");
            }
        }

        result
    }

    fn try_download(
        &self,
        cik: Cik,
        accession_number: &str,
        primary_document: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        if primary_document.trim().is_empty() {
            return Err(Error::missing_document(accession_number));
        }
        if types::accession_folder(accession_number).is_empty() {
            return Err(Error::validation(format!(
                "accession number `{accession_number}` is empty"
            )));
        }

        let url = self
            .client
            .archive_url(cik, accession_number, primary_document)?;

        fs::create_dir_all(output_dir).map_err(|e| Error::with_source(Kind::Download, e))?;
        let path = output_dir.join(types::local_filename(cik, accession_number));

        let response = self.client.get(url, Kind::Download)?;
        let body = response
            .bytes()
            .map_err(|e| Error::with_source(Kind::Download, e))?;

        let mut file =
            NamedTempFile::new_in(output_dir).map_err(|e| Error::with_source(Kind::Download, e))?;
        file.write_all(&body)
            .map_err(|e| Error::with_source(Kind::Download, e))?;
        file.persist(&path)
            .map_err(|e| Error::with_source(Kind::Download, e.error))?;

        Ok(path)
    }
}

/// Reads back the first `max_chars` characters of a downloaded document.
///
/// Invalid UTF-8 is replaced rather than rejected; filings are not always clean.
pub fn preview(path: &Path, max_chars: usize) -> Result<String> {
    let mut bytes = Vec::new();
    fs::File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(path = %path.display(), error = %e, "error reading file");
            Error::with_source(Kind::FileIo, e)
        })?;

    Ok(String::from_utf8_lossy(&bytes).chars().take(max_chars).collect())
}

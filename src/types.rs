use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::Result;
use crate::error::Error;

/// Form code of the annual report.
pub const FORM_10K: &str = "10-K";

/// Central Index Key, the issuer identifier assigned by EDGAR.
///
/// Always rendered zero-padded to ten digits, which is the form EDGAR expects in URLs and
/// the form used for local filenames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cik(u64);

impl Cik {
    pub const MAX: u64 = 9_999_999_999;

    pub fn new(value: u64) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::validation(format!(
                "cik {value} does not fit in 10 digits"
            )));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn padded(self) -> String {
        format!("{:010}", self.0)
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl TryFrom<u64> for Cik {
    type Error = Error;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        Cik::new(value)
    }
}

impl FromStr for Cik {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("CIK")
            .or_else(|| trimmed.strip_prefix("cik"))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::validation(format!(
                "cik `{s}` must be a non-negative integer"
            )));
        }
        if digits.trim_start_matches('0').len() > 10 {
            return Err(Error::validation(format!(
                "cik `{s}` does not fit in 10 digits"
            )));
        }

        let value = digits
            .parse::<u64>()
            .map_err(|e| Error::validation(format!("cik `{s}`: {e}")))?;
        Cik::new(value)
    }
}

/// Accession number with its hyphens removed, as used in archive paths.
#[must_use]
pub fn accession_folder(accession_number: &str) -> String {
    accession_number.replace('-', "")
}

/// Deterministic local filename for a downloaded filing document.
#[must_use]
pub fn local_filename(cik: Cik, accession_number: &str) -> String {
    format!("{cik}_{}.html", accession_folder(accession_number))
}

/// One filing from an issuer's submissions index.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingRecord {
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub form: String,
    pub primary_document: Option<String>,
}

impl FilingRecord {
    #[must_use]
    pub fn new(
        accession_number: String,
        filing_date: NaiveDate,
        form: String,
        primary_document: Option<String>,
    ) -> Self {
        Self {
            accession_number,
            filing_date,
            form,
            primary_document,
        }
    }

    #[must_use]
    pub fn accession_folder(&self) -> String {
        accession_folder(&self.accession_number)
    }
}

/// Parallel sequences as served under `filings.recent`.
///
/// `primary_document` may be shorter than the other sequences, and EDGAR sends an empty
/// string for filings without one.
#[serde_as]
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(default)]
    pub filing_date: Vec<NaiveDate>,
    #[serde(default)]
    pub accession_number: Vec<String>,
    #[serde_as(as = "Vec<NoneAsEmptyString>")]
    #[serde(default)]
    pub primary_document: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Submissions {
    #[serde(default)]
    pub(crate) name: Option<String>,
    pub(crate) filings: SubmissionsFilings,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionsFilings {
    pub(crate) recent: RecentFilings,
}

/// An issuer's recent filings, most recent first as EDGAR orders them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilingIndex {
    cik: Cik,
    name: Option<String>,
    filings: Vec<FilingRecord>,
}

impl FilingIndex {
    /// Assembles records from the parallel wire sequences.
    ///
    /// Only the common prefix of `form`, `filing_date` and `accession_number` is used.
    /// Positions past the end of `primary_document` get no document.
    #[must_use]
    pub fn from_recent(cik: Cik, name: Option<String>, recent: RecentFilings) -> Self {
        let RecentFilings {
            form,
            filing_date,
            accession_number,
            primary_document,
        } = recent;

        let len = form.len().min(filing_date.len()).min(accession_number.len());
        #[cfg(feature = "tracing")]
        if len != form.len() || len != filing_date.len() || len != accession_number.len() {
            tracing::warn!(
                %cik,
                forms = form.len(),
                filing_dates = filing_date.len(),
                accession_numbers = accession_number.len(),
                "filing index sequences differ in length, truncating"
            );
        }

        let mut documents = primary_document.into_iter();
        let filings = form
            .into_iter()
            .zip(filing_date)
            .zip(accession_number)
            .take(len)
            .map(|((form, filing_date), accession_number)| {
                let primary_document = documents.next().flatten();
                FilingRecord::new(accession_number, filing_date, form, primary_document)
            })
            .collect();

        Self { cik, name, filings }
    }

    #[must_use]
    pub fn cik(&self) -> Cik {
        self.cik
    }

    /// Registered issuer name, when the index supplied one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn filings(&self) -> &[FilingRecord] {
        &self.filings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }

    /// Filings whose form code equals `form` exactly, in index order.
    #[must_use]
    pub fn filter_by_form(&self, form: &str) -> Vec<FilingRecord> {
        self.filings
            .iter()
            .filter(|filing| filing.form == form)
            .cloned()
            .collect()
    }

    /// The first, and so most recent, filing of the given form.
    #[must_use]
    pub fn latest(&self, form: &str) -> Option<&FilingRecord> {
        self.filings.iter().find(|filing| filing.form == form)
    }
}

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use reqwest::{Method, StatusCode};

/// Which stage of the retrieval pipeline failed.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// The submissions index could not be fetched or decoded.
    Network,
    /// An archive document could not be fetched or written.
    Download,
    /// A downloaded document could not be read back.
    FileIo,
    /// A caller supplied value was rejected before any request was made.
    Validation,
    /// The HTTP client itself could not be set up.
    Internal,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Network => "network error",
            Kind::Download => "download error",
            Kind::FileIo => "file i/o error",
            Kind::Validation => "validation error",
            Kind::Internal => "internal error",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Returns the typed source of this error, if it is an `E`.
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let source = self.source.as_deref()?;
        source.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Self::with_source(
            Kind::Validation,
            Validation {
                reason: reason.into(),
            },
        )
    }

    pub fn status<S: Into<String>>(
        kind: Kind,
        status_code: StatusCode,
        method: Method,
        path: String,
        message: S,
    ) -> Self {
        Self::with_source(
            kind,
            Status {
                status_code,
                method,
                path,
                message: message.into(),
            },
        )
    }

    pub fn missing_document<S: Into<String>>(accession_number: S) -> Self {
        Self::with_source(
            Kind::Download,
            MissingDocument {
                accession_number: accession_number.into(),
            },
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{}: {}", self.kind, src),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// A non-2xx response from one of the EDGAR hosts.
#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

/// The filing selected for download lists no primary document.
#[non_exhaustive]
#[derive(Debug)]
pub struct MissingDocument {
    pub accession_number: String,
}

impl fmt::Display for MissingDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no document for filing {}", self.accession_number)
    }
}

impl StdError for MissingDocument {}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_should_downcast() {
        let err = Error::validation("cik out of range");

        assert_eq!(err.kind(), Kind::Validation);
        let source = err.downcast_ref::<Validation>().expect("validation source");
        assert_eq!(source.reason, "cik out of range");
        assert_eq!(err.to_string(), "validation error: invalid: cik out of range");
    }

    #[test]
    fn missing_document_should_name_accession() {
        let err = Error::missing_document("0000936468-24-000029");

        assert_eq!(err.kind(), Kind::Download);
        assert_eq!(
            err.to_string(),
            "download error: no document for filing 0000936468-24-000029"
        );
        assert!(err.downcast_ref::<Status>().is_none());
    }

    #[test]
    fn status_should_render_call_details() {
        let err = Error::status(
            Kind::Network,
            StatusCode::NOT_FOUND,
            Method::GET,
            "/submissions/CIK0000000001.json".to_owned(),
            "Not Found",
        );

        let status = err.downcast_ref::<Status>().expect("status source");
        assert_eq!(status.status_code, StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "network error: error(404 Not Found) making GET call to \
             /submissions/CIK0000000001.json with Not Found"
        );
    }
}

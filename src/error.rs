use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures that abort a page-archiving run.
///
/// URL parse failures inside reference classification are absorbed there and
/// never reach this type; everything else propagates unchanged to the caller.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid page url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),

    #[error("output directory unavailable: '{}'", path.display())]
    DirectoryUnavailable { path: PathBuf },

    #[error("error downloading from url '{url}'")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("resource '{url}' returned status {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("error saving file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

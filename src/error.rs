use thiserror::Error;

/// Everything that can stop a run. No variant is retried or recovered from;
/// the caller logs the error and terminates.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// A DOM structure the extraction depends on is absent from the page.
    #[error("Expected element not found: {0}")]
    MissingElement(&'static str),

    /// The sidebar holds no `<ul>` containing the "All versions" marker.
    #[error("No version list containing 'All versions' was found in the sidebar")]
    VersionListNotFound,
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrerenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Timed out after {timeout:?} waiting for {url} to fire its load event")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("Timed out after {timeout:?} waiting for selector {selector:?}")]
    SelectorTimeout { selector: String, timeout: Duration },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

impl PrerenderError {
    /// A short, user-facing hint on how to get past the failure.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            PrerenderError::Launch(_) => Some(
                "Ensure a Chromium or Chrome binary is installed and discoverable on PATH.",
            ),
            PrerenderError::Navigation { .. } => {
                Some("Check the URL, connectivity, and that the scheme is http or https.")
            }
            PrerenderError::NavigationTimeout { .. } => {
                Some("Increase --load or check that the page finishes loading.")
            }
            PrerenderError::SelectorTimeout { .. } => Some(
                "Increase --js or verify the selector matches an element the page renders.",
            ),
            PrerenderError::Write { .. } => {
                Some("Check that the output path is valid and writable.")
            }
            PrerenderError::Io(_) | PrerenderError::Browser(_) => None,
        }
    }
}

impl From<chromiumoxide::error::CdpError> for PrerenderError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        PrerenderError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PrerenderError>;

//! Prerender Library
//!
//! Fetches the fully rendered HTML of javascript-driven pages by steering a
//! headless Chromium instance: navigate, wait for a readiness signal (a CSS
//! selector or a fixed delay), then serialize the live DOM.
//!
//! # Module Overview
//!
//! - [`options`] - resolution of raw command-line values into the run record
//! - [`browser`] - engine seam, chromiumoxide backend, and the fetch workflow
//! - [`sink`] - delivery of the captured HTML to a file or stdout
//! - [`error`] - crate-level error type with user-facing remediation hints

pub mod browser;
pub mod error;
pub mod options;
pub mod sink;

// Browser module re-exports
pub use browser::{
    BrowserEngine, BrowserSession, ChromiumEngine, ChromiumSession, ContextOptions, FetchOptions,
    PageFetcher,
};
pub use error::{PrerenderError, Result};
pub use options::{
    resolve_options, Options, RawOptions, WaitStrategy, DEFAULT_JS_TIMEOUT, DEFAULT_LOAD_TIMEOUT,
    DEFAULT_SLEEP,
};
pub use sink::{resolve_output_path, write_output};

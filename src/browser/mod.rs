//! Browser automation for headless page prerendering.
//!
//! # Module Structure
//!
//! - [`engine`] - the engine/session seam the fetch pipeline drives
//! - [`chromium`] - chromiumoxide-backed production engine
//! - [`fetcher`] - the single-page fetch workflow
//!
//! # Example
//!
//! ```no_run
//! use prerender_lib::{ChromiumEngine, ContextOptions, FetchOptions, PageFetcher, WaitStrategy};
//! use std::time::Duration;
//!
//! # async fn example() -> prerender_lib::Result<()> {
//! let fetcher = PageFetcher::new(ChromiumEngine);
//! let html = fetcher
//!     .fetch(&FetchOptions {
//!         url: "https://example.com".to_string(),
//!         load_timeout: Duration::from_millis(30_000),
//!         wait: WaitStrategy::FixedDelay(Duration::from_millis(1_000)),
//!         context: ContextOptions::default(),
//!         headless: true,
//!     })
//!     .await?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

mod chromium;
mod engine;
mod fetcher;

pub use chromium::{ChromiumEngine, ChromiumSession};
pub use engine::{BrowserEngine, BrowserSession, ContextOptions};
pub use fetcher::{FetchOptions, PageFetcher};

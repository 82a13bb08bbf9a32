//! The seam between the fetch pipeline and the browser automation backend.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Browsing-context parameters forwarded to the engine. Unset fields keep
/// the engine's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    pub user_agent: Option<String>,
    pub locale: Option<String>,
}

/// Launches browser instances.
///
/// A launch failure means there is nothing to release; once `launch` has
/// returned a session, [`BrowserSession::close`] must run exactly once.
#[async_trait]
pub trait BrowserEngine {
    type Session: BrowserSession;

    async fn launch(&self, headless: bool) -> Result<Self::Session>;
}

/// One exclusively-owned browser instance holding a single browsing context
/// and page for the lifetime of the run.
#[async_trait]
pub trait BrowserSession: Send {
    /// Create the browsing context and open the page.
    async fn open_page(&mut self, context: &ContextOptions) -> Result<()>;

    /// Navigate and wait for the document load event, bounded by `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Block until an element matching `selector` exists in the live DOM,
    /// bounded by `timeout`.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Unconditional fixed delay with no early exit.
    async fn wait(&mut self, delay: Duration);

    /// Serialize the current DOM state of the page.
    async fn content(&mut self) -> Result<String>;

    /// Tear the instance down.
    async fn close(self) -> Result<()>;
}

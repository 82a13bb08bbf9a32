//! chromiumoxide-backed engine: drives a Chromium instance over the Chrome
//! DevTools Protocol.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::engine::{BrowserEngine, BrowserSession, ContextOptions};
use crate::error::{PrerenderError, Result};

/// Poll interval for the selector wait.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Launches real Chromium instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumEngine;

/// A running Chromium process plus the task draining its CDP event stream.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Option<Page>,
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    type Session = ChromiumSession;

    async fn launch(&self, headless: bool) -> Result<ChromiumSession> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(PrerenderError::Launch)?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|err| PrerenderError::Launch(err.to_string()))?;

        // Drain CDP events for the lifetime of the instance.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(ChromiumSession {
            browser,
            handler,
            page: None,
        })
    }
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| PrerenderError::Browser("no page open in this session".to_string()))
    }

    async fn apply_context(&self, page: &Page, context: &ContextOptions) -> Result<()> {
        if context.user_agent.is_none() && context.locale.is_none() {
            return Ok(());
        }

        // CDP requires a user-agent string even when only the locale is
        // overridden; read the browser's own back and reuse it.
        let user_agent = match &context.user_agent {
            Some(ua) => ua.clone(),
            None => self.browser.version().await?.user_agent,
        };

        let mut params = SetUserAgentOverrideParams::builder().user_agent(user_agent);
        if let Some(locale) = &context.locale {
            params = params.accept_language(locale.clone());
        }
        let params = params.build().map_err(PrerenderError::Browser)?;

        page.set_user_agent(params).await?;
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn open_page(&mut self, context: &ContextOptions) -> Result<()> {
        let page = self.browser.new_page("about:blank").await?;
        self.apply_context(&page, context).await?;
        self.page = Some(page);
        Ok(())
    }

    async fn navigate(&mut self, url: &str, load_timeout: Duration) -> Result<()> {
        let page = self.page()?;
        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<(), PrerenderError>(())
        };

        match timeout(load_timeout, navigation).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(PrerenderError::Browser(message))) => Err(PrerenderError::Navigation {
                url: url.to_string(),
                message,
            }),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(PrerenderError::NavigationTimeout {
                url: url.to_string(),
                timeout: load_timeout,
            }),
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, wait_timeout: Duration) -> Result<()> {
        let page = self.page()?;
        let found = timeout(wait_timeout, async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
            }
        })
        .await;

        found.map_err(|_| PrerenderError::SelectorTimeout {
            selector: selector.to_string(),
            timeout: wait_timeout,
        })
    }

    async fn wait(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.page()?.content().await?)
    }

    async fn close(mut self) -> Result<()> {
        self.page = None;
        let closed = self.browser.close().await.map(|_| ());
        let _ = self.browser.wait().await;
        self.handler.abort();
        closed.map_err(PrerenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headed_config_builds() {
        let config = BrowserConfig::builder().with_head().build();
        assert!(config.is_ok(), "headed browser config should build");
    }

    #[test]
    fn headless_config_builds() {
        let config = BrowserConfig::builder().build();
        assert!(config.is_ok(), "headless browser config should build");
    }
}

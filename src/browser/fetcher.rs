//! The single-page fetch workflow: launch, navigate, wait, capture, release.

use std::time::Duration;

use super::engine::{BrowserEngine, BrowserSession, ContextOptions};
use crate::error::Result;
use crate::options::{Options, WaitStrategy};

/// Parameters for one fetch, derived from a resolved [`Options`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub load_timeout: Duration,
    pub wait: WaitStrategy,
    pub context: ContextOptions,
    pub headless: bool,
}

impl FetchOptions {
    /// Build fetch parameters from the run record. Returns `None` when no
    /// URL was supplied (the user-input gap the caller handles with a
    /// guidance message).
    pub fn from_options(options: &Options) -> Option<Self> {
        let url = options.url.clone()?;
        Some(Self {
            url,
            load_timeout: options.load_timeout,
            wait: options.wait.clone(),
            context: ContextOptions {
                user_agent: options.user_agent.clone(),
                locale: options.locale.clone(),
            },
            headless: !options.show_browser,
        })
    }
}

/// Runs the fetch pipeline against a [`BrowserEngine`].
#[derive(Debug, Clone, Copy)]
pub struct PageFetcher<E> {
    engine: E,
}

impl<E: BrowserEngine> PageFetcher<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Fetch the rendered HTML of `options.url`.
    ///
    /// The session is released exactly once on every path after a successful
    /// launch; a launch failure leaves nothing to release. Failures are
    /// single-shot: nothing is retried, and a close failure never masks the
    /// fetch error that preceded it.
    pub async fn fetch(&self, options: &FetchOptions) -> Result<String> {
        let mut session = self.engine.launch(options.headless).await?;
        let outcome = Self::run(&mut session, options).await;
        let closed = session.close().await;

        match outcome {
            Ok(html) => closed.map(|()| html),
            Err(err) => Err(err),
        }
    }

    async fn run(session: &mut E::Session, options: &FetchOptions) -> Result<String> {
        session.open_page(&options.context).await?;
        session
            .navigate(&options.url, options.load_timeout)
            .await?;

        match &options.wait {
            WaitStrategy::Selector { selector, timeout } => {
                session.wait_for_selector(selector, *timeout).await?;
            }
            WaitStrategy::FixedDelay(delay) => {
                session.wait(*delay).await;
            }
        }

        session.content().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrerenderError;
    use crate::options::{DEFAULT_JS_TIMEOUT, DEFAULT_LOAD_TIMEOUT, DEFAULT_SLEEP};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const RENDERED: &str = "<html><body><div id=\"app\">rendered</div></body></html>";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum FailAt {
        Nowhere,
        Launch,
        Navigate,
        SelectorWait,
    }

    #[derive(Debug, Default)]
    struct EngineLog {
        launches: AtomicUsize,
        closes: AtomicUsize,
        headless: Mutex<Option<bool>>,
        context: Mutex<Option<ContextOptions>>,
        navigated: Mutex<Vec<String>>,
        selector_waits: Mutex<Vec<String>>,
        fixed_delays: AtomicUsize,
    }

    #[derive(Clone)]
    struct FakeEngine {
        log: Arc<EngineLog>,
        fail_at: FailAt,
    }

    impl FakeEngine {
        fn new(fail_at: FailAt) -> Self {
            Self {
                log: Arc::new(EngineLog::default()),
                fail_at,
            }
        }
    }

    struct FakeSession {
        log: Arc<EngineLog>,
        fail_at: FailAt,
    }

    #[async_trait]
    impl BrowserEngine for FakeEngine {
        type Session = FakeSession;

        async fn launch(&self, headless: bool) -> Result<FakeSession> {
            if self.fail_at == FailAt::Launch {
                return Err(PrerenderError::Launch("no chromium executable".to_string()));
            }
            self.log.launches.fetch_add(1, Ordering::SeqCst);
            *self.log.headless.lock().unwrap() = Some(headless);
            Ok(FakeSession {
                log: Arc::clone(&self.log),
                fail_at: self.fail_at,
            })
        }
    }

    #[async_trait]
    impl BrowserSession for FakeSession {
        async fn open_page(&mut self, context: &ContextOptions) -> Result<()> {
            *self.log.context.lock().unwrap() = Some(context.clone());
            Ok(())
        }

        async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<()> {
            if self.fail_at == FailAt::Navigate {
                return Err(PrerenderError::Navigation {
                    url: url.to_string(),
                    message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
                });
            }
            self.log.navigated.lock().unwrap().push(url.to_string());
            Ok(())
        }

        async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
            if self.fail_at == FailAt::SelectorWait {
                return Err(PrerenderError::SelectorTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            self.log
                .selector_waits
                .lock()
                .unwrap()
                .push(selector.to_string());
            Ok(())
        }

        async fn wait(&mut self, _delay: Duration) {
            self.log.fixed_delays.fetch_add(1, Ordering::SeqCst);
        }

        async fn content(&mut self) -> Result<String> {
            Ok(RENDERED.to_string())
        }

        async fn close(self) -> Result<()> {
            self.log.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn fetch_options(wait: WaitStrategy) -> FetchOptions {
        FetchOptions {
            url: "https://example.com".to_string(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            wait,
            context: ContextOptions::default(),
            headless: true,
        }
    }

    #[tokio::test]
    async fn fetch_returns_rendered_content_and_releases_browser() {
        let engine = FakeEngine::new(FailAt::Nowhere);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        let html = fetcher
            .fetch(&fetch_options(WaitStrategy::FixedDelay(Duration::ZERO)))
            .await
            .expect("fetch succeeds");

        assert_eq!(html, RENDERED);
        assert_eq!(log.launches.load(Ordering::SeqCst), 1);
        assert_eq!(log.closes.load(Ordering::SeqCst), 1);
        assert_eq!(
            log.navigated.lock().unwrap().as_slice(),
            ["https://example.com"]
        );
    }

    #[tokio::test]
    async fn selector_wait_never_runs_the_fixed_delay() {
        let engine = FakeEngine::new(FailAt::Nowhere);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        fetcher
            .fetch(&fetch_options(WaitStrategy::Selector {
                selector: ".js-loaded".to_string(),
                timeout: DEFAULT_JS_TIMEOUT,
            }))
            .await
            .expect("fetch succeeds");

        assert_eq!(
            log.selector_waits.lock().unwrap().as_slice(),
            [".js-loaded"]
        );
        assert_eq!(log.fixed_delays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fixed_delay_never_runs_the_selector_wait() {
        let engine = FakeEngine::new(FailAt::Nowhere);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        fetcher
            .fetch(&fetch_options(WaitStrategy::FixedDelay(DEFAULT_SLEEP)))
            .await
            .expect("fetch succeeds");

        assert_eq!(log.fixed_delays.load(Ordering::SeqCst), 1);
        assert!(log.selector_waits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn navigation_failure_still_releases_browser() {
        let engine = FakeEngine::new(FailAt::Navigate);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        let err = fetcher
            .fetch(&fetch_options(WaitStrategy::FixedDelay(DEFAULT_SLEEP)))
            .await
            .expect_err("navigation fails");

        assert!(matches!(err, PrerenderError::Navigation { .. }));
        assert_eq!(log.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn selector_timeout_still_releases_browser() {
        let engine = FakeEngine::new(FailAt::SelectorWait);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        let err = fetcher
            .fetch(&fetch_options(WaitStrategy::Selector {
                selector: "#never".to_string(),
                timeout: DEFAULT_JS_TIMEOUT,
            }))
            .await
            .expect_err("selector wait fails");

        assert!(matches!(err, PrerenderError::SelectorTimeout { .. }));
        assert_eq!(log.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn launch_failure_leaves_nothing_to_release() {
        let engine = FakeEngine::new(FailAt::Launch);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        let err = fetcher
            .fetch(&fetch_options(WaitStrategy::FixedDelay(DEFAULT_SLEEP)))
            .await
            .expect_err("launch fails");

        assert!(matches!(err, PrerenderError::Launch(_)));
        assert_eq!(log.launches.load(Ordering::SeqCst), 0);
        assert_eq!(log.closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn context_receives_the_exact_ua_and_locale() {
        let engine = FakeEngine::new(FailAt::Nowhere);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        let mut options = fetch_options(WaitStrategy::FixedDelay(DEFAULT_SLEEP));
        options.context = ContextOptions {
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_string()),
            locale: Some("de-DE".to_string()),
        };

        fetcher.fetch(&options).await.expect("fetch succeeds");

        let observed = log.context.lock().unwrap().clone().expect("context seen");
        assert_eq!(
            observed.user_agent.as_deref(),
            Some("Mozilla/5.0 (X11; Linux x86_64)")
        );
        assert_eq!(observed.locale.as_deref(), Some("de-DE"));
    }

    #[tokio::test]
    async fn show_browser_disables_headless() {
        let engine = FakeEngine::new(FailAt::Nowhere);
        let log = Arc::clone(&engine.log);
        let fetcher = PageFetcher::new(engine);

        let mut options = fetch_options(WaitStrategy::FixedDelay(DEFAULT_SLEEP));
        options.headless = false;

        fetcher.fetch(&options).await.expect("fetch succeeds");

        assert_eq!(*log.headless.lock().unwrap(), Some(false));
    }

    #[test]
    fn from_options_requires_a_url() {
        let resolved = crate::options::resolve_options(&crate::options::RawOptions::default());
        assert!(FetchOptions::from_options(&resolved).is_none());
    }

    #[test]
    fn from_options_maps_the_run_record() {
        let raw = crate::options::RawOptions {
            url: Some("example.com".to_string()),
            user_agent: Some("agent".to_string()),
            locale: Some("en-US".to_string()),
            show_browser: true,
            ..Default::default()
        };
        let resolved = crate::options::resolve_options(&raw);
        let fetch = FetchOptions::from_options(&resolved).expect("url present");

        assert_eq!(fetch.url, "https://example.com");
        assert_eq!(fetch.context.user_agent.as_deref(), Some("agent"));
        assert_eq!(fetch.context.locale.as_deref(), Some("en-US"));
        assert!(!fetch.headless);
        assert_eq!(fetch.load_timeout, DEFAULT_LOAD_TIMEOUT);
        assert_eq!(fetch.wait, WaitStrategy::FixedDelay(DEFAULT_SLEEP));
    }
}

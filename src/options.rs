//! Resolution of raw command-line values into the immutable run record.

use std::time::Duration;

/// Default bound on the document load event.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default bound on the selector wait.
pub const DEFAULT_JS_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Default fixed delay before capture when no selector is given.
pub const DEFAULT_SLEEP: Duration = Duration::from_millis(1_000);

/// Values as they came off the command line, before any defaulting.
///
/// Duration-like fields stay strings here: anything that does not parse as a
/// positive integer falls back to its default instead of aborting the run.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub help: bool,
    pub url: Option<String>,
    pub output: Option<String>,
    pub load: Option<String>,
    pub js: Option<String>,
    pub selector: Option<String>,
    pub sleep: Option<String>,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
    pub show_browser: bool,
    pub debug: bool,
}

/// How the fetcher decides the page is ready after the load event.
///
/// The two arms are mutually exclusive: a selector wait never falls back to
/// the fixed delay, and the fixed delay never inspects the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Block until an element matching the selector appears, bounded.
    Selector {
        selector: String,
        timeout: Duration,
    },
    /// Sleep unconditionally, then capture regardless of page state.
    FixedDelay(Duration),
}

/// The resolved run parameters. Built once per invocation, never mutated.
#[derive(Debug, Clone)]
pub struct Options {
    pub help: bool,
    /// Resolved target, scheme included. `None` means no URL was supplied.
    pub url: Option<String>,
    /// Destination file as typed; `None` prints to stdout.
    pub output: Option<String>,
    pub load_timeout: Duration,
    pub wait: WaitStrategy,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
    pub show_browser: bool,
    pub debug: bool,
}

/// Resolve raw values into an [`Options`] record, applying defaults.
pub fn resolve_options(raw: &RawOptions) -> Options {
    let wait = match trimmed(raw.selector.as_deref()) {
        Some(selector) => WaitStrategy::Selector {
            selector,
            timeout: parse_millis(raw.js.as_deref(), DEFAULT_JS_TIMEOUT),
        },
        None => WaitStrategy::FixedDelay(parse_millis(raw.sleep.as_deref(), DEFAULT_SLEEP)),
    };

    Options {
        help: raw.help,
        url: trimmed(raw.url.as_deref()).map(|url| normalize_url(&url)),
        output: trimmed(raw.output.as_deref()),
        load_timeout: parse_millis(raw.load.as_deref(), DEFAULT_LOAD_TIMEOUT),
        wait,
        user_agent: trimmed(raw.user_agent.as_deref()),
        locale: trimmed(raw.locale.as_deref()),
        show_browser: raw.show_browser,
        debug: raw.debug,
    }
}

/// Dump the raw argv and the resolved record to stderr (debug mode).
pub fn log_debug(raw_args: &[String], options: &Options) {
    eprintln!("Raw args: {:?}", raw_args);
    eprintln!("Resolved options: {:?}", options);
}

fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn parse_millis(raw: Option<&str>, default: Duration) -> Duration {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(default)
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

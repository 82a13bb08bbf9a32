use clap::Parser;
use prerender_lib::RawOptions;

const EXAMPLES: &str = "\
Examples:
  prerender --url=http://example.com
      prerender http://example.com and print to stdout
  prerender --url=example.com
      prerender https://example.com (https is assumed without a scheme)
  prerender --url=example.com --load=60000
      allow up to 60 seconds for the document load event
  prerender --url=example.com --output=example
      save to ./example.html
  prerender --url=example.com --sleep=5000
      capture after an unconditional 5 second delay
  prerender --url=example.com --js=10000 --selector='.js-loaded'
      capture once the selector matches, waiting up to 10 seconds
      (--sleep is ignored whenever --selector is given)
  prerender --url=example.com --ua='Mozilla/5.0 ...' --locale=de-DE
      override the browser user agent and locale";

#[derive(Parser)]
#[command(name = "prerender")]
#[command(
    version,
    about = "Fetch, prerender, and return the html contents of javascript rendered pages",
    after_help = EXAMPLES
)]
pub struct Cli {
    #[arg(
        long,
        help = "The url to visit and prerender (https:// is assumed when no scheme is given)"
    )]
    pub url: Option<String>,

    #[arg(
        long,
        help = "File path for the page content; prints to stdout when omitted, and .html is appended when the path has no extension"
    )]
    pub output: Option<String>,

    #[arg(
        long,
        alias = "network",
        value_name = "MS",
        help = "Timeout in milliseconds for the document load event (default 30000)"
    )]
    pub load: Option<String>,

    #[arg(
        long,
        value_name = "MS",
        help = "Timeout in milliseconds for the selector wait; only used with --selector (default 5000)"
    )]
    pub js: Option<String>,

    #[arg(long, help = "CSS selector to wait for before capturing the page")]
    pub selector: Option<String>,

    #[arg(
        long,
        value_name = "MS",
        help = "Fixed delay in milliseconds before capturing; only used when --selector is omitted (default 1000)"
    )]
    pub sleep: Option<String>,

    #[arg(long, help = "Browser user agent override")]
    pub ua: Option<String>,

    #[arg(long, help = "Browser locale override (e.g. en-US)")]
    pub locale: Option<String>,

    #[arg(long, help = "Show the browser window instead of running headless")]
    pub show: bool,

    #[arg(long, help = "Emit the raw and resolved options to stderr")]
    pub debug: bool,

    #[arg(value_name = "COMMAND", hide = true)]
    pub command: Option<String>,
}

impl Cli {
    /// Map the clap surface onto the resolver's raw record. A bare `help`
    /// positional counts as a help request, like `-h`/`--help`.
    pub fn into_raw(self) -> RawOptions {
        RawOptions {
            help: self.command.as_deref() == Some("help"),
            url: self.url,
            output: self.output,
            load: self.load,
            js: self.js,
            selector: self.selector,
            sleep: self.sleep,
            user_agent: self.ua,
            locale: self.locale,
            show_browser: self.show,
            debug: self.debug,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

mod cli;
mod formatting;

use std::process::ExitCode;

use clap::CommandFactory;

use prerender_lib::{options, resolve_options, sink, ChromiumEngine, FetchOptions, PageFetcher};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    let resolved = resolve_options(&args.into_raw());

    if resolved.debug {
        options::log_debug(&raw_args, &resolved);
    }

    if resolved.help {
        let _ = cli::Cli::command().print_long_help();
        return ExitCode::SUCCESS;
    }

    let Some(fetch) = FetchOptions::from_options(&resolved) else {
        formatting::render_missing_url();
        return ExitCode::SUCCESS;
    };

    let fetcher = PageFetcher::new(ChromiumEngine);
    let html = match fetcher.fetch(&fetch).await {
        Ok(html) => html,
        Err(err) => return formatting::render_error(err),
    };

    let target = resolved.output.as_deref().map(sink::resolve_output_path);
    match sink::write_output(&html, target.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => formatting::render_error(err),
    }
}

use std::io::IsTerminal;
use std::process::ExitCode;

use prerender_lib::PrerenderError;

/// Print the missing-URL guidance. A user-input gap, not a failure.
pub fn render_missing_url() {
    let colorize = std::io::stderr().is_terminal();
    eprintln!(
        "\n{}",
        color(
            "Missing required option --url. Run again with the --help option to see CLI help.",
            "33",
            colorize,
        )
    );
}

/// Render a fatal error with its remediation hint and return the fatal exit
/// code.
pub fn render_error(err: PrerenderError) -> ExitCode {
    let colorize = std::io::stderr().is_terminal();
    eprintln!("{} {}", color("[ERROR]", "31", colorize), err);
    if let Some(hint) = err.remediation() {
        eprintln!("Hint: {hint}");
    }
    ExitCode::from(2)
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(PrerenderError::Browser("boom".to_string()));
        // ExitCode has no PartialEq; compare the debug rendering.
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(2)));
    }

    #[test]
    fn color_wraps_only_when_enabled() {
        assert_eq!(color("hi", "33", false), "hi");
        assert_eq!(color("hi", "33", true), "\x1b[33mhi\x1b[0m");
    }
}

//! Delivery of the captured HTML to a file or to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrerenderError, Result};

/// Determine the final file path: keep an existing extension, append `.html`
/// when there is none.
pub fn resolve_output_path(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_os_string();
        with_ext.push(".html");
        PathBuf::from(with_ext)
    }
}

/// Write the HTML to `output` as UTF-8, overwriting any existing file, or
/// print it to stdout when no path is set.
pub fn write_output(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, html).map_err(|source| PrerenderError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{html}");
            Ok(())
        }
    }
}

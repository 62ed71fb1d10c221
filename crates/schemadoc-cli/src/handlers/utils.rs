//! Shared utilities for command handlers

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::{extract_file, ExtractOptions, Extraction, ParseReport};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse one table dump, with a spinner while it runs
pub fn load_schema(path: &Path, options: &ExtractOptions, output: &OutputWriter) -> Result<Extraction> {
    let _timer = Timer::with_details("parse", &path.display().to_string());
    let spinner = output.spinner(&format!("Parsing {}", path.display()));

    let result = extract_file(path, options);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    Ok(result?)
}

/// Write a generated file, creating its directory first
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let _timer = Timer::with_details("write", &path.display().to_string());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::write(path, e))?;

    debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(())
}

/// Tell the user how many lines the parser dropped
pub fn report_skips(report: &ParseReport, output: &mut OutputWriter) -> Result<()> {
    if !report.has_skips() {
        return Ok(());
    }

    for skipped in &report.skipped {
        debug!(
            origin = %report.origin,
            line = skipped.line,
            reason = %skipped.reason,
            "Skipped line"
        );
    }

    output.warning(&format!(
        "{} line(s) skipped in {}; run `schemadoc inspect` for details",
        report.skipped.len(),
        report.origin
    ))
}

//! Viewer command handler

use super::utils::write_file;
use crate::cli::ViewerArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::dual::{LEGACY, NDC_PLUS};
use schemadoc_core::viewer::embed_schema_data;
use schemadoc_core::DualSchemaDocument;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Handle the viewer command
///
/// Any JSON document is embedded as is, pretty-printed; it does not have to
/// be one this version wrote.
pub fn handle_viewer(args: ViewerArgs, output: &mut OutputWriter) -> Result<()> {
    let text = fs::read_to_string(&args.schema).map_err(|e| schemadoc_core::Error::io(&args.schema, e))?;
    let data: serde_json::Value = serde_json::from_str(&text)?;

    let json = serde_json::to_string_pretty(&data)?;
    refresh_viewer(&args.html, &json)?;

    match DualSchemaDocument::from_json(&text) {
        Ok(document) => output.success(&format!(
            "✓ Embedded {} NDC PLUS and {} Legacy tables",
            document.schema(NDC_PLUS).map_or(0, |s| s.table_count),
            document.schema(LEGACY).map_or(0, |s| s.table_count),
        ))?,
        Err(e) => debug!(error = %e, "Schema data is not a dual document, embedded without counts"),
    }
    output.success(&format!("✓ Updated schema data in {}", args.html.display()))
}

/// Replace the data object embedded in `html` with `json`.
///
/// The file is only rewritten once the new page has been built.
pub fn refresh_viewer(html: &Path, json: &str) -> Result<()> {
    let _timer = Timer::with_details("refresh_viewer", &html.display().to_string());

    let page = fs::read_to_string(html).map_err(|e| schemadoc_core::Error::io(html, e))?;
    let updated = embed_schema_data(&page, json)?;
    write_file(html, &updated)
}

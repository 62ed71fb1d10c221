//! Dual schema command handler

use super::utils::{load_schema, report_skips, write_file};
use super::viewer::refresh_viewer;
use crate::cli::DualArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::dual::{legacy_info, LEGACY, NDC_PLUS};
use schemadoc_core::DualSchemaDocument;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
struct DualSummary {
    ndc_plus_tables: usize,
    legacy_tables: usize,
    cross_schema_relationships: usize,
    output: PathBuf,
    viewer: Option<PathBuf>,
}

/// Handle the dual command
pub fn handle_dual(args: DualArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let ndc_path = args.ndc.unwrap_or_else(|| config.paths.ndc_input.clone());
    let legacy_path = args.legacy.unwrap_or_else(|| config.paths.legacy_input.clone());
    let out = args.out.unwrap_or_else(|| config.paths.dual_output.clone());
    let viewer = args.viewer.or_else(|| config.paths.viewer_html.clone());

    let options = config.extract_options();
    let ndc = load_schema(&ndc_path, &options, output)?;
    report_skips(&ndc.report, output)?;
    let legacy = load_schema(&legacy_path, &options, output)?;
    report_skips(&legacy.report, output)?;

    let document = {
        let _timer = Timer::new("build_dual_schema");
        DualSchemaDocument::build(
            (&ndc.model, &config.document),
            (&legacy.model, &legacy_info()),
            &options.rules,
        )
    };
    let json = document.to_json_pretty()?;
    write_file(&out, &json)?;

    if let Some(html) = &viewer {
        refresh_viewer(html, &json)?;
    }

    info!(
        output = %out.display(),
        cross_schema = document.cross_schema_relationships.len(),
        "Dual schema document written"
    );

    let summary = DualSummary {
        ndc_plus_tables: document.schema(NDC_PLUS).map_or(0, |s| s.table_count),
        legacy_tables: document.schema(LEGACY).map_or(0, |s| s.table_count),
        cross_schema_relationships: document.cross_schema_relationships.len(),
        output: out,
        viewer,
    };

    if output.is_human() {
        output.success(&format!(
            "✓ Combined {} NDC PLUS and {} Legacy tables ({} cross-schema relationships)",
            summary.ndc_plus_tables, summary.legacy_tables, summary.cross_schema_relationships
        ))?;
        output.success(&format!("✓ Wrote {}", summary.output.display()))?;
        if let Some(html) = &summary.viewer {
            output.success(&format!("✓ Updated schema data in {}", html.display()))?;
        }
        Ok(())
    } else {
        output.data(&summary)
    }
}

//! Generate command handler

use super::utils::{load_schema, report_skips, write_file};
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::render::ddl;
use schemadoc_core::{MarkdownGenerator, SchemaDocument};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

pub const JSON_FILE: &str = "ndc_plus_schema.json";
pub const MARKDOWN_FILE: &str = "NDC_PLUS_SCHEMA.md";
pub const DDL_FILE: &str = "ndc_plus_schema.sql";

/// What a generate run produced
#[derive(Debug, Serialize)]
struct GenerateSummary {
    input: PathBuf,
    tables: usize,
    columns: usize,
    relationships: usize,
    skipped_lines: usize,
    files: Vec<PathBuf>,
}

/// Handle the generate command
pub fn handle_generate(args: GenerateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.paths.ndc_input.clone());
    let out_dir = args.out_dir.unwrap_or_else(|| config.paths.out_dir.clone());

    output.info(&format!("Parsing {}", input.display()))?;
    let extraction = load_schema(&input, &config.extract_options(), output)?;
    report_skips(&extraction.report, output)?;

    let model = &extraction.model;
    let mut files = Vec::new();

    let json = {
        let _timer = Timer::new("render_json");
        SchemaDocument::from_model(model, &config.document).to_json_pretty()?
    };
    let json_path = out_dir.join(JSON_FILE);
    write_file(&json_path, &json)?;
    files.push(json_path);

    let markdown = {
        let _timer = Timer::new("render_markdown");
        MarkdownGenerator::new(&config.document).generate(model)
    };
    let markdown_path = out_dir.join("docs").join(MARKDOWN_FILE);
    write_file(&markdown_path, &markdown)?;
    files.push(markdown_path);

    if args.ddl {
        let ddl_path = out_dir.join(DDL_FILE);
        write_file(&ddl_path, &ddl::create_statements(model))?;
        files.push(ddl_path);
    }

    info!(input = %input.display(), files = files.len(), "Documentation generated");

    let summary = GenerateSummary {
        input,
        tables: extraction.report.tables,
        columns: extraction.report.columns,
        relationships: extraction.report.relationships,
        skipped_lines: extraction.report.skipped.len(),
        files,
    };

    if output.is_human() {
        output.success(&format!(
            "✓ Parsed {} tables ({} columns) with {} inferred relationships",
            summary.tables, summary.columns, summary.relationships
        ))?;
        for file in &summary.files {
            output.success(&format!("✓ Wrote {}", file.display()))?;
        }
        Ok(())
    } else {
        output.data(&summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    const DUMP: &str = "\
TABLE: EVENT
Column                         Null?      Type
------------------------------ ---------- ----------
UUID                           NOT NULL   RAW(16)
EVID                                      NUMBER(18)

TABLE: EVENT_HYPOTHESIS
UUID                           NOT NULL   RAW(16)
EVENT_UUID                     NOT NULL   RAW(16)
";

    fn sink() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_generate_writes_all_outputs() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("NDC_PLUS_tables.txt");
        fs::write(&input, DUMP).unwrap();
        let out_dir = dir.path().join("schema");

        let args = GenerateArgs {
            input: Some(input),
            out_dir: Some(out_dir.clone()),
            ddl: true,
        };
        handle_generate(args, &Config::default(), &mut sink()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join(JSON_FILE)).unwrap()).unwrap();
        assert_eq!(json["tables"]["EVENT"]["columns"]["UUID"]["primary_key"], true);
        assert_eq!(json["tables"]["EVENT_HYPOTHESIS"]["relationships"][0]["to_table"], "EVENT");

        let markdown = fs::read_to_string(out_dir.join("docs").join(MARKDOWN_FILE)).unwrap();
        assert!(markdown.contains("erDiagram"));

        let sql = fs::read_to_string(out_dir.join(DDL_FILE)).unwrap();
        assert!(sql.contains("CREATE TABLE EVENT ("));
    }

    #[test]
    fn test_generate_is_repeatable() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("dump.txt");
        fs::write(&input, DUMP).unwrap();
        let out_dir = dir.path().join("out");

        let run = || {
            let args = GenerateArgs {
                input: Some(input.clone()),
                out_dir: Some(out_dir.clone()),
                ddl: false,
            };
            handle_generate(args, &Config::default(), &mut sink()).unwrap();
            (
                fs::read(out_dir.join(JSON_FILE)).unwrap(),
                fs::read(out_dir.join("docs").join(MARKDOWN_FILE)).unwrap(),
            )
        };

        assert_eq!(run(), run());
        assert!(!out_dir.join(DDL_FILE).exists());
    }

    #[test]
    fn test_generate_uses_config_descriptions() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("dump.txt");
        fs::write(&input, DUMP).unwrap();

        let mut config = Config::default();
        config.paths.out_dir = dir.path().join("configured");
        config
            .descriptions
            .insert("EVENT".to_string(), "Events as configured".to_string());

        let args = GenerateArgs {
            input: Some(input),
            ..GenerateArgs::default()
        };
        handle_generate(args, &config, &mut sink()).unwrap();

        let json = fs::read_to_string(dir.path().join("configured").join(JSON_FILE)).unwrap();
        assert!(json.contains("\"description\": \"Events as configured\""));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        fs::write(&input, "\n  \n").unwrap();
        let out_dir = dir.path().join("schema");

        let args = GenerateArgs {
            input: Some(input),
            out_dir: Some(out_dir.clone()),
            ddl: false,
        };
        let err = handle_generate(args, &Config::default(), &mut sink()).unwrap_err();

        assert!(matches!(err, Error::Core(schemadoc_core::Error::EmptyInput { .. })));
        assert_ne!(err.exit_code(), 0);
        assert!(!out_dir.exists());
    }
}

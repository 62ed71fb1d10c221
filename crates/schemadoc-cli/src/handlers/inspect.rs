//! Inspect command handler

use super::utils::load_schema;
use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use schemadoc_core::{Extraction, Relationship, Table};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TableDetail<'a> {
    table: &'a Table,
    relationships: Vec<&'a Relationship>,
}

/// Handle the inspect command
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.paths.ndc_input.clone());
    let extraction = load_schema(&input, &config.extract_options(), output)?;

    match args.table {
        Some(name) => show_table(&extraction, &name, output),
        None => show_summary(&extraction, output),
    }
}

fn show_summary(extraction: &Extraction, output: &mut OutputWriter) -> Result<()> {
    let model = &extraction.model;
    let report = &extraction.report;

    if !output.is_human() {
        return output.data(report);
    }

    output.section(&format!("Schema: {}", report.origin))?;
    output.writeln(&format!(
        "{} tables, {} columns, {} relationships, {} skipped lines",
        report.tables,
        report.columns,
        report.relationships,
        report.skipped.len()
    ))?;

    output.section("Tables")?;
    let rows = model
        .tables()
        .map(|table| {
            vec![
                table.name.clone(),
                table.category.title().to_string(),
                table.columns.len().to_string(),
                table
                    .primary_keys()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect();
    output.table(&["Table", "Category", "Columns", "Keys"], rows)?;

    if !model.relationships().is_empty() {
        output.section("Relationships")?;
        output.table(&["From", "To", "Rule"], relationship_rows(model.relationships().iter()))?;
    }

    if report.has_skips() {
        output.section("Skipped lines")?;
        let rows = report
            .skipped
            .iter()
            .map(|s| vec![s.line.to_string(), s.reason.to_string(), s.content.clone()])
            .collect();
        output.table(&["Line", "Reason", "Content"], rows)?;
    }

    Ok(())
}

fn show_table(extraction: &Extraction, name: &str, output: &mut OutputWriter) -> Result<()> {
    let model = &extraction.model;
    let table = model.table(name).ok_or_else(|| Error::TableNotFound {
        name: name.to_string(),
        origin: extraction.report.origin.clone(),
    })?;
    let relationships: Vec<&Relationship> = model.relationships_involving(&table.name).collect();

    if !output.is_human() {
        return output.data(&TableDetail { table, relationships });
    }

    output.section(&table.name)?;
    output.writeln(&table.description)?;
    output.writeln(&format!("Category: {}", table.category.title()))?;
    output.writeln("")?;

    let rows = table
        .columns
        .iter()
        .map(|column| {
            vec![
                column.name.clone(),
                column.data_type.clone(),
                column.json_type().to_string(),
                if column.nullable { "Yes" } else { "No" }.to_string(),
                if column.primary_key { "✓" } else { "" }.to_string(),
            ]
        })
        .collect();
    output.table(&["Column", "Type", "JSON Type", "Nullable", "Key"], rows)?;

    if !relationships.is_empty() {
        output.section("Relationships")?;
        output.table(&["From", "To", "Rule"], relationship_rows(relationships.into_iter()))?;
    }

    Ok(())
}

fn relationship_rows<'a>(relationships: impl Iterator<Item = &'a Relationship>) -> Vec<Vec<String>> {
    relationships
        .map(|r| {
            vec![
                format!("{}.{}", r.from_table, r.from_column),
                format!("{}.{}", r.to_table, r.to_column),
                r.rule.to_string(),
            ]
        })
        .collect()
}

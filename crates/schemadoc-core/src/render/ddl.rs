//! Oracle DDL rendering
//!
//! Inferred relationships are written as comments only; they are guesses
//! and must never become constraints.

use crate::model::{SchemaModel, Table};
use std::fmt::Write;

/// Render one `CREATE TABLE` statement per table, in source order
pub fn create_statements(model: &SchemaModel) -> String {
    let mut output = String::new();
    for (index, table) in model.tables().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&create_table(model, table));
    }
    output
}

fn create_table(model: &SchemaModel, table: &Table) -> String {
    let mut sql = String::new();
    let _ = writeln!(sql, "-- {}", table.description);

    for rel in model.relationships_from(&table.name) {
        let _ = writeln!(
            sql,
            "-- {} may reference {}.{}",
            rel.from_column, rel.to_table, rel.to_column
        );
    }

    let _ = writeln!(sql, "CREATE TABLE {} (", table.name);

    let keys: Vec<&str> = table.primary_keys().map(|c| c.name.as_str()).collect();
    let width = table.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let mut line = format!("    {:<width$} {}", column.name, column.data_type, width = width);
            if !column.nullable {
                line.push_str(" NOT NULL");
            }
            line
        })
        .collect();
    if !keys.is_empty() {
        lines.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
    }

    let _ = writeln!(sql, "{}", lines.join(",\n"));
    let _ = writeln!(sql, ");");
    sql
}

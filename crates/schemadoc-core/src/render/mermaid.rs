//! Mermaid diagram markup for inferred relationships

use crate::model::SchemaModel;
use std::collections::HashSet;
use std::fmt::Write;

/// Render an `erDiagram` with one edge per inferred relationship.
///
/// Edges read referenced table first (`EVENT ||--o{ EVENT_HYPOTHESIS`) and
/// carry the referencing column as label. Returns `None` when the model has
/// no relationships, since Mermaid rejects an empty diagram.
pub fn er_diagram(model: &SchemaModel) -> Option<String> {
    if model.relationships().is_empty() {
        return None;
    }

    let mut output = String::new();
    let mut seen = HashSet::new();
    let _ = writeln!(output, "erDiagram");

    for rel in model.relationships() {
        if !seen.insert((&rel.to_table, &rel.from_table, &rel.from_column)) {
            continue;
        }
        let _ = writeln!(
            output,
            "    {} ||--o{{ {} : \"{}\"",
            entity_name(&rel.to_table),
            entity_name(&rel.from_table),
            rel.from_column
        );
    }

    Some(output)
}

/// Mermaid entity names allow word characters and hyphens only
fn entity_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

//! Markdown documentation generator
//!
//! Output is a pure function of the model and the generator configuration:
//! categories in display order, tables in source order, columns in
//! declaration order. Nothing time- or environment-dependent is written.

use crate::catalog::Category;
use crate::model::{SchemaModel, Table};
use crate::render::json::DocumentInfo;
use crate::render::mermaid;

/// Markdown generator configuration
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Include table of contents
    pub include_toc: bool,
    /// Include the Mermaid relationship diagram
    pub include_diagram: bool,
    /// Include per-table relationship lists
    pub include_relationships: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            include_toc: true,
            include_diagram: true,
            include_relationships: true,
        }
    }
}

/// Markdown documentation generator
pub struct MarkdownGenerator<'a> {
    info: &'a DocumentInfo,
    config: MarkdownConfig,
}

impl<'a> MarkdownGenerator<'a> {
    pub fn new(info: &'a DocumentInfo) -> Self {
        Self::with_config(info, MarkdownConfig::default())
    }

    pub fn with_config(info: &'a DocumentInfo, config: MarkdownConfig) -> Self {
        Self { info, config }
    }

    /// Generate the whole document
    pub fn generate(&self, model: &SchemaModel) -> String {
        let groups = model.tables_by_category();
        let mut doc = String::new();

        doc.push_str(&format!("# {} Documentation\n\n", self.info.title));
        doc.push_str("## Overview\n\n");
        doc.push_str(&format!("{}.\n\n", self.info.description.trim_end_matches('.')));
        doc.push_str(&format!(
            "This is an {} database schema with {} tables organized into {} functional groups, \
             {} columns and {} inferred relationships.\n\n",
            self.info.database_type,
            model.table_count(),
            groups.len(),
            model.column_count(),
            model.relationships().len()
        ));

        if self.config.include_toc {
            doc.push_str(&table_of_contents(&groups));
        }

        if self.config.include_diagram {
            doc.push_str("## Key Relationships\n\n");
            match mermaid::er_diagram(model) {
                Some(diagram) => {
                    doc.push_str("```mermaid\n");
                    doc.push_str(&diagram);
                    doc.push_str("```\n\n");
                }
                None => doc.push_str("No relationships were inferred.\n\n"),
            }
            doc.push_str(
                "Relationships are inferred from column naming conventions and are not \
                 enforced by the database.\n\n",
            );
        }

        doc.push_str("## Detailed Table Specifications\n\n");
        for (category, tables) in &groups {
            doc.push_str(&format!("## {}\n\n", category));
            for table in tables {
                doc.push_str(&self.table_section(model, table));
            }
        }

        doc.push_str(&footer());
        doc
    }

    fn table_section(&self, model: &SchemaModel, table: &Table) -> String {
        let mut section = format!("### {}\n\n", table.name);
        section.push_str(&format!("**Description**: {}\n\n", escape_cell(&table.description)));
        section.push_str(&format!("**Column Count**: {}\n\n", table.columns.len()));

        section.push_str("| Column | Type | Nullable | Primary Key |\n");
        section.push_str("|--------|------|----------|-------------|\n");
        for column in &table.columns {
            section.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&column.name),
                escape_cell(&column.data_type),
                if column.nullable { "Yes" } else { "No" },
                if column.primary_key { "✓" } else { "" }
            ));
        }
        section.push('\n');

        if self.config.include_relationships {
            let related: Vec<_> = model.relationships_involving(&table.name).collect();
            if !related.is_empty() {
                section.push_str("**Relationships**:\n\n");
                for rel in related {
                    if rel.from_table == table.name {
                        section.push_str(&format!(
                            "- References **{}**.{} via {}",
                            rel.to_table, rel.to_column, rel.from_column
                        ));
                        if let Some(note) = &rel.note {
                            section.push_str(&format!(" ({})", note));
                        }
                        section.push('\n');
                    } else {
                        section.push_str(&format!(
                            "- Referenced by **{}**.{}\n",
                            rel.from_table, rel.from_column
                        ));
                    }
                }
                section.push('\n');
            }
        }

        section.push_str("---\n\n");
        section
    }
}

fn table_of_contents(groups: &[(Category, Vec<&Table>)]) -> String {
    let mut result = String::from("## Table Categories\n\n");

    for (category, tables) in groups {
        result.push_str(&format!("### {}\n\n", category));
        for table in tables {
            result.push_str(&format!(
                "- [**{}**](#{}): {}\n",
                table.name,
                anchor(&table.name),
                escape_cell(&table.description)
            ));
        }
        result.push('\n');
    }

    result
}

/// GitHub-style heading anchor
pub fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Single-line text safe inside a table cell or list item
fn escape_cell(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").replace('|', "\\|")
}

fn footer() -> String {
    "*Generated by schemadoc*\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Relationship, RelationshipRule};

    fn sample() -> SchemaModel {
        let mut model = SchemaModel::new();
        model.insert_table(Table::new("EVENT").with_columns([
            Column::new("EVID", "NUMBER(18)").not_null().primary(),
            Column::new("AUTH", "VARCHAR2(15)"),
        ]));
        model.insert_table(
            Table::new("EVENT_HYPOTHESIS").with_columns([Column::new("EVENT_UUID", "RAW(16)")]),
        );
        model.insert_table(Table::new("ORIGIN").with_columns([Column::new("WFID", "NUMBER(18)")]));
        model.set_relationships(vec![
            Relationship {
                from_table: "EVENT_HYPOTHESIS".to_string(),
                from_column: "EVENT_UUID".to_string(),
                to_table: "EVENT".to_string(),
                to_column: "EVID".to_string(),
                rule: RelationshipRule::UuidSuffix,
                note: None,
            },
            Relationship {
                from_table: "ORIGIN".to_string(),
                from_column: "WFID".to_string(),
                to_table: "WAVEFORM".to_string(),
                to_column: "WFID".to_string(),
                rule: RelationshipRule::External,
                note: Some("External reference".to_string()),
            },
        ]);
        model
    }

    #[test]
    fn test_document_sections() {
        let info = DocumentInfo::default();
        let doc = MarkdownGenerator::new(&info).generate(&sample());

        assert!(doc.starts_with("# NDC PLUS Database Schema Documentation\n"));
        assert!(doc.contains("3 tables organized into 2 functional groups"));
        assert!(doc.contains("## Table Categories"));
        assert!(doc.contains("- [**EVENT**](#event): Seismic event master table"));
        assert!(doc.contains("```mermaid\nerDiagram\n"));
        assert!(doc.contains("## Event Management"));
        assert!(doc.contains("## Other"));
        assert!(doc.contains("| EVID | NUMBER(18) | No | ✓ |"));
        assert!(doc.contains("| AUTH | VARCHAR2(15) | Yes |  |"));
        assert!(doc.contains("- Referenced by **EVENT_HYPOTHESIS**.EVENT_UUID"));
        assert!(doc.contains("- References **EVENT**.EVID via EVENT_UUID\n"));
        assert!(doc.contains("- References **WAVEFORM**.WFID via WFID (External reference)"));
        assert!(doc.ends_with("*Generated by schemadoc*\n"));
    }

    #[test]
    fn test_description_overrides_stay_on_one_line() {
        let mut model = SchemaModel::new();
        let mut table = Table::new("EVENT").with_columns([Column::new("EVID", "NUMBER(18)")]);
        table.description = "Events | hypotheses\nsecond line".to_string();
        model.insert_table(table);

        let info = DocumentInfo::default();
        let doc = MarkdownGenerator::new(&info).generate(&model);
        assert!(doc.contains("- [**EVENT**](#event): Events \\| hypotheses second line\n"));
        assert!(doc.contains("**Description**: Events \\| hypotheses second line\n\n"));
    }

    #[test]
    fn test_category_order_then_source_order() {
        let info = DocumentInfo::default();
        let doc = MarkdownGenerator::new(&info).generate(&sample());
        let event = doc.find("### EVENT\n").unwrap();
        let hypothesis = doc.find("### EVENT_HYPOTHESIS\n").unwrap();
        let origin = doc.find("### ORIGIN\n").unwrap();
        assert!(event < hypothesis && hypothesis < origin);
    }

    #[test]
    fn test_optional_sections_can_be_disabled() {
        let info = DocumentInfo::default();
        let config = MarkdownConfig {
            include_toc: false,
            include_diagram: false,
            include_relationships: false,
        };
        let doc = MarkdownGenerator::with_config(&info, config).generate(&sample());
        assert!(!doc.contains("## Table Categories"));
        assert!(!doc.contains("```mermaid"));
        assert!(!doc.contains("**Relationships**"));
    }

    #[test]
    fn test_diagram_placeholder_without_relationships() {
        let mut model = sample();
        model.set_relationships(Vec::new());
        let info = DocumentInfo::default();
        let doc = MarkdownGenerator::new(&info).generate(&model);
        assert!(doc.contains("No relationships were inferred."));
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("EVENT_HYPOTHESIS"), "event_hypothesis");
        assert_eq!(anchor("Channel & Waveform Data"), "channel--waveform-data");
    }

    #[test]
    fn test_pipe_in_type_is_escaped() {
        assert_eq!(escape_cell("A|B"), "A\\|B");
    }
}

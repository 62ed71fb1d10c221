//! Property-based tests for the schema extractor
//!
//! Generated dumps mix well-formed rows in both layouts with rows that carry
//! a column name only.

use proptest::prelude::*;
use schemadoc_core::{extract_str, DocumentInfo, ExtractOptions, MarkdownGenerator, SchemaDocument};

/// One generated row: column name, type, nullable, layout, well-formed
#[derive(Debug, Clone)]
struct Row {
    name: String,
    data_type: &'static str,
    nullable: bool,
    fixed_width: bool,
    well_formed: bool,
}

impl Row {
    fn render(&self) -> String {
        if !self.well_formed {
            return self.name.clone();
        }
        let null_marker = if self.nullable { "" } else { "NOT NULL" };
        if self.fixed_width {
            format!("{:<30} {:<10} {}", self.name, null_marker, self.data_type)
        } else {
            format!("{} {} {}", self.name, self.data_type, null_marker)
        }
    }
}

fn type_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("NUMBER(18)"),
        Just("VARCHAR2(32)"),
        Just("RAW(16)"),
        Just("FLOAT(126)"),
        Just("DATE"),
        Just("TIMESTAMP(6) WITH TIME ZONE"),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    proptest::collection::vec(
        (
            "[A-Z][A-Z0-9_]{0,10}",
            type_strategy(),
            any::<bool>(),
            any::<bool>(),
            prop::bool::weighted(0.85),
        ),
        0..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, data_type, nullable, fixed_width, well_formed))| Row {
                // index suffix keeps names unique within a table
                name: format!("{}_{}", name, i),
                data_type,
                nullable,
                fixed_width,
                well_formed,
            })
            .collect()
    })
}

fn dump_strategy() -> impl Strategy<Value = Vec<(String, Vec<Row>)>> {
    proptest::collection::btree_set("[A-Z]{1,8}(_[A-Z]{1,8})?", 1..6).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let count = names.len();
        (Just(names), proptest::collection::vec(rows_strategy(), count))
            .prop_map(|(names, rows)| names.into_iter().zip(rows).collect())
    })
}

fn render_dump(blocks: &[(String, Vec<Row>)]) -> String {
    let mut text = String::new();
    for (name, rows) in blocks {
        text.push_str(&format!("TABLE: {}\n", name));
        text.push_str("Column                         Null?      Type\n");
        text.push_str("------------------------------ ---------- ----------\n");
        for row in rows {
            text.push_str(&row.render());
            text.push('\n');
        }
        text.push('\n');
    }
    text
}

proptest! {
    #[test]
    fn prop_column_count_matches_well_formed_rows(blocks in dump_strategy()) {
        let text = render_dump(&blocks);
        let any_column = blocks.iter().any(|(_, rows)| rows.iter().any(|r| r.well_formed));

        match extract_str(&text, "prop", &ExtractOptions::default()) {
            Ok(extraction) => {
                prop_assert!(any_column);
                for (name, rows) in &blocks {
                    let expected: Vec<&Row> = rows.iter().filter(|r| r.well_formed).collect();
                    match extraction.model.table(name) {
                        Some(table) => {
                            prop_assert_eq!(table.columns.len(), expected.len());
                            for (column, row) in table.columns.iter().zip(expected) {
                                prop_assert_eq!(&column.name, &row.name);
                                prop_assert_eq!(column.data_type.as_str(), row.data_type);
                                prop_assert_eq!(column.nullable, row.nullable);
                            }
                        }
                        None => prop_assert!(expected.is_empty()),
                    }
                }
            }
            Err(_) => prop_assert!(!any_column),
        }
    }

    #[test]
    fn prop_rendering_is_idempotent(blocks in dump_strategy()) {
        let text = render_dump(&blocks);
        let info = DocumentInfo::default();
        let run = || {
            extract_str(&text, "prop", &ExtractOptions::default()).ok().map(|extraction| {
                let json = SchemaDocument::from_model(&extraction.model, &info)
                    .to_json_pretty()
                    .unwrap();
                let markdown = MarkdownGenerator::new(&info).generate(&extraction.model);
                (json, markdown)
            })
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_json_round_trip(blocks in dump_strategy()) {
        let text = render_dump(&blocks);
        if let Ok(extraction) = extract_str(&text, "prop", &ExtractOptions::default()) {
            let json = SchemaDocument::from_model(&extraction.model, &DocumentInfo::default())
                .to_json_pretty()
                .unwrap();
            let restored = SchemaDocument::from_json(&json).unwrap().into_model();

            let before: Vec<_> = extraction.model.tables().collect();
            let after: Vec<_> = restored.tables().collect();
            prop_assert_eq!(before, after);
            prop_assert_eq!(extraction.model.relationships(), restored.relationships());
        }
    }
}

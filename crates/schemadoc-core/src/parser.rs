//! Schema extractor for flat-text table dumps
//!
//! The input is a sequence of blocks, each introduced by a `TABLE: <NAME>`
//! marker and followed by one row per column:
//!
//! ```text
//! TABLE: EVENT
//! Column                         Null?      Type
//! ------------------------------ ---------- ------------
//! EVID                           NOT NULL   NUMBER(18)
//! AUTH                                      VARCHAR2(15)
//! ```
//!
//! The first whitespace run separates the column name from the rest of the
//! row. Nullability and primary-key markers may appear anywhere after the
//! name, so the inline form `EVID NUMBER(18) NOT NULL PRIMARY` parses to the
//! same column. Rows that cannot be read are recorded in the
//! [`ParseReport`] and parsing carries on.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{Column, ParseReport, SchemaModel, SkipReason, SkippedLine, Table};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

static TABLE_MARKER: OnceLock<Regex> = OnceLock::new();

fn table_marker() -> &'static Regex {
    TABLE_MARKER.get_or_init(|| Regex::new(r"^TABLE:\s*(.*?)\s*$").unwrap())
}

/// Primary-key conventions applied while reading rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// A non-nullable column with this name is a key
    pub uuid_column: String,
    /// Columns that are always keys, whatever their nullability
    pub always_key_columns: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            uuid_column: "UUID".to_string(),
            always_key_columns: vec!["INID".to_string(), "STA_GRP_NAME".to_string()],
        }
    }
}

/// One classified source line
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Marker(&'a str),
    Ignored,
    Row(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = table_marker().captures(line) {
        return Line::Marker(caps.get(1).map_or("", |m| m.as_str()));
    }
    if line.is_empty() || line.starts_with("Column") || line.starts_with("---") {
        return Line::Ignored;
    }
    // sqlplus DESCRIBE header
    if line.starts_with("Name") && line.contains("Null?") {
        return Line::Ignored;
    }
    Line::Row(line)
}

/// Table being filled while its rows are read
struct OpenTable {
    table: Table,
    marker_line: usize,
    marker: String,
}

/// Parser turning schema text into a [`SchemaModel`]
pub struct SchemaParser<'a> {
    options: &'a ParserOptions,
    catalog: &'a Catalog,
}

impl<'a> SchemaParser<'a> {
    pub fn new(options: &'a ParserOptions, catalog: &'a Catalog) -> Self {
        Self { options, catalog }
    }

    /// Parse a whole source text.
    ///
    /// `origin` names the source in errors and in the report. Fails when the
    /// text is empty or yields no table; malformed rows never fail.
    pub fn parse(&self, text: &str, origin: &str) -> Result<(SchemaModel, ParseReport)> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput {
                origin: origin.to_string(),
            });
        }

        let mut model = SchemaModel::new();
        let mut report = ParseReport {
            origin: origin.to_string(),
            ..ParseReport::default()
        };
        let mut open: Option<OpenTable> = None;
        // Rows after a nameless marker belong to no table
        let mut in_nameless_block = false;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            match classify(line) {
                Line::Ignored => {}
                Line::Marker(name) => {
                    if let Some(finished) = open.take() {
                        self.close_table(finished, &mut model, &mut report);
                    }
                    if name.is_empty() {
                        skip(&mut report, line_no, line, SkipReason::EmptyTableName);
                        in_nameless_block = true;
                        continue;
                    }
                    in_nameless_block = false;
                    trace!(table = name, line = line_no, "Table marker");
                    open = Some(OpenTable {
                        table: self.new_table(name),
                        marker_line: line_no,
                        marker: line.to_string(),
                    });
                }
                Line::Row(row) => {
                    let Some(current) = open.as_mut() else {
                        if !in_nameless_block {
                            skip(&mut report, line_no, row, SkipReason::OutsideTable);
                        }
                        continue;
                    };
                    match self.parse_row(row) {
                        Some(column) if current.table.has_column(&column.name) => {
                            skip(&mut report, line_no, row, SkipReason::DuplicateColumn);
                        }
                        Some(column) => current.table.columns.push(column),
                        None => skip(&mut report, line_no, row, SkipReason::MissingType),
                    }
                }
            }
        }

        if let Some(finished) = open.take() {
            self.close_table(finished, &mut model, &mut report);
        }

        if model.is_empty() {
            return Err(Error::NoTables {
                origin: origin.to_string(),
            });
        }

        report.tables = model.table_count();
        report.columns = model.column_count();
        debug!(
            origin = origin,
            tables = report.tables,
            columns = report.columns,
            skipped = report.skipped.len(),
            "Parsed schema text"
        );

        Ok((model, report))
    }

    fn new_table(&self, name: &str) -> Table {
        let mut table = Table::new(name);
        table.description = self.catalog.description(name);
        table.category = self.catalog.category(name);
        table
    }

    fn close_table(&self, open: OpenTable, model: &mut SchemaModel, report: &mut ParseReport) {
        if open.table.columns.is_empty() {
            skip(report, open.marker_line, &open.marker, SkipReason::EmptyTable);
            return;
        }
        let name = open.table.name.clone();
        if model.insert_table(open.table).is_some() {
            warn!(table = %name, line = open.marker_line, "Table defined twice, keeping the later definition");
        }
    }

    /// Parse one column row, `None` when the row has no type
    fn parse_row(&self, row: &str) -> Option<Column> {
        let (name, rest) = row.split_once(char::is_whitespace)?;

        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let mut type_tokens: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut nullable = true;
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if token.eq_ignore_ascii_case("NOT")
                && tokens.get(i + 1).is_some_and(|t| t.eq_ignore_ascii_case("NULL"))
            {
                nullable = false;
                i += 2;
                continue;
            }
            if !token.eq_ignore_ascii_case("NULL") {
                type_tokens.push(token);
            }
            i += 1;
        }

        let mut explicit_key = false;
        if type_tokens.len() >= 2
            && type_tokens[type_tokens.len() - 1].eq_ignore_ascii_case("KEY")
            && type_tokens[type_tokens.len() - 2].eq_ignore_ascii_case("PRIMARY")
        {
            type_tokens.truncate(type_tokens.len() - 2);
            explicit_key = true;
        } else if type_tokens
            .last()
            .is_some_and(|t| t.eq_ignore_ascii_case("PRIMARY"))
        {
            type_tokens.pop();
            explicit_key = true;
        }

        if type_tokens.is_empty() {
            return None;
        }

        let declared_key = explicit_key || (!nullable && name == self.options.uuid_column);
        let key_by_convention = !declared_key && self.options.always_key_columns.iter().any(|k| k == name);

        Some(Column {
            name: name.to_string(),
            data_type: type_tokens.join(" "),
            nullable,
            primary_key: declared_key || key_by_convention,
            key_by_convention,
        })
    }
}

fn skip(report: &mut ParseReport, line: usize, content: &str, reason: SkipReason) {
    debug!(line = line, reason = %reason, "Skipping line");
    report.skipped.push(SkippedLine {
        line,
        content: content.to_string(),
        reason,
    });
}

//! Schema model: tables, columns and inferred relationships
//!
//! The model is built fresh by every parse run and handed to the renderers
//! by value or reference. Nothing here is cached between runs.

use crate::catalog::{Catalog, Category};
use crate::types::JsonType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column as declared in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Raw declared type, e.g. `VARCHAR2(32)`
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    /// Key only because of its name, not declared by its table
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub key_by_convention: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            primary_key: false,
            key_by_convention: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn conventional_key(mut self) -> Self {
        self.primary_key = true;
        self.key_by_convention = true;
        self
    }

    fn is_declared_key(&self) -> bool {
        self.primary_key && !self.key_by_convention
    }

    pub fn json_type(&self) -> JsonType {
        JsonType::from_oracle(&self.data_type)
    }
}

/// A named table with its ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: Catalog::default().description(&name),
            category: Category::for_table(&name),
            name,
            columns: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// Keys that identify rows of this table.
    ///
    /// These are the declared keys when the table has any, otherwise the
    /// keys that come from naming conventions alone.
    pub fn identity_keys(&self) -> impl Iterator<Item = &Column> {
        let declared = self.columns.iter().any(Column::is_declared_key);
        self.primary_keys()
            .filter(move |c| !declared || c.is_declared_key())
    }

    /// First identity key, the one relationships point at
    pub fn primary_key(&self) -> Option<&Column> {
        self.identity_keys().next()
    }
}

/// Which inference rule produced a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipRule {
    /// `<TABLE>_UUID` column
    UuidSuffix,
    /// `<TABLE>_GID` column
    GidSuffix,
    /// Column named like another table's key
    KeyName,
    /// Configured reference to a table outside the model
    External,
}

impl fmt::Display for RelationshipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipRule::UuidSuffix => write!(f, "uuid_suffix"),
            RelationshipRule::GidSuffix => write!(f, "gid_suffix"),
            RelationshipRule::KeyName => write!(f, "key_name"),
            RelationshipRule::External => write!(f, "external"),
        }
    }
}

/// An inferred, non-enforced reference between two tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub rule: RelationshipRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Relationship {
    pub fn involves(&self, table: &str) -> bool {
        self.from_table == table || self.to_table == table
    }
}

/// All tables and relationships of one parse run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    tables: IndexMap<String, Table>,
    relationships: Vec<Relationship>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. A table with the same name is replaced in place and
    /// returned; its position in the model does not change.
    pub fn insert_table(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(table.name.clone(), table)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Tables in registration order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn set_relationships(&mut self, relationships: Vec<Relationship>) {
        self.relationships = relationships;
    }

    /// Relationships whose source is `table`
    pub fn relationships_from<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.relationships.iter().filter(move |r| r.from_table == table)
    }

    /// Relationships that start or end at `table`
    pub fn relationships_involving<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> {
        self.relationships.iter().filter(move |r| r.involves(table))
    }

    /// Tables grouped by category, categories in display order, tables in
    /// registration order. Empty categories are left out.
    pub fn tables_by_category(&self) -> Vec<(Category, Vec<&Table>)> {
        Category::ALL
            .iter()
            .filter_map(|category| {
                let tables: Vec<&Table> = self
                    .tables
                    .values()
                    .filter(|t| t.category == *category)
                    .collect();
                (!tables.is_empty()).then_some((*category, tables))
            })
            .collect()
    }
}

/// Why a source line did not make it into the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Column-like line before the first table marker
    OutsideTable,
    /// `TABLE:` marker with no name
    EmptyTableName,
    /// Row with a column name but no type
    MissingType,
    /// Column name already seen in this table
    DuplicateColumn,
    /// Table marker whose block held no columns
    EmptyTable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::OutsideTable => "row outside any table block",
            SkipReason::EmptyTableName => "table marker without a name",
            SkipReason::MissingType => "column row without a type",
            SkipReason::DuplicateColumn => "duplicate column name",
            SkipReason::EmptyTable => "table without columns",
        };
        f.write_str(text)
    }
}

/// A source line dropped during parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the source
    pub line: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Summary of one parse run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Where the text came from (file path or a label)
    pub origin: String,
    pub tables: usize,
    pub columns: usize,
    pub relationships: usize,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

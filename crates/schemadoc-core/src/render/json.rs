//! JSON schema document
//!
//! The document mirrors the model: tables keyed by name in source order,
//! columns keyed by name in declaration order. Reading a document back with
//! [`SchemaDocument::into_model`] restores the same tables and columns.

use crate::catalog::Category;
use crate::error::{Error, Result};
use crate::model::{Column, Relationship, SchemaModel, Table};
use crate::types::JsonType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Title block shared by the JSON and Markdown outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    pub database_type: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "NDC PLUS Database Schema".to_string(),
            description: "National Data Center PLUS system database schema for seismic event monitoring and analysis".to_string(),
            version: "1.0.0".to_string(),
            database_type: "Oracle".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDocument {
    /// Declared Oracle type
    #[serde(rename = "type")]
    pub data_type: String,
    pub json_type: JsonType,
    pub nullable: bool,
    pub primary_key: bool,
    /// Set only for keys that come from the column name alone
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub key_by_convention: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    pub description: String,
    pub category: Category,
    pub columns: IndexMap<String, ColumnDocument>,
    /// Relationships starting at this table
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub database_type: String,
    pub tables: IndexMap<String, TableDocument>,
}

impl SchemaDocument {
    pub fn from_model(model: &SchemaModel, info: &DocumentInfo) -> Self {
        let tables = model
            .tables()
            .map(|table| (table.name.clone(), table_document(model, table)))
            .collect();

        Self {
            schema: JSON_SCHEMA_DRAFT.to_string(),
            title: info.title.clone(),
            description: info.description.clone(),
            version: info.version.clone(),
            database_type: info.database_type.clone(),
            tables,
        }
    }

    /// Rebuild the model this document was rendered from
    pub fn into_model(self) -> SchemaModel {
        let mut model = SchemaModel::new();
        let mut relationships = Vec::new();

        for (name, table) in self.tables {
            relationships.extend(table.relationships);
            let columns = table.columns.into_iter().map(|(column_name, column)| Column {
                name: column_name,
                data_type: column.data_type,
                nullable: column.nullable,
                primary_key: column.primary_key,
                key_by_convention: column.key_by_convention,
            });
            model.insert_table(Table {
                name,
                description: table.description,
                category: table.category,
                columns: columns.collect(),
            });
        }

        model.set_relationships(relationships);
        model
    }

    /// Pretty JSON with two-space indent and a trailing newline
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::json("failed to serialize schema document", e))?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::json("failed to read schema document", e))
    }
}

fn table_document(model: &SchemaModel, table: &Table) -> TableDocument {
    let columns = table
        .columns
        .iter()
        .map(|column| {
            (
                column.name.clone(),
                ColumnDocument {
                    data_type: column.data_type.clone(),
                    json_type: column.json_type(),
                    nullable: column.nullable,
                    primary_key: column.primary_key,
                    key_by_convention: column.key_by_convention,
                },
            )
        })
        .collect();

    TableDocument {
        description: table.description.clone(),
        category: table.category,
        columns,
        relationships: model.relationships_from(&table.name).cloned().collect(),
    }
}

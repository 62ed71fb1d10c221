//! Combined document for the NDC PLUS and Legacy schemas

use crate::error::{Error, Result};
use crate::model::SchemaModel;
use crate::relationships::{infer_cross_schema, CrossSchemaRelationship, InferenceRules};
use crate::render::json::{DocumentInfo, SchemaDocument, TableDocument};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const NDC_PLUS: &str = "ndc_plus";
pub const LEGACY: &str = "legacy";

/// One schema inside the dual document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub name: String,
    pub description: String,
    pub table_count: usize,
    pub relationship_count: usize,
    pub tables: IndexMap<String, TableDocument>,
}

impl SchemaSummary {
    pub fn from_model(model: &SchemaModel, info: &DocumentInfo) -> Self {
        let document = SchemaDocument::from_model(model, info);
        Self {
            name: info.title.clone(),
            description: info.description.clone(),
            table_count: model.table_count(),
            relationship_count: model.relationships().len(),
            tables: document.tables,
        }
    }
}

/// Both schemas plus the relationships inferred across them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualSchemaDocument {
    pub schemas: IndexMap<String, SchemaSummary>,
    pub cross_schema_relationships: Vec<CrossSchemaRelationship>,
}

impl DualSchemaDocument {
    pub fn build(
        ndc: (&SchemaModel, &DocumentInfo),
        legacy: (&SchemaModel, &DocumentInfo),
        rules: &InferenceRules,
    ) -> Self {
        let mut schemas = IndexMap::new();
        schemas.insert(NDC_PLUS.to_string(), SchemaSummary::from_model(ndc.0, ndc.1));
        schemas.insert(LEGACY.to_string(), SchemaSummary::from_model(legacy.0, legacy.1));

        Self {
            schemas,
            cross_schema_relationships: infer_cross_schema(rules, (NDC_PLUS, ndc.0), (LEGACY, legacy.0)),
        }
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaSummary> {
        self.schemas.get(name)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::json("failed to serialize dual schema document", e))?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::json("failed to read dual schema document", e))
    }
}

/// Title block for the Legacy schema
pub fn legacy_info() -> DocumentInfo {
    DocumentInfo {
        title: "Legacy Database Schema".to_string(),
        description: "Legacy seismic monitoring database schema".to_string(),
        ..DocumentInfo::default()
    }
}

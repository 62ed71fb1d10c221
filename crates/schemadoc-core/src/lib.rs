//! schemadoc core - schema extraction and documentation rendering
//!
//! This crate turns flat-text Oracle table dumps (`NDC_PLUS_tables.txt`,
//! `Legacy_tables.txt`) into a [`SchemaModel`] of tables, columns and
//! inferred relationships, and renders that model as JSON, Markdown with
//! Mermaid diagrams, or Oracle DDL.
//!
//! # Main Components
//!
//! - **Parser**: best-effort, line-oriented extraction of table blocks
//! - **Relationships**: naming-convention inference with a fixed rule order
//! - **Catalog**: table descriptions and functional categories
//! - **Renderers**: deterministic JSON, Markdown, Mermaid and DDL output
//! - **Viewer**: refreshes the data object embedded in the HTML viewer
//!
//! # Example
//!
//! ```
//! use schemadoc_core::{extract_str, ExtractOptions};
//!
//! let text = "TABLE: EVENT\nEVID NUMBER(18) NOT NULL PRIMARY\nAUTH VARCHAR2(15)\n";
//! let extraction = extract_str(text, "example", &ExtractOptions::default()).unwrap();
//! let event = extraction.model.table("EVENT").unwrap();
//! assert!(event.column("EVID").unwrap().primary_key);
//! ```

pub mod catalog;
pub mod dual;
pub mod error;
pub mod model;
pub mod parser;
pub mod relationships;
pub mod render;
pub mod types;
pub mod viewer;

pub use catalog::{Catalog, Category};
pub use dual::DualSchemaDocument;
pub use error::{Error, Result};
pub use model::{
    Column, ParseReport, Relationship, RelationshipRule, SchemaModel, SkipReason, SkippedLine, Table,
};
pub use parser::{ParserOptions, SchemaParser};
pub use relationships::{CrossSchemaRelationship, ExternalReference, InferenceRules, RelationshipInferrer};
pub use render::{DocumentInfo, MarkdownConfig, MarkdownGenerator, SchemaDocument};
pub use types::JsonType;

use std::path::Path;
use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything that shapes one extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub parser: ParserOptions,
    pub rules: InferenceRules,
    pub catalog: Catalog,
}

/// The model of one run plus the report of what was read and skipped
#[derive(Debug, Clone)]
pub struct Extraction {
    pub model: SchemaModel,
    pub report: ParseReport,
}

/// Parse schema text and infer its relationships.
///
/// `origin` labels the text in errors and in the report.
pub fn extract_str(text: &str, origin: &str, options: &ExtractOptions) -> Result<Extraction> {
    let parser = SchemaParser::new(&options.parser, &options.catalog);
    let (mut model, mut report) = parser.parse(text, origin)?;

    let relationships = RelationshipInferrer::new(&options.rules).infer(&model);
    report.relationships = relationships.len();
    model.set_relationships(relationships);

    info!(
        origin = origin,
        tables = report.tables,
        relationships = report.relationships,
        skipped = report.skipped.len(),
        "Schema extracted"
    );

    Ok(Extraction { model, report })
}

/// Read a schema file whole and extract it.
///
/// A missing, unreadable or empty file is a fatal error naming the path.
pub fn extract_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Extraction> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    extract_str(&text, &path.display().to_string(), options)
}

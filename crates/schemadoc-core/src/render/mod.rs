//! Output renderers for the schema model
//!
//! Every renderer is a pure function of the model: the same model always
//! renders to the same bytes.

pub mod ddl;
pub mod json;
pub mod markdown;
pub mod mermaid;

pub use json::{ColumnDocument, DocumentInfo, SchemaDocument, TableDocument};
pub use markdown::{MarkdownConfig, MarkdownGenerator};

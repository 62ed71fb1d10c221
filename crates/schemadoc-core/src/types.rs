//! Oracle declared types and their JSON-facing categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse JSON type a declared Oracle type maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Timestamp,
    Binary,
}

impl JsonType {
    /// Map a raw Oracle type such as `VARCHAR2(32)` or `RAW(16)`.
    ///
    /// Checks run in a fixed order on the upper-cased text, so
    /// `TIMESTAMP(6)` is a timestamp and `NVARCHAR2` is a string.
    /// Unknown types fall back to `String`.
    pub fn from_oracle(oracle_type: &str) -> Self {
        let upper = oracle_type.to_uppercase();

        if upper.contains("VARCHAR") || upper.contains("CHAR") || upper.contains("CLOB") {
            JsonType::String
        } else if upper.contains("NUMBER") || upper.contains("FLOAT") {
            JsonType::Number
        } else if upper.contains("TIMESTAMP") || upper.contains("DATE") {
            JsonType::Timestamp
        } else if upper.contains("RAW") {
            JsonType::Binary
        } else {
            JsonType::String
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Timestamp => "timestamp",
            JsonType::Binary => "binary",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

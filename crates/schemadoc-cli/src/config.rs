//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments, which the handlers apply on top

use crate::error::{Error, Result};
use schemadoc_core::{Catalog, DocumentInfo, ExtractOptions, InferenceRules, ParserOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project config file name written by `config init`
pub const PROJECT_CONFIG_FILE: &str = ".schemadoc.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations
    pub paths: PathConfig,

    /// Title block of the NDC PLUS documents
    pub document: DocumentInfo,

    /// Key column conventions
    pub parser: ParserOptions,

    /// Relationship inference tunables
    pub relationships: InferenceRules,

    /// Table descriptions that replace the built-in ones
    pub descriptions: BTreeMap<String, String>,
}

/// Path configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// NDC PLUS table dump
    pub ndc_input: PathBuf,

    /// Legacy table dump
    pub legacy_input: PathBuf,

    /// Directory receiving the generated files
    pub out_dir: PathBuf,

    /// Combined schema document written by `dual`
    pub dual_output: PathBuf,

    /// HTML viewer refreshed by `dual` when set
    pub viewer_html: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            ndc_input: PathBuf::from("NDC_PLUS_tables.txt"),
            legacy_input: PathBuf::from("Legacy_tables.txt"),
            out_dir: PathBuf::from("schema"),
            dual_output: PathBuf::from("schema").join("dual_schema.json"),
            viewer_html: None,
        }
    }
}

/// Serialization format picked from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::for_path(path) {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to load config, trying next location");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_FILE),
            PathBuf::from(".schemadoc.yaml"),
            PathBuf::from(".schemadoc.json"),
        ];

        if let Some(user_path) = Self::user_config_path() {
            paths.push(user_path);
        }

        paths
    }

    /// Location of the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("schemadoc").join("config.toml"))
    }

    /// Options for one extraction run
    pub fn extract_options(&self) -> ExtractOptions {
        let catalog = self
            .descriptions
            .iter()
            .fold(Catalog::new(), |catalog, (table, description)| {
                catalog.with_description(table, description)
            });

        ExtractOptions {
            parser: self.parser.clone(),
            rules: self.relationships.clone(),
            catalog,
        }
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file, picking the format from its extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::for_path(path) {
            FileFormat::Toml => self.to_toml()?,
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }

        std::fs::write(path, content).map_err(|e| Error::write(path, e))?;
        Ok(())
    }
}

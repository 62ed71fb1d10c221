//! Relationship inference by column naming convention
//!
//! Relationships are guesses, not constraints. Each column is checked
//! against a fixed, prioritized rule list and the first rule that finds a
//! target wins, so a column yields at most one relationship:
//!
//! 1. `<TABLE>_UUID` names a table in the model
//! 2. `<TABLE>_GID` names a table in the model
//! 3. the column is named like another table's identity key (first table wins)
//! 4. the column is a configured external reference
//!
//! Rules 1–3 point at the target's first identity key, or at the
//! conventional key name when the target has no key at all. A column that
//! is a key only by name (`INID` next to a declared `UUID`) is still a
//! reference for rule 3.

use crate::model::{Column, Relationship, RelationshipRule, SchemaModel, Table};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A column that always refers to a table outside the parsed model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    pub column: String,
    pub table: String,
    pub key: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Tunables for the inference rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceRules {
    /// Match columns named like another table's key column
    pub key_name_matching: bool,
    /// Key column assumed for targets that declare none; never matched by name
    pub fallback_key_column: String,
    pub external: Vec<ExternalReference>,
}

impl Default for InferenceRules {
    fn default() -> Self {
        Self {
            key_name_matching: true,
            fallback_key_column: "UUID".to_string(),
            external: vec![ExternalReference {
                column: "WFID".to_string(),
                table: "WAVEFORM".to_string(),
                key: "WFID".to_string(),
                note: Some("External reference".to_string()),
            }],
        }
    }
}

/// A relationship whose ends sit in two different schemas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossSchemaRelationship {
    pub from_schema: String,
    pub to_schema: String,
    #[serde(flatten)]
    pub relationship: Relationship,
}

/// Infers relationships from one model into a target model
pub struct RelationshipInferrer<'a> {
    rules: &'a InferenceRules,
}

impl<'a> RelationshipInferrer<'a> {
    pub fn new(rules: &'a InferenceRules) -> Self {
        Self { rules }
    }

    /// Relationships between tables of the same model, in table then column order
    pub fn infer(&self, model: &SchemaModel) -> Vec<Relationship> {
        let relationships = self.infer_between(model, model, true);
        debug!(count = relationships.len(), "Inferred relationships");
        relationships
    }

    /// Relationships from `source` columns to `target` tables.
    ///
    /// External references are left out; they do not depend on the target.
    pub fn infer_cross(&self, source: &SchemaModel, target: &SchemaModel) -> Vec<Relationship> {
        self.infer_between(source, target, false)
    }

    fn infer_between(&self, source: &SchemaModel, target: &SchemaModel, same_model: bool) -> Vec<Relationship> {
        let mut relationships = Vec::new();

        for table in source.tables() {
            for column in &table.columns {
                let found = self
                    .by_suffix(column, target, "_UUID", RelationshipRule::UuidSuffix)
                    .or_else(|| self.by_suffix(column, target, "_GID", RelationshipRule::GidSuffix))
                    .or_else(|| self.by_key_name(table, column, target, same_model))
                    .or_else(|| if same_model { self.by_external(table, column) } else { None });

                if let Some(target_ref) = found {
                    trace!(
                        from = %format!("{}.{}", table.name, column.name),
                        to = %format!("{}.{}", target_ref.table, target_ref.column),
                        rule = %target_ref.rule,
                        "Relationship"
                    );
                    relationships.push(Relationship {
                        from_table: table.name.clone(),
                        from_column: column.name.clone(),
                        to_table: target_ref.table,
                        to_column: target_ref.column,
                        rule: target_ref.rule,
                        note: target_ref.note,
                    });
                }
            }
        }

        relationships
    }

    fn by_suffix(
        &self,
        column: &Column,
        target: &SchemaModel,
        suffix: &str,
        rule: RelationshipRule,
    ) -> Option<Target> {
        let referenced = column.name.strip_suffix(suffix)?;
        if referenced.is_empty() {
            return None;
        }
        let table = target.table(referenced)?;
        Some(Target {
            table: table.name.clone(),
            column: self.key_of(table),
            rule,
            note: None,
        })
    }

    fn by_key_name(
        &self,
        owner: &Table,
        column: &Column,
        target: &SchemaModel,
        same_model: bool,
    ) -> Option<Target> {
        if !self.rules.key_name_matching
            || column.name == self.rules.fallback_key_column
            || owner.identity_keys().any(|key| key.name == column.name)
        {
            return None;
        }

        let table = target.tables().find(|candidate| {
            !(same_model && candidate.name == owner.name)
                && candidate.identity_keys().any(|key| key.name == column.name)
        })?;

        Some(Target {
            table: table.name.clone(),
            column: column.name.clone(),
            rule: RelationshipRule::KeyName,
            note: None,
        })
    }

    fn by_external(&self, owner: &Table, column: &Column) -> Option<Target> {
        let reference = self
            .rules
            .external
            .iter()
            .find(|r| r.column == column.name && r.table != owner.name)?;
        Some(Target {
            table: reference.table.clone(),
            column: reference.key.clone(),
            rule: RelationshipRule::External,
            note: reference.note.clone(),
        })
    }

    fn key_of(&self, table: &Table) -> String {
        table
            .primary_key()
            .map(|key| key.name.clone())
            .unwrap_or_else(|| self.rules.fallback_key_column.clone())
    }
}

struct Target {
    table: String,
    column: String,
    rule: RelationshipRule,
    note: Option<String>,
}

/// Infer cross-schema relationships in both directions between two named models
pub fn infer_cross_schema(
    rules: &InferenceRules,
    (left_name, left): (&str, &SchemaModel),
    (right_name, right): (&str, &SchemaModel),
) -> Vec<CrossSchemaRelationship> {
    let inferrer = RelationshipInferrer::new(rules);
    let tag = |from: &str, to: &str, relationship: Relationship| CrossSchemaRelationship {
        from_schema: from.to_string(),
        to_schema: to.to_string(),
        relationship,
    };

    let mut all: Vec<CrossSchemaRelationship> = inferrer
        .infer_cross(left, right)
        .into_iter()
        .map(|r| tag(left_name, right_name, r))
        .collect();
    all.extend(
        inferrer
            .infer_cross(right, left)
            .into_iter()
            .map(|r| tag(right_name, left_name, r)),
    );
    debug!(count = all.len(), "Inferred cross-schema relationships");
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;

    fn model(tables: Vec<Table>) -> SchemaModel {
        let mut model = SchemaModel::new();
        for table in tables {
            model.insert_table(table);
        }
        model
    }

    fn uuid_key() -> Column {
        Column::new("UUID", "RAW(16)").not_null().primary()
    }

    #[test]
    fn test_uuid_suffix_points_at_key() {
        let m = model(vec![
            Table::new("EVENT").with_columns([uuid_key()]),
            Table::new("EVENT_HYPOTHESIS")
                .with_columns([uuid_key(), Column::new("EVENT_UUID", "RAW(16)").not_null()]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);

        assert_eq!(found.len(), 1);
        let rel = &found[0];
        assert_eq!(rel.from_table, "EVENT_HYPOTHESIS");
        assert_eq!(rel.from_column, "EVENT_UUID");
        assert_eq!(rel.to_table, "EVENT");
        assert_eq!(rel.to_column, "UUID");
        assert_eq!(rel.rule, RelationshipRule::UuidSuffix);
    }

    #[test]
    fn test_suffix_uses_declared_key_name() {
        let m = model(vec![
            Table::new("EVENT").with_columns([Column::new("EVID", "NUMBER(18)").not_null().primary()]),
            Table::new("EVENT_HYPOTHESIS").with_columns([Column::new("EVENT_UUID", "RAW(16)")]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);
        assert_eq!(found[0].to_column, "EVID");
    }

    #[test]
    fn test_suffix_falls_back_to_conventional_key() {
        let m = model(vec![
            Table::new("STATION_GROUP").with_columns([Column::new("NAME", "VARCHAR2(64)")]),
            Table::new("MEMBERSHIP").with_columns([Column::new("STATION_GROUP_GID", "RAW(16)")]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_table, "STATION_GROUP");
        assert_eq!(found[0].to_column, "UUID");
        assert_eq!(found[0].rule, RelationshipRule::GidSuffix);
    }

    #[test]
    fn test_suffix_requires_existing_table() {
        let m = model(vec![Table::new("T").with_columns([Column::new("MISSING_UUID", "RAW(16)")])]);
        let rules = InferenceRules::default();
        assert!(RelationshipInferrer::new(&rules).infer(&m).is_empty());
    }

    #[test]
    fn test_bare_suffix_column_ignored() {
        let m = model(vec![Table::new("T").with_columns([Column::new("_UUID", "RAW(16)")])]);
        let rules = InferenceRules::default();
        assert!(RelationshipInferrer::new(&rules).infer(&m).is_empty());
    }

    #[test]
    fn test_key_name_tie_break_is_first_registered() {
        let m = model(vec![
            Table::new("ORIGIN").with_columns([Column::new("ORID", "NUMBER(18)").not_null().primary()]),
            Table::new("ORIGIN_ARCHIVE").with_columns([Column::new("ORID", "NUMBER(18)").primary()]),
            Table::new("ASSOC").with_columns([Column::new("ORID", "NUMBER(18)")]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].from_table, "ASSOC");
        assert_eq!(found[0].to_table, "ORIGIN");
        assert_eq!(found[0].rule, RelationshipRule::KeyName);
    }

    #[test]
    fn test_key_name_skips_keys_and_generic_name() {
        let m = model(vec![
            Table::new("A").with_columns([uuid_key()]),
            Table::new("B").with_columns([uuid_key()]),
            Table::new("C").with_columns([Column::new("UUID", "RAW(16)")]),
        ]);
        let rules = InferenceRules::default();
        assert!(RelationshipInferrer::new(&rules).infer(&m).is_empty());
    }

    #[test]
    fn test_convention_key_links_to_owning_table() {
        let m = model(vec![
            Table::new("INTERVAL").with_columns([
                Column::new("INID", "NUMBER(18)").not_null().conventional_key(),
                Column::new("NAME", "VARCHAR2(64)"),
            ]),
            Table::new("PROCESSING_MASK").with_columns([
                uuid_key(),
                Column::new("INID", "NUMBER(18)").conventional_key(),
            ]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].from_table, "PROCESSING_MASK");
        assert_eq!(found[0].from_column, "INID");
        assert_eq!(found[0].to_table, "INTERVAL");
        assert_eq!(found[0].to_column, "INID");
        assert_eq!(found[0].rule, RelationshipRule::KeyName);
    }

    #[test]
    fn test_convention_keys_on_both_sides_do_not_link() {
        let m = model(vec![
            Table::new("A").with_columns([uuid_key(), Column::new("INID", "NUMBER(18)").conventional_key()]),
            Table::new("B").with_columns([uuid_key(), Column::new("INID", "NUMBER(18)").conventional_key()]),
        ]);
        let rules = InferenceRules::default();
        assert!(RelationshipInferrer::new(&rules).infer(&m).is_empty());
    }

    #[test]
    fn test_suffix_target_uses_declared_key_over_convention_key() {
        let m = model(vec![
            Table::new("PROCESSING_MASK").with_columns([
                Column::new("INID", "NUMBER(18)").conventional_key(),
                uuid_key(),
            ]),
            Table::new("MASK_USE").with_columns([Column::new("PROCESSING_MASK_UUID", "RAW(16)")]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_column, "UUID");
    }

    #[test]
    fn test_key_name_rule_can_be_disabled() {
        let m = model(vec![
            Table::new("ORIGIN").with_columns([Column::new("ORID", "NUMBER(18)").primary()]),
            Table::new("ASSOC").with_columns([Column::new("ORID", "NUMBER(18)")]),
        ]);
        let rules = InferenceRules {
            key_name_matching: false,
            ..InferenceRules::default()
        };
        assert!(RelationshipInferrer::new(&rules).infer(&m).is_empty());
    }

    #[test]
    fn test_external_reference() {
        let m = model(vec![
            Table::new("CHANNEL_SEGMENT_WAVEFORM").with_columns([Column::new("WFID", "NUMBER(18)")]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_table, "WAVEFORM");
        assert_eq!(found[0].to_column, "WFID");
        assert_eq!(found[0].note.as_deref(), Some("External reference"));
    }

    #[test]
    fn test_external_reference_not_applied_to_its_own_table() {
        let m = model(vec![Table::new("WAVEFORM").with_columns([Column::new("WFID", "NUMBER(18)")])]);
        let rules = InferenceRules::default();
        assert!(RelationshipInferrer::new(&rules).infer(&m).is_empty());
    }

    #[test]
    fn test_model_key_beats_external() {
        let m = model(vec![
            Table::new("WAVEFORM").with_columns([Column::new("WFID", "NUMBER(18)").primary()]),
            Table::new("SEGMENT").with_columns([Column::new("WFID", "NUMBER(18)")]),
        ]);
        let rules = InferenceRules::default();
        let found = RelationshipInferrer::new(&rules).infer(&m);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, RelationshipRule::KeyName);
        assert!(found[0].note.is_none());
    }

    #[test]
    fn test_cross_schema_both_directions() {
        let ndc = model(vec![
            Table::new("EVENT").with_columns([uuid_key(), Column::new("ORID", "NUMBER(18)")]),
        ]);
        let legacy = model(vec![
            Table::new("ORIGIN").with_columns([Column::new("ORID", "NUMBER(18)").not_null().primary()]),
            Table::new("ORIGIN_MAP").with_columns([Column::new("EVENT_UUID", "RAW(16)")]),
        ]);
        let rules = InferenceRules::default();
        let found = infer_cross_schema(&rules, ("ndc_plus", &ndc), ("legacy", &legacy));

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].from_schema, "ndc_plus");
        assert_eq!(found[0].relationship.to_table, "ORIGIN");
        assert_eq!(found[1].from_schema, "legacy");
        assert_eq!(found[1].relationship.to_table, "EVENT");
        assert_eq!(found[1].relationship.rule, RelationshipRule::UuidSuffix);
    }
}

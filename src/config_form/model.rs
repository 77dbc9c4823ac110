//! Draft configuration for a new run, regenerated per plugin selection.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::coerce::{self, PrimitiveType};

/// Errors raised when merging externally-supplied JSON into the form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    /// The text is not parseable JSON at all.
    #[error("Invalid JSON: {0}")]
    Malformed(String),
    /// The top-level JSON value is not an object.
    #[error("Config JSON must be a top-level object")]
    NotAnObject,
}

/// Schema-driven draft of a run configuration.
///
/// Values live as canonical JSON: coerced per the schema for declared keys,
/// verbatim for extra keys. The unset sentinel (`null`) marks fields the
/// operator has not filled in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigForm {
    plugin_id: Option<String>,
    schema: BTreeMap<String, PrimitiveType>,
    values: Map<String, Value>,
}

impl ConfigForm {
    /// Switch the active plugin, resetting values unless the selection is
    /// unchanged. Schemas are not assumed compatible across plugins.
    pub fn select_plugin(&mut self, plugin_id: &str, schema: &BTreeMap<String, PrimitiveType>) {
        if self.plugin_id.as_deref() == Some(plugin_id) {
            return;
        }
        self.plugin_id = Some(plugin_id.to_string());
        self.schema = schema.clone();
        self.values = Map::new();
    }

    /// Clear the selection and all values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    pub fn schema(&self) -> &BTreeMap<String, PrimitiveType> {
        &self.schema
    }

    /// Current value for a key; unset fields read as the sentinel.
    pub fn value(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&coerce::UNSET)
    }

    /// Declared type for a key; unknown keys get string semantics.
    pub fn field_type(&self, key: &str) -> PrimitiveType {
        self.schema.get(key).copied().unwrap_or_default()
    }

    /// Record a single field edit, coercing per the declared type.
    pub fn set_value(&mut self, key: &str, raw: Value) {
        let coerced = coerce::coerce(self.field_type(key), &raw);
        self.values.insert(key.to_string(), coerced);
    }

    /// Merge an imported JSON object into the current values.
    ///
    /// Declared keys are coerced and overwritten; undeclared keys pass
    /// through unmodified so a schema that under-declares its real
    /// parameters still round-trips. Rejection leaves existing values
    /// untouched, and the merge lands as a single whole-object replacement.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let parsed: Value =
            serde_json::from_str(text).map_err(|err| ImportError::Malformed(err.to_string()))?;
        let Value::Object(incoming) = parsed else {
            return Err(ImportError::NotAnObject);
        };
        let mut next = self.values.clone();
        for (key, raw) in incoming {
            let merged = match self.schema.get(&key) {
                Some(ty) => coerce::coerce(*ty, &raw),
                None => raw,
            };
            next.insert(key, merged);
        }
        self.values = next;
        Ok(())
    }

    /// Serialize the current values as-is — a faithful echo suitable for
    /// re-import.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&Value::Object(self.values.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// The config object to submit with a run-creation request.
    pub fn config(&self) -> Map<String, Value> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(entries: &[(&str, PrimitiveType)]) -> BTreeMap<String, PrimitiveType> {
        entries
            .iter()
            .map(|(key, ty)| (key.to_string(), *ty))
            .collect()
    }

    fn int_form() -> ConfigForm {
        let mut form = ConfigForm::default();
        form.select_plugin("demo", &schema(&[("known_int", PrimitiveType::Int)]));
        form
    }

    #[test]
    fn plugin_change_resets_values() {
        let mut form = int_form();
        form.set_value("known_int", json!("5"));
        form.select_plugin("other", &schema(&[("flag", PrimitiveType::Bool)]));
        assert_eq!(form.value("known_int"), &Value::Null);
        assert!(form.config().is_empty());
    }

    #[test]
    fn reselecting_same_plugin_keeps_values() {
        let mut form = int_form();
        form.set_value("known_int", json!(5));
        form.select_plugin("demo", &schema(&[("known_int", PrimitiveType::Int)]));
        assert_eq!(form.value("known_int"), &json!(5));
    }

    #[test]
    fn edits_coerce_against_the_schema() {
        let mut form = int_form();
        form.set_value("known_int", json!("12"));
        assert_eq!(form.value("known_int"), &json!(12));
        form.set_value("known_int", json!("not a number"));
        assert_eq!(form.value("known_int"), &Value::Null);
    }

    #[test]
    fn import_preserves_extra_keys_verbatim() {
        let mut form = int_form();
        form.import_json(r#"{"known_int": "5", "extra_flag": true}"#)
            .unwrap();
        assert_eq!(form.value("known_int"), &json!(5));
        assert_eq!(form.value("extra_flag"), &json!(true));
    }

    #[test]
    fn import_with_empty_schema_merges_verbatim() {
        let mut form = ConfigForm::default();
        form.select_plugin("opaque", &BTreeMap::new());
        form.import_json(r#"{"anything": [1, 2], "nested": {"a": 1}}"#)
            .unwrap();
        assert_eq!(form.value("anything"), &json!([1, 2]));
        assert_eq!(form.value("nested"), &json!({"a": 1}));
    }

    #[test]
    fn malformed_import_leaves_state_untouched() {
        let mut form = int_form();
        form.set_value("known_int", json!(7));
        let before = form.clone();

        assert!(matches!(
            form.import_json("not json"),
            Err(ImportError::Malformed(_))
        ));
        assert_eq!(form, before);

        assert_eq!(form.import_json("[1, 2]"), Err(ImportError::NotAnObject));
        assert_eq!(form, before);
    }

    #[test]
    fn import_of_export_round_trips() {
        let mut form = ConfigForm::default();
        form.select_plugin(
            "demo",
            &schema(&[
                ("count", PrimitiveType::Int),
                ("threshold", PrimitiveType::Float),
                ("strict", PrimitiveType::Bool),
                ("label", PrimitiveType::Str),
            ]),
        );
        form.set_value("count", json!("5"));
        form.set_value("threshold", json!("0.25"));
        form.set_value("strict", json!(true));
        form.set_value("label", json!("baseline"));
        // An edited-then-cleared field stays present as the sentinel.
        form.set_value("count", json!(""));

        let exported = form.export_json();
        let mut reimported = form.clone();
        reimported.import_json(&exported).unwrap();
        assert_eq!(reimported, form);
    }
}

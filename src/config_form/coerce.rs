//! Schema-typed value coercion for plugin configuration fields.
//!
//! Every plugin declares its recognized configuration keys as a mapping from
//! key to a primitive type name. Coercion maps arbitrary JSON input (form
//! edits, bulk imports) to the canonical in-memory value for that type.
//! Malformed input never raises an error; it collapses to the unset sentinel
//! (`Value::Null`) so a half-filled form stays editable and an untouched
//! field is never mistaken for an explicit `0`/`false`/`""`.

use serde_json::{Number, Value};

/// Primitive types a plugin schema may declare for a configuration key.
///
/// Unknown or absent type names fall back to `Str`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum PrimitiveType {
    #[default]
    Str,
    Int,
    Float,
    Bool,
}

impl PrimitiveType {
    /// Parse a schema type name; anything unrecognized gets string semantics.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "int" => Self::Int,
            "float" => Self::Float,
            "bool" => Self::Bool,
            _ => Self::Str,
        }
    }

    /// Wire name used in plugin schemas.
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

impl From<String> for PrimitiveType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<PrimitiveType> for String {
    fn from(ty: PrimitiveType) -> Self {
        ty.name().to_string()
    }
}

/// The distinguished "unset" value produced for empty or unparseable input.
pub const UNSET: Value = Value::Null;

/// Return whether a value is the unset sentinel.
pub fn is_unset(value: &Value) -> bool {
    value.is_null()
}

/// Coerce an arbitrary JSON value to the canonical value for `ty`.
pub fn coerce(ty: PrimitiveType, raw: &Value) -> Value {
    if raw.is_null() {
        return UNSET;
    }
    match ty {
        PrimitiveType::Int => coerce_int(raw),
        PrimitiveType::Float => coerce_float(raw),
        PrimitiveType::Bool => coerce_bool(raw),
        PrimitiveType::Str => coerce_str(raw),
    }
}

fn coerce_int(raw: &Value) -> Value {
    if let Some(n) = raw.as_i64() {
        return Value::from(n);
    }
    if let Some(f) = raw.as_f64() {
        if !f.is_finite() {
            return UNSET;
        }
        return Value::from(f.trunc() as i64);
    }
    match raw.as_str() {
        Some(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or(UNSET),
        None => UNSET,
    }
}

fn coerce_float(raw: &Value) -> Value {
    if raw.is_number() {
        return raw.clone();
    }
    let Some(text) = raw.as_str() else {
        return UNSET;
    };
    match text.trim().parse::<f64>() {
        Ok(f) => Number::from_f64(f).map(Value::Number).unwrap_or(UNSET),
        Err(_) => UNSET,
    }
}

fn coerce_bool(raw: &Value) -> Value {
    if let Some(b) = raw.as_bool() {
        return Value::Bool(b);
    }
    let text = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return UNSET,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return UNSET;
    }
    let truthy = matches!(
        trimmed.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    );
    Value::Bool(truthy)
}

fn coerce_str(raw: &Value) -> Value {
    match raw {
        Value::String(_) => raw.clone(),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        // Compound values keep their compact JSON form.
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_known_type_names_and_defaults_to_string() {
        assert_eq!(PrimitiveType::parse("int"), PrimitiveType::Int);
        assert_eq!(PrimitiveType::parse("float"), PrimitiveType::Float);
        assert_eq!(PrimitiveType::parse("bool"), PrimitiveType::Bool);
        assert_eq!(PrimitiveType::parse("string"), PrimitiveType::Str);
        assert_eq!(PrimitiveType::parse("decimal"), PrimitiveType::Str);
    }

    #[test]
    fn int_parses_and_truncates_toward_zero() {
        assert_eq!(coerce(PrimitiveType::Int, &json!("12")), json!(12));
        assert_eq!(coerce(PrimitiveType::Int, &json!(12)), json!(12));
        assert_eq!(coerce(PrimitiveType::Int, &json!(12.9)), json!(12));
        assert_eq!(coerce(PrimitiveType::Int, &json!(-3.7)), json!(-3));
    }

    #[test]
    fn malformed_input_yields_unset_not_zero() {
        assert_eq!(coerce(PrimitiveType::Int, &json!("")), UNSET);
        assert_eq!(coerce(PrimitiveType::Int, &json!("abc")), UNSET);
        assert_eq!(coerce(PrimitiveType::Float, &json!("1.2.3")), UNSET);
        assert_ne!(coerce(PrimitiveType::Int, &json!("")), json!(0));
    }

    #[test]
    fn bool_truthiness_is_case_insensitive() {
        for truthy in ["true", "TRUE", "1", "yes", "Y"] {
            assert_eq!(coerce(PrimitiveType::Bool, &json!(truthy)), json!(true));
        }
        assert_eq!(coerce(PrimitiveType::Bool, &json!("no")), json!(false));
        assert_eq!(coerce(PrimitiveType::Bool, &json!("0")), json!(false));
        assert_eq!(coerce(PrimitiveType::Bool, &json!(1)), json!(true));
    }

    #[test]
    fn blank_bool_input_is_unset_not_false() {
        assert_eq!(coerce(PrimitiveType::Bool, &json!("")), UNSET);
        assert_eq!(coerce(PrimitiveType::Bool, &json!("  ")), UNSET);
        assert_ne!(coerce(PrimitiveType::Bool, &json!("")), json!(false));
    }

    #[test]
    fn string_stringifies_scalars() {
        assert_eq!(coerce(PrimitiveType::Str, &json!(7)), json!("7"));
        assert_eq!(coerce(PrimitiveType::Str, &json!(true)), json!("true"));
        assert_eq!(coerce(PrimitiveType::Str, &json!("x")), json!("x"));
    }

    #[test]
    fn coercion_is_idempotent_per_type() {
        let samples = [
            (PrimitiveType::Int, json!("12")),
            (PrimitiveType::Int, json!(12)),
            (PrimitiveType::Int, json!("")),
            (PrimitiveType::Float, json!("1.5")),
            (PrimitiveType::Float, json!(2.25)),
            (PrimitiveType::Bool, json!("yes")),
            (PrimitiveType::Bool, json!(false)),
            (PrimitiveType::Str, json!(3.5)),
            (PrimitiveType::Str, json!("plain")),
        ];
        for (ty, raw) in samples {
            let once = coerce(ty, &raw);
            let twice = coerce(ty, &once);
            assert_eq!(once, twice, "coerce({ty:?}, {raw}) not idempotent");
        }
    }

    #[test]
    fn unset_passes_through_every_type() {
        for ty in [
            PrimitiveType::Str,
            PrimitiveType::Int,
            PrimitiveType::Float,
            PrimitiveType::Bool,
        ] {
            assert_eq!(coerce(ty, &UNSET), UNSET);
        }
    }
}

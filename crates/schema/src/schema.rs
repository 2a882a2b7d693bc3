//! Declarative shape definitions for JSON payloads
//!
//! A [`Schema`] describes what a JSON value crossing the network boundary must
//! look like. Validation walks the raw [`serde_json::Value`] and records every
//! violation with its path, so a payload with a missing or malformed field is
//! rejected with a message naming that field before any typed deserialization
//! takes place.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ValidationError, ValidationErrors, ValidationResult};

/// Constraints on string values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringRules {
    pub min_len: Option<usize>,
    pub email: bool,
    pub url: bool,
}

/// Constraints on numeric values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
}

/// A named member of an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

/// Shape of a JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String(StringRules),
    Number(NumberRules),
    Boolean,
    Array(Box<Schema>),
    Object(Vec<Field>),
    /// One of a fixed set of string literals
    Enum(Vec<&'static str>),
}

impl Schema {
    pub fn string() -> Self {
        Schema::String(StringRules::default())
    }

    pub fn number() -> Self {
        Schema::Number(NumberRules::default())
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn object() -> Self {
        Schema::Object(Vec::new())
    }

    pub fn one_of(values: &[&'static str]) -> Self {
        Schema::Enum(values.to_vec())
    }

    /// Minimum length in characters (strings only)
    pub fn min_len(mut self, len: usize) -> Self {
        if let Schema::String(rules) = &mut self {
            rules.min_len = Some(len);
        }
        self
    }

    /// Require a plausible e-mail address (strings only)
    pub fn email(mut self) -> Self {
        if let Schema::String(rules) = &mut self {
            rules.email = true;
        }
        self
    }

    /// Require an absolute URL (strings only)
    pub fn url(mut self) -> Self {
        if let Schema::String(rules) = &mut self {
            rules.url = true;
        }
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        if let Schema::Number(rules) = &mut self {
            rules.min = Some(min);
        }
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        if let Schema::Number(rules) = &mut self {
            rules.max = Some(max);
        }
        self
    }

    pub fn int(mut self) -> Self {
        if let Schema::Number(rules) = &mut self {
            rules.integer = true;
        }
        self
    }

    /// Add a required member (objects only)
    pub fn field(self, name: &'static str, schema: Schema) -> Self {
        self.push_field(name, schema, true)
    }

    /// Add a member that may be absent or null (objects only)
    pub fn optional(self, name: &'static str, schema: Schema) -> Self {
        self.push_field(name, schema, false)
    }

    /// Append all members of another object schema, replacing same-named ones
    pub fn extend(mut self, other: Schema) -> Self {
        if let (Schema::Object(fields), Schema::Object(extra)) = (&mut self, other) {
            for field in extra {
                fields.retain(|f| f.name != field.name);
                fields.push(field);
            }
        }
        self
    }

    fn push_field(mut self, name: &'static str, schema: Schema, required: bool) -> Self {
        if let Schema::Object(fields) = &mut self {
            fields.push(Field {
                name,
                schema,
                required,
            });
        }
        self
    }

    fn type_name(&self) -> &'static str {
        match self {
            Schema::String(_) | Schema::Enum(_) => "string",
            Schema::Number(_) => "number",
            Schema::Boolean => "boolean",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
        }
    }

    /// Validate `value`, collecting every violation
    pub fn validate(&self, value: &Value) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        self.check_at("", value, &mut errors);
        errors.into_result()
    }

    fn check_at(&self, path: &str, value: &Value, errors: &mut ValidationErrors) {
        match (self, value) {
            (Schema::String(rules), Value::String(s)) => check_string(rules, path, s, errors),
            (Schema::Number(rules), Value::Number(n)) => {
                // serde_json numbers always fit in f64 for our purposes
                let n = n.as_f64().unwrap_or(f64::NAN);
                check_number(rules, path, n, errors);
            }
            (Schema::Boolean, Value::Bool(_)) => {}
            (Schema::Enum(allowed), Value::String(s)) => {
                if !allowed.iter().any(|a| a == s) {
                    let expected = allowed
                        .iter()
                        .map(|a| format!("'{}'", a))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    errors.push(
                        path,
                        format!("Invalid enum value. Expected {}, received '{}'", expected, s),
                    );
                }
            }
            (Schema::Array(items), Value::Array(values)) => {
                for (i, item) in values.iter().enumerate() {
                    items.check_at(&format!("{}[{}]", path, i), item, errors);
                }
            }
            (Schema::Object(fields), Value::Object(map)) => {
                for field in fields {
                    let child = child_path(path, field.name);
                    match map.get(field.name) {
                        None | Some(Value::Null) if !field.required => {}
                        None => errors.push(child, "Required"),
                        Some(v) => field.schema.check_at(&child, v, errors),
                    }
                }
            }
            (schema, other) => errors.push(
                path,
                format!(
                    "Expected {}, received {}",
                    schema.type_name(),
                    json_type_name(other)
                ),
            ),
        }
    }
}

fn check_string(rules: &StringRules, path: &str, s: &str, errors: &mut ValidationErrors) {
    if let Some(min) = rules.min_len {
        if s.chars().count() < min {
            errors.push(
                path,
                format!("String must contain at least {} character(s)", min),
            );
        }
    }
    if rules.email && !email_pattern().is_match(s) {
        errors.push(path, "Invalid email");
    }
    if rules.url && url::Url::parse(s).is_err() {
        errors.push(path, "Invalid url");
    }
}

fn check_number(rules: &NumberRules, path: &str, n: f64, errors: &mut ValidationErrors) {
    if rules.integer && n.fract() != 0.0 {
        errors.push(path, "Expected integer, received float");
    }
    if let Some(min) = rules.min {
        if n < min {
            errors.push(
                path,
                format!("Number must be greater than or equal to {}", min),
            );
        }
    }
    if let Some(max) = rules.max {
        if n > max {
            errors.push(path, format!("Number must be less than or equal to {}", max));
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A type whose JSON form is described by a [`Schema`]
pub trait Validated: Serialize + DeserializeOwned {
    fn schema() -> Schema;
}

impl<T: Validated> Validated for Vec<T> {
    fn schema() -> Schema {
        Schema::array(T::schema())
    }
}

/// Validate a raw JSON value and deserialize it into `T`
pub fn parse<T: Validated>(value: Value) -> ValidationResult<T> {
    T::schema().validate(&value)?;
    serde_json::from_value(value)
        .map_err(|e| ValidationErrors::from_error(ValidationError::new("", e.to_string())))
}

/// Serialize `item` and validate the result, returning the JSON form
pub fn check<T: Validated>(item: &T) -> ValidationResult<Value> {
    let value = serde_json::to_value(item)
        .map_err(|e| ValidationErrors::from_error(ValidationError::new("", e.to_string())))?;
    T::schema().validate(&value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Schema {
        Schema::object()
            .field("name", Schema::string().min_len(1))
            .field("email", Schema::string().email())
            .optional("age", Schema::number().int().min(0.0))
            .field("tags", Schema::array(Schema::string()))
    }

    #[test]
    fn test_valid_object_passes() {
        let value = json!({ "name": "Aki", "email": "aki@example.com", "tags": ["a"] });
        assert!(person().validate(&value).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let value = json!({ "name": "Aki", "tags": [] });
        let errors = person().validate(&value).unwrap_err();
        assert!(errors.has_field("email"));
        assert_eq!(errors.field_messages("email"), vec!["Required"]);
        assert!(errors.to_string().contains("email: Required"));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let value = json!({ "name": "", "email": "nope", "age": 1.5, "tags": ["ok", 3] });
        let errors = person().validate(&value).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("email"));
        assert!(errors.has_field("age"));
        assert!(errors.has_field("tags[1]"));
        assert_eq!(
            errors.field_messages("tags[1]"),
            vec!["Expected string, received number"]
        );
    }

    #[test]
    fn test_optional_accepts_null_and_absence() {
        let base = json!({ "name": "a", "email": "a@b.jp", "tags": [] });
        assert!(person().validate(&base).is_ok());
        let mut with_null = base.clone();
        with_null["age"] = Value::Null;
        assert!(person().validate(&with_null).is_ok());
    }

    #[test]
    fn test_number_bounds() {
        let schema = Schema::number().min(0.0).max(10.0);
        assert!(schema.validate(&json!(0)).is_ok());
        assert!(schema.validate(&json!(10)).is_ok());
        let errors = schema.validate(&json!(11)).unwrap_err();
        assert_eq!(
            errors.errors[0].message,
            "Number must be less than or equal to 10"
        );
        assert!(schema.validate(&json!(-1)).is_err());
    }

    #[test]
    fn test_enum_and_url() {
        let level = Schema::one_of(&["low", "medium", "high"]);
        assert!(level.validate(&json!("medium")).is_ok());
        assert!(level.validate(&json!("extreme")).is_err());

        let url = Schema::string().url();
        assert!(url.validate(&json!("https://cdn.example.com/a.png")).is_ok());
        let errors = url.validate(&json!("not a url")).unwrap_err();
        assert_eq!(errors.errors[0].message, "Invalid url");
    }

    #[test]
    fn test_nested_paths() {
        let schema = Schema::object().field(
            "weather",
            Schema::object().field("humidity", Schema::number()),
        );
        let errors = schema
            .validate(&json!({ "weather": { "humidity": "wet" } }))
            .unwrap_err();
        assert!(errors.has_field("weather.humidity"));
    }

    #[test]
    fn test_extend_replaces_and_appends() {
        let base = Schema::object()
            .field("a", Schema::string())
            .field("b", Schema::string());
        let extended = base.extend(Schema::object().field("b", Schema::number()).field("c", Schema::boolean()));
        assert!(extended
            .validate(&json!({ "a": "x", "b": 1, "c": true }))
            .is_ok());
    }
}

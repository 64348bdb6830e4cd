//! Declarative validation of JSON request bodies.
//!
//! A [`Schema`] is a fixed list of [`FieldRule`]s. Validation checks every declared
//! field and reports all violations at once; fields the schema does not declare are
//! ignored.

use serde::Serialize;
use serde_json::Value;

/// JSON shape a field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// A JSON integer that fits in 32 bits
    Integer,
}

impl FieldKind {
    fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Integer => "an integer",
        }
    }
}

/// Extra condition checked once the type matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    /// Strings only: at least one non-whitespace character
    NonEmpty,
    /// Integers only: strictly greater than zero
    Positive,
}

/// Rule for a single named field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub constraint: Constraint,
}

impl FieldRule {
    /// Required string that must not be blank
    pub const fn non_empty_string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            required: true,
            constraint: Constraint::NonEmpty,
        }
    }

    /// Required integer greater than zero
    pub const fn positive_integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required: true,
            constraint: Constraint::Positive,
        }
    }

    /// Required integer with no range restriction
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required: true,
            constraint: Constraint::None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn check(&self, value: Option<&Value>) -> Option<Violation> {
        let value = match value {
            None | Some(Value::Null) if self.required => {
                return Some(Violation::new(self.name, format!("{} is required", self.name)))
            }
            None | Some(Value::Null) => return None,
            Some(value) => value,
        };

        match self.kind {
            FieldKind::String => {
                let Some(text) = value.as_str() else {
                    return Some(self.type_mismatch());
                };
                if self.constraint == Constraint::NonEmpty && text.trim().is_empty() {
                    return Some(Violation::new(
                        self.name,
                        format!("{} must not be empty", self.name),
                    ));
                }
            }
            FieldKind::Integer => {
                let Some(number) = value.as_i64().filter(|n| i32::try_from(*n).is_ok()) else {
                    return Some(self.type_mismatch());
                };
                if self.constraint == Constraint::Positive && number <= 0 {
                    return Some(Violation::new(
                        self.name,
                        format!("{} must be greater than 0", self.name),
                    ));
                }
            }
        }

        None
    }

    fn type_mismatch(&self) -> Violation {
        Violation::new(
            self.name,
            format!("{} must be {}", self.name, self.kind.describe()),
        )
    }
}

/// One broken rule, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered set of field rules for one request body.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldRule],
}

impl Schema {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    /// Validate `document`, returning every violation in declaration order.
    pub fn validate(&self, document: &Value) -> Result<(), Vec<Violation>> {
        let Some(object) = document.as_object() else {
            return Err(vec![Violation::new(
                "$root",
                "request body must be a JSON object",
            )]);
        };

        let violations: Vec<Violation> = self
            .fields
            .iter()
            .filter_map(|rule| rule.check(object.get(rule.name)))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: Schema = Schema::new(&[
        FieldRule::non_empty_string("name"),
        FieldRule::positive_integer("count"),
        FieldRule::integer("offset"),
        FieldRule::non_empty_string("note").optional(),
    ]);

    #[test]
    fn accepts_valid_document_and_ignores_extra_fields() {
        let doc = json!({"name": "a", "count": 3, "offset": -7, "unexpected": true});
        assert!(SCHEMA.validate(&doc).is_ok());
    }

    #[test]
    fn reports_every_violation_in_order() {
        let doc = json!({"name": "  ", "count": 0});
        let violations = SCHEMA.validate(&doc).unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::new("name", "name must not be empty"),
                Violation::new("count", "count must be greater than 0"),
                Violation::new("offset", "offset is required"),
            ]
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let doc = json!({"name": null, "count": 1, "offset": 0});
        let violations = SCHEMA.validate(&doc).unwrap_err();
        assert_eq!(violations, vec![Violation::new("name", "name is required")]);
    }

    #[test]
    fn rejects_wrong_types() {
        let doc = json!({"name": 12, "count": "3", "offset": 1.5, "note": false});
        let messages: Vec<String> = SCHEMA
            .validate(&doc)
            .unwrap_err()
            .into_iter()
            .map(|v| v.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "name must be a string",
                "count must be an integer",
                "offset must be an integer",
                "note must be a string",
            ]
        );
    }

    #[test]
    fn rejects_integers_outside_32_bits() {
        let doc = json!({"name": "a", "count": 4_000_000_000_i64, "offset": 0});
        let violations = SCHEMA.validate(&doc).unwrap_err();
        assert_eq!(violations[0].message, "count must be an integer");
    }

    #[test]
    fn optional_field_may_be_absent() {
        let doc = json!({"name": "a", "count": 1, "offset": 0});
        assert!(SCHEMA.validate(&doc).is_ok());
    }

    #[test]
    fn non_object_body_is_a_root_violation() {
        let violations = SCHEMA.validate(&json!([1, 2])).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "$root");
    }
}

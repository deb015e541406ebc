//! Rust validator rendering
//!
//! Predicates inspect `Option<&serde_json::Value>`: `None` is the absent
//! sentinel, `Some(Value::Null)` the null sentinel. A missing object field
//! and an absent value are therefore the same thing.

use super::{Syntax, Target};
use crate::error::Result;
use crate::predicate::{Literal, Subject, ValueKind};

pub(crate) struct RustSyntax;

impl Syntax for RustSyntax {
    const TARGET: Target = Target::Rust;

    fn subject(&self, subject: &Subject) -> String {
        match subject {
            Subject::Value => "value".into(),
            Subject::Field(base, name) => {
                format!("{}.and_then(|v| v.get({:?}))", self.subject(base), name)
            }
            Subject::Element => "Some(curr)".into(),
        }
    }

    fn is_absent(&self, subject: &str) -> String {
        format!("{}.is_none()", subject)
    }

    fn is_null(&self, subject: &str) -> String {
        format!("matches!({}, Some(Value::Null))", subject)
    }

    fn has_kind(&self, subject: &str, kind: ValueKind) -> String {
        let pattern = match kind {
            ValueKind::Boolean => "Value::Bool(_)",
            ValueKind::String => "Value::String(_)",
            ValueKind::Number => "Value::Number(_)",
            ValueKind::Record => "Value::Object(_)",
        };
        format!("matches!({}, Some({}))", subject, pattern)
    }

    fn equals(&self, subject: &str, literal: &Literal) -> Result<String> {
        Ok(match literal {
            Literal::Bool(b) => format!("{} == Some(&Value::Bool({}))", subject, b),
            Literal::String(s) => format!("{}.and_then(Value::as_str) == Some({:?})", subject, s),
            // integral floats such as `3.0` are the same number
            Literal::Integer(n) => format!(
                "{}.is_some_and(|v| v.as_i64() == Some({n}) || (v.is_f64() && v.as_f64() == Some({n}.0)))",
                subject
            ),
        })
    }

    fn is_sequence(&self, subject: &str) -> String {
        format!("matches!({}, Some(Value::Array(_)))", subject)
    }

    fn every(&self, subject: &str, element: &str) -> String {
        format!(
            "{}.and_then(Value::as_array).map_or(false, |items| items.iter().all(|curr| {}))",
            subject, element
        )
    }

    fn call(&self, function: &str, subject: &str) -> String {
        format!("{}({})", function, subject)
    }

    fn literal_bool(&self, value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }
}

pub(super) fn declaration(function: &str, certifies: &str, body: &str) -> String {
    format!(
        "/// Certifies that `value` conforms to `{}`.\n#[allow(non_snake_case)]\npub fn {}(value: Option<&Value>) -> bool {{\n    {}\n}}",
        certifies, function, body
    )
}

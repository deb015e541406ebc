//! TypeScript validator rendering
//!
//! Predicates take `value: any` and narrow it with a type guard naming the
//! certified shape (`value is getPet_response`).

use super::{Syntax, Target};
use crate::error::{Error, Result};
use crate::predicate::{Literal, Subject, ValueKind};

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`)
pub(crate) const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

pub(crate) struct TypeScriptSyntax;

impl Syntax for TypeScriptSyntax {
    const TARGET: Target = Target::TypeScript;

    fn subject(&self, subject: &Subject) -> String {
        match subject {
            Subject::Value => "value".into(),
            Subject::Field(base, name) => {
                format!("{}[{}]", self.subject(base), string_literal(name))
            }
            Subject::Element => "curr".into(),
        }
    }

    fn is_absent(&self, subject: &str) -> String {
        format!("{} === undefined", subject)
    }

    fn is_null(&self, subject: &str) -> String {
        format!("{} === null", subject)
    }

    fn has_kind(&self, subject: &str, kind: ValueKind) -> String {
        let name = match kind {
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Record => "object",
        };
        format!("typeof {} === \"{}\"", subject, name)
    }

    fn equals(&self, subject: &str, literal: &Literal) -> Result<String> {
        let rendered = match literal {
            Literal::Bool(b) => b.to_string(),
            Literal::String(s) => string_literal(s),
            Literal::Integer(n) => {
                if n.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
                    return Err(Error::UnsupportedConstruct {
                        construct: format!(
                            "integer constant {} exceeds Number.MAX_SAFE_INTEGER",
                            n
                        ),
                        target: Target::TypeScript.to_string(),
                    });
                }
                n.to_string()
            }
        };
        Ok(format!("{} === {}", subject, rendered))
    }

    fn is_sequence(&self, subject: &str) -> String {
        format!("{} instanceof Array", subject)
    }

    fn every(&self, subject: &str, element: &str) -> String {
        format!(
            "{}.reduce((acc, curr) => acc && {}, true)",
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

/// Double-quoted TypeScript string literal
pub(crate) fn string_literal(s: &str) -> String {
    // JSON string syntax is a subset of JS string literal syntax
    serde_json::Value::String(s.to_owned()).to_string()
}

pub(super) fn declaration(function: &str, certifies: &str, body: &str) -> String {
    format!(
        "export function {}(value: any): value is {} {{\n    return {};\n}}",
        function, certifies, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_predicate;
    use crate::model::TypeNode;
    use crate::predicate::compile;

    #[test]
    fn test_field_names_are_quoted() {
        let syntax = TypeScriptSyntax;
        let subject = Subject::Value.field("a\"b");
        assert_eq!(syntax.subject(&subject), r#"value["a\"b"]"#);
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), r#""plain""#);
        assert_eq!(string_literal("a\\b\n\"c\""), r#""a\\b\n\"c\"""#);
        assert_eq!(string_literal("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn test_nested_fields() {
        let syntax = TypeScriptSyntax;
        let subject = Subject::Element.field("owner").field("id");
        assert_eq!(syntax.subject(&subject), r#"curr["owner"]["id"]"#);
    }

    #[test]
    fn test_integer_limits() {
        let ok = TypeNode::integer_constant(MAX_SAFE_INTEGER);
        assert_eq!(
            render_predicate(&compile(&ok), Target::TypeScript).unwrap(),
            "value === 9007199254740991"
        );

        let too_big = TypeNode::integer_constant(MAX_SAFE_INTEGER + 1);
        let err = render_predicate(&compile(&too_big), Target::TypeScript).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstruct { .. }));

        let too_small = TypeNode::integer_constant(i64::MIN);
        assert!(render_predicate(&compile(&too_small), Target::TypeScript).is_err());
    }

    #[test]
    fn test_declaration_shape() {
        assert_eq!(
            declaration("validateExample", "example", "value === null"),
            "export function validateExample(value: any): value is example {\n    return value === null;\n}"
        );
    }
}

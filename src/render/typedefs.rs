//! TypeScript type aliases
//!
//! Validators narrow `value` to a named shape (`value is Pet`). These aliases
//! declare those shapes, one per validator and in the same order.

use super::typescript::{string_literal, MAX_SAFE_INTEGER};
use crate::error::{Error, Result};
use crate::model::{Contract, TypeNode};
use crate::naming::{type_name, Role};
use regex::Regex;
use std::sync::OnceLock;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier pattern"))
}

/// Render a type tree as a TypeScript type expression
pub fn render_type(node: &TypeNode) -> Result<String> {
    Ok(render(node)?.0)
}

/// Whether a rendered type needs parentheses before `[]`
type Rendered = (String, bool);

fn render(node: &TypeNode) -> Result<Rendered> {
    let atom = |s: &str| (s.to_string(), false);
    Ok(match node {
        TypeNode::Void => atom("undefined"),
        TypeNode::Null => atom("null"),
        TypeNode::Boolean => atom("boolean"),
        TypeNode::BooleanConstant { value } => (value.to_string(), false),
        TypeNode::String => atom("string"),
        TypeNode::StringConstant { value } => (string_literal(value), false),
        TypeNode::Number => atom("number"),
        TypeNode::IntegerConstant { value } => {
            if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
                return Err(Error::UnsupportedConstruct {
                    construct: format!("integer constant type {}", value),
                    target: "typescript".into(),
                });
            }
            (value.to_string(), false)
        }
        TypeNode::Object { fields } => {
            if fields.is_empty() {
                atom("{}")
            } else {
                let members = fields
                    .iter()
                    .map(|(name, field)| {
                        let key = if identifier_pattern().is_match(name) {
                            name.clone()
                        } else {
                            string_literal(name)
                        };
                        let marker = if field.is_required() { "" } else { "?" };
                        Ok(format!("{}{}: {}", key, marker, render_type(&field.ty)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                (format!("{{ {} }}", members.join("; ")), false)
            }
        }
        TypeNode::Array { element_type } => {
            let (inner, compound) = render(element_type)?;
            if compound {
                (format!("({})[]", inner), false)
            } else {
                (format!("{}[]", inner), false)
            }
        }
        TypeNode::Optional { optional_type } => {
            (format!("{} | undefined", render_type(optional_type)?), true)
        }
        TypeNode::Union { types } => {
            if types.is_empty() {
                atom("never")
            } else {
                let variants = types
                    .iter()
                    .map(render_type)
                    .collect::<Result<Vec<_>>>()?;
                let compound = variants.len() > 1 || render(&types[0])?.1;
                (variants.join(" | "), compound)
            }
        }
        TypeNode::TypeReference { name } => (name.clone(), false),
    })
}

/// `export type` declarations for every named type and endpoint message,
/// in validator order
pub fn type_aliases(contract: &Contract) -> Result<Vec<String>> {
    let mut aliases = Vec::new();
    for (name, ty) in &contract.types {
        aliases.push(alias(&type_name(name, Role::Type), ty)?);
    }
    for (name, endpoint) in &contract.endpoints {
        for (role, ty) in endpoint.messages() {
            aliases.push(alias(&type_name(name, role), ty)?);
        }
    }
    Ok(aliases)
}

fn alias(name: &str, ty: &TypeNode) -> Result<String> {
    Ok(format!("export type {} = {};", name, render_type(ty)?))
}

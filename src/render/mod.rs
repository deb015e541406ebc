//! Code rendering: turn predicates into target source text
//!
//! The predicate compiler is target-neutral; each [`Target`] supplies the
//! spelling of subjects, atoms and declarations. Operator precedence is
//! handled once here, so a disjunction nested inside a conjunction gets
//! parentheses in every target and nothing else does.

mod rust;
pub mod typedefs;
mod typescript;

use crate::error::{Error, Result};
use crate::naming::{validator_name, Role};
use crate::predicate::{Literal, Predicate, Subject, ValueKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target language for validator generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[serde(alias = "ts")]
    TypeScript,
    #[serde(alias = "rs")]
    Rust,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::TypeScript, Target::Rust];

    /// File extension of generated units
    pub fn extension(&self) -> &'static str {
        match self {
            Target::TypeScript => "ts",
            Target::Rust => "rs",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::TypeScript => write!(f, "typescript"),
            Target::Rust => write!(f, "rust"),
        }
    }
}

impl std::str::FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(Target::TypeScript),
            "rust" | "rs" => Ok(Target::Rust),
            other => Err(Error::Other(format!(
                "Unknown target '{}' (expected typescript or rust)",
                other
            ))),
        }
    }
}

/// Per-target spelling of predicate atoms
pub(crate) trait Syntax {
    const TARGET: Target;

    fn subject(&self, subject: &Subject) -> String;
    fn is_absent(&self, subject: &str) -> String;
    fn is_null(&self, subject: &str) -> String;
    fn has_kind(&self, subject: &str, kind: ValueKind) -> String;
    fn equals(&self, subject: &str, literal: &Literal) -> Result<String>;
    fn is_sequence(&self, subject: &str) -> String;
    fn every(&self, subject: &str, element: &str) -> String;
    fn call(&self, function: &str, subject: &str) -> String;
    fn literal_bool(&self, value: bool) -> &'static str;
}

/// Binding strength, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Or,
    And,
    Atom,
}

/// Render a predicate as a target expression
pub fn render_predicate(predicate: &Predicate, target: Target) -> Result<String> {
    match target {
        Target::TypeScript => render_with(&typescript::TypeScriptSyntax, predicate, Prec::Or),
        Target::Rust => render_with(&rust::RustSyntax, predicate, Prec::Or),
    }
}

fn render_with<S: Syntax>(syntax: &S, predicate: &Predicate, context: Prec) -> Result<String> {
    let (text, prec) = match predicate {
        Predicate::IsAbsent(s) => (syntax.is_absent(&syntax.subject(s)), Prec::Atom),
        Predicate::IsNull(s) => (syntax.is_null(&syntax.subject(s)), Prec::Atom),
        Predicate::HasKind(s, kind) => (syntax.has_kind(&syntax.subject(s), *kind), Prec::Atom),
        Predicate::Equals(s, literal) => (syntax.equals(&syntax.subject(s), literal)?, Prec::Atom),
        Predicate::IsSequence(s) => (syntax.is_sequence(&syntax.subject(s)), Prec::Atom),
        Predicate::Every(s, element) => {
            let element = render_with(syntax, element, Prec::And)?;
            (syntax.every(&syntax.subject(s), &element), Prec::Atom)
        }
        Predicate::Conforms(s, name) => {
            let function = validator_name(S::TARGET, name, Role::Type);
            (syntax.call(&function, &syntax.subject(s)), Prec::Atom)
        }
        Predicate::Not(inner) => (
            format!("!({})", render_with(syntax, inner, Prec::Or)?),
            Prec::Atom,
        ),
        Predicate::And(terms) => {
            if terms.is_empty() {
                (syntax.literal_bool(true).to_string(), Prec::Atom)
            } else {
                let parts = terms
                    .iter()
                    .map(|t| render_with(syntax, t, Prec::And))
                    .collect::<Result<Vec<_>>>()?;
                (parts.join(" && "), Prec::And)
            }
        }
        Predicate::Or(terms) => {
            if terms.is_empty() {
                (syntax.literal_bool(false).to_string(), Prec::Atom)
            } else {
                let parts = terms
                    .iter()
                    .map(|t| render_with(syntax, t, Prec::Or))
                    .collect::<Result<Vec<_>>>()?;
                (parts.join(" || "), Prec::Or)
            }
        }
    };

    if prec < context {
        Ok(format!("({})", text))
    } else {
        Ok(text)
    }
}

/// Wrap a rendered predicate body into a named, exported function
/// documenting the shape it certifies
pub fn render_declaration(target: Target, function: &str, certifies: &str, body: &str) -> String {
    match target {
        Target::TypeScript => typescript::declaration(function, certifies, body),
        Target::Rust => rust::declaration(function, certifies, body),
    }
}

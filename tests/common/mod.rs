//! Reference evaluator for compiled predicates
//!
//! Interprets a [`Predicate`] tree over `serde_json` values with the same
//! semantics as the generated Rust validators. `None` stands for an absent
//! value.

#![allow(dead_code)]

use contractc::predicate::{compile, Literal, Predicate, Subject, ValueKind};
use contractc::{Contract, TypeNode};
use serde_json::Value;

pub struct Oracle<'a> {
    contract: &'a Contract,
}

impl<'a> Oracle<'a> {
    pub fn new(contract: &'a Contract) -> Self {
        Self { contract }
    }

    /// Whether `value` conforms to `ty`
    pub fn accepts(&self, ty: &TypeNode, value: Option<&Value>) -> bool {
        self.eval(&compile(ty), value, None)
    }

    /// Whether `value` conforms to the named type; undeclared names reject
    pub fn accepts_named(&self, name: &str, value: Option<&Value>) -> bool {
        self.contract
            .types
            .get(name)
            .is_some_and(|ty| self.accepts(ty, value))
    }

    fn resolve<'v>(
        &self,
        subject: &Subject,
        root: Option<&'v Value>,
        element: Option<&'v Value>,
    ) -> Option<&'v Value> {
        match subject {
            Subject::Value => root,
            Subject::Field(base, name) => self.resolve(base, root, element)?.get(name.as_str()),
            Subject::Element => element,
        }
    }

    fn eval(&self, predicate: &Predicate, root: Option<&Value>, element: Option<&Value>) -> bool {
        let at = |s: &Subject| self.resolve(s, root, element);
        match predicate {
            Predicate::IsAbsent(s) => at(s).is_none(),
            Predicate::IsNull(s) => matches!(at(s), Some(Value::Null)),
            Predicate::HasKind(s, kind) => matches!(
                (kind, at(s)),
                (ValueKind::Boolean, Some(Value::Bool(_)))
                    | (ValueKind::String, Some(Value::String(_)))
                    | (ValueKind::Number, Some(Value::Number(_)))
                    | (ValueKind::Record, Some(Value::Object(_)))
            ),
            Predicate::Equals(s, literal) => match (literal, at(s)) {
                (Literal::Bool(b), Some(Value::Bool(v))) => b == v,
                (Literal::String(c), Some(Value::String(v))) => c == v,
                (Literal::Integer(n), Some(v)) => {
                    v.as_i64() == Some(*n) || (v.is_f64() && v.as_f64() == Some(*n as f64))
                }
                _ => false,
            },
            Predicate::IsSequence(s) => matches!(at(s), Some(Value::Array(_))),
            Predicate::Every(s, inner) => match at(s) {
                Some(Value::Array(items)) => items
                    .iter()
                    .all(|item| self.eval(inner, root, Some(item))),
                _ => false,
            },
            Predicate::Conforms(s, name) => self.accepts_named(name, at(s)),
            Predicate::Not(inner) => !self.eval(inner, root, element),
            Predicate::And(terms) => terms.iter().all(|t| self.eval(t, root, element)),
            Predicate::Or(terms) => terms.iter().any(|t| self.eval(t, root, element)),
        }
    }
}

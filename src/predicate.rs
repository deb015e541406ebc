//! Predicate compilation
//!
//! Turns a [`TypeNode`] into a [`Predicate`]: a target-neutral boolean
//! expression answering "does this runtime value conform to this type".
//! Renderers in [`crate::render`] turn predicates into source text.
//!
//! Compilation is local. A type reference becomes [`Predicate::Conforms`],
//! a call by name, so recursive and mutually recursive types never expand.

use crate::model::TypeNode;
use crate::render::{render_predicate, Target};
use crate::Result;

/// The runtime value a predicate fragment inspects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The value passed to the generated function
    Value,
    /// A field looked up on another subject; a missing field is "absent"
    Field(Box<Subject>, String),
    /// The element bound by the innermost enclosing [`Predicate::Every`]
    Element,
}

impl Subject {
    pub fn field(&self, name: impl Into<String>) -> Subject {
        Subject::Field(Box::new(self.clone()), name.into())
    }
}

/// Runtime kinds a predicate can test for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    String,
    Number,
    /// Any key/value record (null excluded separately)
    Record,
}

/// A literal for strict equality tests
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    String(String),
    Integer(i64),
}

/// Boolean expression over a runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    IsAbsent(Subject),
    IsNull(Subject),
    HasKind(Subject, ValueKind),
    Equals(Subject, Literal),
    IsSequence(Subject),
    /// Every element of the subject satisfies the inner predicate,
    /// which inspects [`Subject::Element`]
    Every(Subject, Box<Predicate>),
    /// Call the predicate declared for the named type
    Conforms(Subject, String),
    Not(Box<Predicate>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

/// Compile a type tree against the function's own value
pub fn compile(node: &TypeNode) -> Predicate {
    compile_subject(node, &Subject::Value)
}

/// Compile a type tree against an arbitrary subject
pub fn compile_subject(node: &TypeNode, subject: &Subject) -> Predicate {
    match node {
        TypeNode::Void => Predicate::IsAbsent(subject.clone()),
        TypeNode::Null => Predicate::IsNull(subject.clone()),
        TypeNode::Boolean => Predicate::HasKind(subject.clone(), ValueKind::Boolean),
        TypeNode::BooleanConstant { value } => {
            Predicate::Equals(subject.clone(), Literal::Bool(*value))
        }
        TypeNode::String => Predicate::HasKind(subject.clone(), ValueKind::String),
        TypeNode::StringConstant { value } => {
            Predicate::Equals(subject.clone(), Literal::String(value.clone()))
        }
        TypeNode::Number => Predicate::HasKind(subject.clone(), ValueKind::Number),
        TypeNode::IntegerConstant { value } => {
            Predicate::Equals(subject.clone(), Literal::Integer(*value))
        }
        TypeNode::Object { fields } => {
            let mut terms = vec![
                Predicate::Not(Box::new(Predicate::IsNull(subject.clone()))),
                Predicate::HasKind(subject.clone(), ValueKind::Record),
            ];
            for (name, field) in fields {
                let field_subject = subject.field(name);
                // Optional fields share the required path once wrapped
                let term = if field.is_required() {
                    compile_subject(&field.ty, &field_subject)
                } else {
                    compile_subject(&TypeNode::optional(field.ty.clone()), &field_subject)
                };
                terms.push(term);
            }
            Predicate::And(terms)
        }
        TypeNode::Array { element_type } => Predicate::And(vec![
            Predicate::IsSequence(subject.clone()),
            Predicate::Every(
                subject.clone(),
                Box::new(compile_subject(element_type, &Subject::Element)),
            ),
        ]),
        TypeNode::Optional { optional_type } => Predicate::Or(vec![
            Predicate::IsAbsent(subject.clone()),
            compile_subject(optional_type, subject),
        ]),
        TypeNode::Union { types } => {
            let mut variants: Vec<Predicate> = types
                .iter()
                .map(|variant| compile_subject(variant, subject))
                .collect();
            if variants.len() == 1 {
                variants.remove(0)
            } else {
                Predicate::Or(variants)
            }
        }
        TypeNode::TypeReference { name } => Predicate::Conforms(subject.clone(), name.clone()),
    }
}

/// Compile a type tree straight to target source text
pub fn compile_to_source(node: &TypeNode, target: Target) -> Result<String> {
    render_predicate(&compile(node), target)
}

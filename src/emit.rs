//! Declaration emission
//!
//! Wraps every named type and every endpoint message into a named, exported
//! predicate, then concatenates them in contract order:
//!
//! 1. named types, in declaration order
//! 2. endpoints, in declaration order, each emitting request, response,
//!    default error, then custom errors by ascending status code
//!
//! Referential integrity is not checked here. A dangling reference becomes
//! a call to a function the unit does not define.

use crate::error::Result;
use crate::model::{Contract, Endpoint, TypeNode};
use crate::naming::{type_name, validator_name, Role};
use crate::predicate::compile;
use crate::render::{render_declaration, render_predicate, Target};
use serde::Serialize;
use tracing::debug;

/// One emitted predicate function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Function name, e.g. `validateGetPet_response`
    pub name: String,
    /// Name of the shape the function certifies, e.g. `getPet_response`
    pub certifies: String,
    /// Complete source text of the function
    pub source: String,
}

/// Emit the predicate for `owner` in `role`
pub fn emit_declaration(
    target: Target,
    owner: &str,
    role: Role,
    ty: &TypeNode,
) -> Result<Declaration> {
    let name = validator_name(target, owner, role);
    let certifies = type_name(owner, role);
    let body = render_predicate(&compile(ty), target)?;
    let source = render_declaration(target, &name, &certifies, &body);
    Ok(Declaration {
        name,
        certifies,
        source,
    })
}

/// Emit the predicate for a standalone named type
pub fn emit_type(target: Target, name: &str, ty: &TypeNode) -> Result<Declaration> {
    emit_declaration(target, name, Role::Type, ty)
}

/// Emit every message predicate of an endpoint, in role order
pub fn emit_endpoint(target: Target, name: &str, endpoint: &Endpoint) -> Result<Vec<Declaration>> {
    endpoint
        .messages()
        .map(|(role, ty)| emit_declaration(target, name, role, ty))
        .collect()
}

/// Emit all declarations of a contract. Fails as a whole: no partial output.
pub fn emit(contract: &Contract, target: Target) -> Result<Vec<Declaration>> {
    let mut declarations = Vec::with_capacity(contract.types.len() + contract.endpoints.len() * 3);

    for (name, ty) in &contract.types {
        declarations.push(emit_type(target, name, ty)?);
    }
    debug!(target_lang = %target, count = contract.types.len(), "emitted type validators");

    for (name, endpoint) in &contract.endpoints {
        let emitted = emit_endpoint(target, name, endpoint)?;
        debug!(
            target_lang = %target,
            endpoint = %name,
            method = %endpoint.method,
            path = %endpoint.path_string(),
            count = emitted.len(),
            "emitted endpoint validators"
        );
        declarations.extend(emitted);
    }

    Ok(declarations)
}

/// Source of all validators, separated by blank lines
pub fn generate_validators(contract: &Contract, target: Target) -> Result<String> {
    Ok(emit(contract, target)?
        .into_iter()
        .map(|d| d.source)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

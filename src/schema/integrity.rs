//! Contract integrity checks
//!
//! The generators assume a well-formed contract. These checks run once, at
//! extraction time, and collect every problem before failing.

use super::parser::KEYWORDS;
use crate::error::{Error, Result};
use crate::model::{Contract, TypeNode};
use crate::naming::{validator_name, Role};
use crate::render::Target;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::OnceLock;
use thiserror::Error;

/// One integrity problem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    #[error("duplicate type '{0}'")]
    DuplicateType(String),

    #[error("duplicate endpoint '{0}'")]
    DuplicateEndpoint(String),

    #[error("endpoint '{endpoint}' declares status {status} more than once")]
    DuplicateStatus { endpoint: String, status: u32 },

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("identifier '{0}' is a reserved word")]
    ReservedIdentifier(String),

    #[error("{owner} references undeclared type '{name}'")]
    DanglingReference { owner: String, name: String },

    #[error("{owner} contains an empty union")]
    EmptyUnion { owner: String },

    #[error("{target} validator name '{name}' is generated by both {first} and {second}")]
    NameCollision {
        target: Target,
        name: String,
        first: String,
        second: String,
    },
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern")
    })
}

/// Predefined TypeScript type names; a type alias cannot take them
pub const TYPESCRIPT_TYPE_NAMES: [&str; 7] =
    ["any", "unknown", "never", "object", "undefined", "symbol", "bigint"];

/// Keys that repeat in a declaration list, reported once each
pub fn duplicates<'a, T>(keys: impl IntoIterator<Item = &'a T>) -> Vec<T::Owned>
where
    T: Eq + Hash + ToOwned + ?Sized + 'a,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for key in keys {
        if !seen.insert(key) && reported.insert(key) {
            dups.push(key.to_owned());
        }
    }
    dups
}

/// Repeated status codes of one endpoint's custom errors
pub fn duplicate_statuses<'a>(
    endpoint: &str,
    statuses: impl IntoIterator<Item = &'a u32>,
) -> Vec<IntegrityIssue> {
    duplicates(statuses)
        .into_iter()
        .map(|status| IntegrityIssue::DuplicateStatus {
            endpoint: endpoint.to_string(),
            status,
        })
        .collect()
}

/// Collect every integrity problem of a built contract
pub fn issues(contract: &Contract) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for name in contract.types.keys() {
        if TYPESCRIPT_TYPE_NAMES.contains(&name.as_str()) {
            issues.push(IntegrityIssue::ReservedIdentifier(name.clone()));
        }
    }

    for name in contract.types.keys().chain(contract.endpoints.keys()) {
        if KEYWORDS.contains(&name.as_str()) {
            issues.push(IntegrityIssue::ReservedIdentifier(name.clone()));
        } else if !identifier_pattern().is_match(name) {
            issues.push(IntegrityIssue::InvalidIdentifier(name.clone()));
        }
    }

    let mut trees: Vec<(String, &TypeNode)> = contract
        .types
        .iter()
        .map(|(name, ty)| (format!("type '{}'", name), ty))
        .collect();
    for (name, endpoint) in &contract.endpoints {
        for (role, ty) in endpoint.messages() {
            trees.push((describe(name, role), ty));
        }
    }

    for (owner, ty) in &trees {
        let mut reported = HashSet::new();
        for reference in ty.references() {
            if !contract.types.contains_key(reference) && reported.insert(reference) {
                issues.push(IntegrityIssue::DanglingReference {
                    owner: owner.clone(),
                    name: reference.to_string(),
                });
            }
        }
        let mut empty_union = false;
        ty.walk(&mut |node| {
            if matches!(node, TypeNode::Union { types } if types.is_empty()) {
                empty_union = true;
            }
        });
        if empty_union {
            issues.push(IntegrityIssue::EmptyUnion {
                owner: owner.clone(),
            });
        }
    }

    for target in Target::ALL {
        issues.extend(name_collisions(contract, target));
    }

    issues
}

fn describe(endpoint: &str, role: Role) -> String {
    match role {
        Role::Type => format!("type '{}'", endpoint),
        Role::Request => format!("endpoint '{}' request", endpoint),
        Role::Response => format!("endpoint '{}' response", endpoint),
        Role::DefaultError => format!("endpoint '{}' default error", endpoint),
        Role::CustomError(status) => format!("endpoint '{}' {} error", endpoint, status),
    }
}

fn name_collisions(contract: &Contract, target: Target) -> Vec<IntegrityIssue> {
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut issues = Vec::new();

    let declarations = contract
        .types
        .keys()
        .map(|name| (name.as_str(), Role::Type))
        .chain(contract.endpoints.iter().flat_map(|(name, endpoint)| {
            endpoint.messages().map(move |(role, _)| (name.as_str(), role))
        }));

    for (owner, role) in declarations {
        let function = validator_name(target, owner, role);
        let described = describe(owner, role);
        match owners.get(&function) {
            Some(first) => issues.push(IntegrityIssue::NameCollision {
                target,
                name: function,
                first: first.clone(),
                second: described,
            }),
            None => {
                owners.insert(function, described);
            }
        }
    }

    issues
}

/// Fail with every integrity problem of the contract, if any
pub fn check(contract: &Contract) -> Result<()> {
    let found = issues(contract);
    if found.is_empty() {
        Ok(())
    } else {
        Err(Error::ContractIntegrity(found))
    }
}

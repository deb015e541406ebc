//! Template context structures
//!
//! Converts a contract and its emitted declarations into template-friendly data.

use crate::emit::Declaration;
use crate::model::Contract;
use crate::render::Target;
use serde::Serialize;

/// Context for validator unit rendering
#[derive(Debug, Clone, Serialize)]
pub struct UnitContext {
    /// Label of the contract source (usually its path)
    pub source: String,
    /// Contract hash for provenance
    pub contract_hash: String,
    /// Whether to include provenance header
    pub provenance: bool,
    /// Target language
    pub target: String,
    /// Contract name, if known
    pub name: Option<String>,
    /// `export type` lines (TypeScript only, may be empty)
    pub type_aliases: Vec<String>,
    /// Emitted declarations, in emission order
    pub declarations: Vec<Declaration>,
    /// Declarations joined for the target, including any imports
    pub body: String,
}

impl UnitContext {
    pub fn new(
        contract: &Contract,
        target: Target,
        source: &str,
        provenance: bool,
        declarations: Vec<Declaration>,
        body: String,
    ) -> Self {
        Self {
            source: source.to_string(),
            contract_hash: contract.hash(),
            provenance,
            target: target.to_string(),
            name: contract.name.clone(),
            type_aliases: Vec::new(),
            declarations,
            body,
        }
    }

    pub fn with_type_aliases(mut self, aliases: Vec<String>) -> Self {
        self.type_aliases = aliases;
        self
    }
}

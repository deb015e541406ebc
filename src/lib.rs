// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # contractc: API contract validator compiler
//!
//! Compiles an API contract (named types plus HTTP endpoints) into runtime
//! validators: one exported predicate function per named type and per
//! endpoint message, emitted as TypeScript or Rust source.
//!
//! ## Core Concept
//!
//! A contract is a closed algebra of type trees. Each tree compiles to a
//! target-neutral [`Predicate`], which a target renderer turns into a boolean
//! expression over one untyped runtime value. References to other named
//! types become calls to their validators, so recursive types work without
//! inlining.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use contractc::{parse_contract, generate_validators, Target};
//!
//! let contract = parse_contract(r#"
//! types:
//!   - name: Pet
//!     type: "{ id: number, name: string, tag?: string }"
//! endpoints:
//!   - name: getPet
//!     method: GET
//!     path: /pets/:id
//!     response: Pet
//! "#)?;
//!
//! let ts = generate_validators(&contract, Target::TypeScript)?;
//! assert!(ts.contains("export function validatePet(value: any): value is Pet {"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! schema document ──► schema::load_contract ──► Contract
//!                                                  │
//!        ┌─────────────────────────────────────────┘
//!        ▼
//!   emit::emit ──► predicate::compile ──► render::render_predicate
//!        │
//!        ▼
//!   templates::render_unit ──► header + imports + aliases + validators
//! ```

// Core model
pub mod error;
pub mod model;
pub mod naming;
pub mod ordered;

// Front-end
pub mod schema;

// Compilation
pub mod emit;
pub mod predicate;
pub mod render;

// Output
pub mod config;
pub mod format;
pub mod templates;

// Re-exports
pub use config::Config;
pub use emit::{emit, generate_validators, Declaration};
pub use error::{Error, Result};
pub use model::{Contract, Endpoint, HttpMethod, ObjectField, PathSegment, TypeNode};
pub use naming::{validator_name, Role};
pub use predicate::{compile, Predicate};
pub use render::Target;
pub use schema::{load_contract, parse_contract};
pub use templates::{render_unit, UnitOptions};

// Code formatting
pub use format::{format_code, format_rust, FormatError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

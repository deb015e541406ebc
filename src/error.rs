//! Error types for contractc

use crate::schema::integrity::IntegrityIssue;
use crate::schema::parser::SyntaxError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// contractc errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Contract parse error: {0}")]
    ContractParse(String),

    #[error("Type syntax error in {context}: {source}")]
    TypeSyntax {
        context: String,
        #[source]
        source: SyntaxError,
    },

    #[error("Contract integrity error: {}", format_issues(.0))]
    ContractIntegrity(Vec<IntegrityIssue>),

    #[error("Unsupported construct for {target}: {construct}")]
    UnsupportedConstruct { construct: String, target: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

fn format_issues(issues: &[IntegrityIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

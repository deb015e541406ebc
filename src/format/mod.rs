//! Code Formatting Module
//!
//! Formats generated validator units:
//! - Rust (via prettyplease)
//! - TypeScript is emitted already laid out and passes through unchanged

use crate::render::Target;

/// Format generated code according to target language conventions
pub fn format_code(code: &str, target: Target) -> Result<String, FormatError> {
    match target {
        Target::Rust => format_rust(code),
        Target::TypeScript => Ok(code.to_string()),
    }
}

/// Format Rust code using prettyplease
pub fn format_rust(code: &str) -> Result<String, FormatError> {
    match syn::parse_file(code) {
        Ok(syntax_tree) => Ok(prettyplease::unparse(&syntax_tree)),
        Err(e) => Err(FormatError::ParseError {
            language: "Rust".to_string(),
            message: e.to_string(),
        }),
    }
}

/// Formatting errors
#[derive(Debug, Clone)]
pub enum FormatError {
    /// Failed to parse the code
    ParseError { language: String, message: String },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::ParseError { language, message } => {
                write!(f, "Failed to parse {} code: {}", language, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for crate::Error {
    fn from(e: FormatError) -> Self {
        crate::Error::Format(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rust_validator() {
        let code = "use serde_json::Value;\n/// Certifies that `value` conforms to `a`.\n#[allow(non_snake_case)]\npub fn validate_a(value: Option<&Value>) -> bool { value.is_none() }";
        let result = format_rust(code).unwrap();

        assert!(result.contains("pub fn validate_a(value: Option<&Value>) -> bool {"));
        assert!(result.contains("    value.is_none()\n"));
        assert!(result.contains("/// Certifies that `value` conforms to `a`."));
    }

    #[test]
    fn test_format_rust_invalid() {
        let code = "fn invalid( { }";
        let result = format_rust(code);

        assert!(result.is_err());
        match result {
            Err(FormatError::ParseError { language, .. }) => {
                assert_eq!(language, "Rust");
            }
            _ => panic!("Expected ParseError"),
        }
    }

    #[test]
    fn test_format_code_typescript() {
        // TypeScript passes through as-is
        let code = "export function validateA(value: any): value is a {\n    return value === null;\n}";
        let result = format_code(code, Target::TypeScript).unwrap();
        assert_eq!(result, code);
    }
}

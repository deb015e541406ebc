//! Declaration naming
//!
//! Both the predicate compiler (for type references) and the declaration
//! emitter (for function names) derive names here, so a reference to `Pet`
//! always calls exactly the function emitted for the `Pet` declaration.

use crate::render::Target;

/// The role a declaration plays for its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// A standalone named type
    Type,
    Request,
    Response,
    DefaultError,
    CustomError(u32),
}

impl Role {
    /// Suffix appended to the owner identifier
    pub fn suffix(&self) -> String {
        match self {
            Role::Type => String::new(),
            Role::Request => "_request".into(),
            Role::Response => "_response".into(),
            Role::DefaultError => "_defaultError".into(),
            Role::CustomError(status) => format!("_customError{}", status),
        }
    }
}

/// Name of the shape a declaration certifies, e.g. `getPet_customError404`
pub fn type_name(owner: &str, role: Role) -> String {
    format!("{}{}", owner, role.suffix())
}

/// Name of the predicate function for `owner` in `role`
///
/// ```
/// use contractc::naming::{validator_name, Role};
/// use contractc::Target;
/// assert_eq!(
///     validator_name(Target::TypeScript, "example", Role::CustomError(403)),
///     "validateExample_customError403"
/// );
/// assert_eq!(validator_name(Target::Rust, "Pet", Role::Type), "validate_Pet");
/// ```
pub fn validator_name(target: Target, owner: &str, role: Role) -> String {
    let name = type_name(owner, role);
    match target {
        Target::TypeScript => format!("validate{}", upper_first(&name)),
        Target::Rust => format!("validate_{}", name),
    }
}

/// Uppercase the first character, leaving the rest untouched
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_suffixes() {
        assert_eq!(type_name("example", Role::Type), "example");
        assert_eq!(type_name("example", Role::Request), "example_request");
        assert_eq!(type_name("example", Role::Response), "example_response");
        assert_eq!(
            type_name("example", Role::DefaultError),
            "example_defaultError"
        );
        assert_eq!(
            type_name("example", Role::CustomError(404)),
            "example_customError404"
        );
    }

    #[test]
    fn test_typescript_validator_names() {
        assert_eq!(
            validator_name(Target::TypeScript, "example", Role::Type),
            "validateExample"
        );
        assert_eq!(
            validator_name(Target::TypeScript, "getPet", Role::Request),
            "validateGetPet_request"
        );
        assert_eq!(
            validator_name(Target::TypeScript, "OtherType", Role::Type),
            "validateOtherType"
        );
    }

    #[test]
    fn test_rust_validator_names() {
        assert_eq!(
            validator_name(Target::Rust, "example", Role::DefaultError),
            "validate_example_defaultError"
        );
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("foo"), "Foo");
        assert_eq!(upper_first("Foo"), "Foo");
        assert_eq!(upper_first("_foo"), "_foo");
        assert_eq!(upper_first(""), "");
    }
}

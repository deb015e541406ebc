//! TypeScript validator output, checked character for character

use contractc::{generate_validators, Contract, Endpoint, HttpMethod, Target, TypeNode};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn single(ty: TypeNode) -> String {
    let contract = Contract::new().with_type("example", ty);
    generate_validators(&contract, Target::TypeScript).unwrap()
}

fn example_fn(body: &str) -> String {
    format!(
        "export function validateExample(value: any): value is example {{\n    return {};\n}}",
        body
    )
}

#[rstest]
#[case::void(TypeNode::Void, "value === undefined")]
#[case::null(TypeNode::Null, "value === null")]
#[case::boolean(TypeNode::Boolean, r#"typeof value === "boolean""#)]
#[case::boolean_true(TypeNode::boolean_constant(true), "value === true")]
#[case::boolean_false(TypeNode::boolean_constant(false), "value === false")]
#[case::string(TypeNode::String, r#"typeof value === "string""#)]
#[case::string_constant(TypeNode::string_constant("some constant"), r#"value === "some constant""#)]
#[case::number(TypeNode::Number, r#"typeof value === "number""#)]
#[case::integer_zero(TypeNode::integer_constant(0), "value === 0")]
#[case::integer_positive(TypeNode::integer_constant(123), "value === 123")]
#[case::integer_negative(TypeNode::integer_constant(-1000), "value === -1000")]
#[case::type_reference(TypeNode::reference("OtherType"), "validateOtherType(value)")]
fn test_scalar_validators(#[case] ty: TypeNode, #[case] body: &str) {
    assert_eq!(single(ty), example_fn(body));
}

#[test]
fn test_object_validators() {
    assert_eq!(
        single(TypeNode::object(Vec::<(String, TypeNode)>::new())),
        example_fn(r#"!(value === null) && typeof value === "object""#)
    );
    assert_eq!(
        single(TypeNode::object([("singleField", TypeNode::Number)])),
        example_fn(
            r#"!(value === null) && typeof value === "object" && typeof value["singleField"] === "number""#
        )
    );
    assert_eq!(
        single(TypeNode::object([
            ("field1", TypeNode::Number),
            ("field2", TypeNode::String),
            ("field3", TypeNode::Boolean),
        ])),
        example_fn(
            r#"!(value === null) && typeof value === "object" && typeof value["field1"] === "number" && typeof value["field2"] === "string" && typeof value["field3"] === "boolean""#
        )
    );
}

#[test]
fn test_array_validator() {
    assert_eq!(
        single(TypeNode::array(TypeNode::String)),
        example_fn(
            r#"value instanceof Array && value.reduce((acc, curr) => acc && typeof curr === "string", true)"#
        )
    );
}

#[test]
fn test_optional_validator() {
    assert_eq!(
        single(TypeNode::optional(TypeNode::String)),
        example_fn(r#"value === undefined || typeof value === "string""#)
    );
}

#[test]
fn test_union_validator() {
    assert_eq!(
        single(TypeNode::union([
            TypeNode::String,
            TypeNode::Number,
            TypeNode::Boolean
        ])),
        example_fn(
            r#"typeof value === "string" || typeof value === "number" || typeof value === "boolean""#
        )
    );
}

#[test]
fn test_nested_disjunctions_are_parenthesized() {
    let ty = TypeNode::object_with_fields([(
        "tag",
        contractc::ObjectField::optional(TypeNode::String),
    )]);
    assert_eq!(
        single(ty),
        example_fn(
            r#"!(value === null) && typeof value === "object" && (value["tag"] === undefined || typeof value["tag"] === "string")"#
        )
    );

    let ty = TypeNode::array(TypeNode::union([TypeNode::String, TypeNode::Null]));
    assert_eq!(
        single(ty),
        example_fn(
            r#"value instanceof Array && value.reduce((acc, curr) => acc && (typeof curr === "string" || curr === null), true)"#
        )
    );
}

#[test]
fn test_endpoint_validators() {
    let mut endpoint = Endpoint::new(HttpMethod::Post);
    endpoint.custom_error_types.insert(404, TypeNode::Void);
    endpoint.custom_error_types.insert(403, TypeNode::Void);
    let contract = Contract::new().with_endpoint("example", endpoint);

    let expected = [
        "export function validateExample_request(value: any): value is example_request {\n    return value === undefined;\n}",
        "export function validateExample_response(value: any): value is example_response {\n    return value === undefined;\n}",
        "export function validateExample_defaultError(value: any): value is example_defaultError {\n    return value === undefined;\n}",
        "export function validateExample_customError403(value: any): value is example_customError403 {\n    return value === undefined;\n}",
        "export function validateExample_customError404(value: any): value is example_customError404 {\n    return value === undefined;\n}",
    ]
    .join("\n\n");

    assert_eq!(
        generate_validators(&contract, Target::TypeScript).unwrap(),
        expected
    );
}

#[test]
fn test_types_come_before_endpoints() {
    let mut endpoint = Endpoint::new(HttpMethod::Get);
    endpoint.response_type = TypeNode::reference("Pet");
    let contract = Contract::new()
        .with_endpoint("getPet", endpoint)
        .with_type("Pet", TypeNode::String)
        .with_type("Owner", TypeNode::Number);

    let names: Vec<String> = contractc::emit(&contract, Target::TypeScript)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "validatePet",
            "validateOwner",
            "validateGetPet_request",
            "validateGetPet_response",
            "validateGetPet_defaultError",
        ]
    );
}

#[test]
fn test_empty_contract() {
    assert_eq!(
        generate_validators(&Contract::new(), Target::TypeScript).unwrap(),
        ""
    );
}

#[test]
fn test_unsafe_integer_fails_loudly() {
    let contract = Contract::new()
        .with_type("fine", TypeNode::Number)
        .with_type("huge", TypeNode::integer_constant(i64::MAX));
    let err = generate_validators(&contract, Target::TypeScript).unwrap_err();
    assert!(matches!(err, contractc::Error::UnsupportedConstruct { .. }));

    // The same constant is exact in Rust
    assert!(generate_validators(&contract, Target::Rust).is_ok());
}

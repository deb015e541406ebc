//! Contract types: the core data model
//!
//! A [`Contract`] is the language-neutral description of an HTTP API:
//! named type declarations plus endpoint descriptors. Every shape is a
//! [`TypeNode`], a closed algebra of structural types.
//!
//! Type trees only become cyclic through [`TypeNode::TypeReference`], which
//! names another declaration instead of owning it. Generators rely on this:
//! a reference always compiles to a call by name, never to an inlined copy.
//!
//! ## Serialized form
//!
//! ```json
//! {
//!   "types": {
//!     "Pet": {
//!       "kind": "object",
//!       "fields": {
//!         "id": { "type": { "kind": "number" } },
//!         "tag": { "type": { "kind": "string" }, "optional": true }
//!       }
//!     }
//!   },
//!   "endpoints": {}
//! }
//! ```

use crate::error::{Error, Result};
use crate::naming::Role;
use crate::ordered::{unique_btree_map, unique_index_map};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the type tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeNode {
    /// Exactly the "absent" sentinel
    Void,
    /// Exactly the null sentinel
    Null,
    Boolean,
    BooleanConstant {
        value: bool,
    },
    String,
    StringConstant {
        value: String,
    },
    Number,
    IntegerConstant {
        value: i64,
    },
    /// Open structural record; undeclared fields are ignored
    Object {
        #[serde(default, deserialize_with = "unique_index_map")]
        #[schemars(with = "IndexMap<String, ObjectField>")]
        fields: IndexMap<String, ObjectField>,
    },
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<TypeNode>,
    },
    Optional {
        #[serde(rename = "optionalType")]
        optional_type: Box<TypeNode>,
    },
    /// Ordered alternatives, first to last
    Union {
        types: Vec<TypeNode>,
    },
    /// Call-by-name link to another declaration
    TypeReference {
        name: String,
    },
}

/// A declared object field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectField {
    #[serde(rename = "type")]
    pub ty: TypeNode,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl ObjectField {
    pub fn required(ty: TypeNode) -> Self {
        Self {
            ty,
            optional: false,
        }
    }

    pub fn optional(ty: TypeNode) -> Self {
        Self { ty, optional: true }
    }

    pub fn is_required(&self) -> bool {
        !self.optional
    }
}

impl TypeNode {
    pub fn boolean_constant(value: bool) -> Self {
        TypeNode::BooleanConstant { value }
    }

    pub fn string_constant(value: impl Into<String>) -> Self {
        TypeNode::StringConstant {
            value: value.into(),
        }
    }

    pub fn integer_constant(value: i64) -> Self {
        TypeNode::IntegerConstant { value }
    }

    /// Object whose fields are all required
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, TypeNode)>) -> Self {
        TypeNode::Object {
            fields: fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ObjectField::required(ty)))
                .collect(),
        }
    }

    pub fn object_with_fields<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, ObjectField)>,
    ) -> Self {
        TypeNode::Object {
            fields: fields
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        }
    }

    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array {
            element_type: Box::new(element),
        }
    }

    pub fn optional(inner: TypeNode) -> Self {
        TypeNode::Optional {
            optional_type: Box::new(inner),
        }
    }

    pub fn union(variants: impl IntoIterator<Item = TypeNode>) -> Self {
        TypeNode::Union {
            types: variants.into_iter().collect(),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::TypeReference { name: name.into() }
    }

    /// Serialized `kind` tag of this node
    pub fn kind(&self) -> &'static str {
        match self {
            TypeNode::Void => "void",
            TypeNode::Null => "null",
            TypeNode::Boolean => "boolean",
            TypeNode::BooleanConstant { .. } => "boolean-constant",
            TypeNode::String => "string",
            TypeNode::StringConstant { .. } => "string-constant",
            TypeNode::Number => "number",
            TypeNode::IntegerConstant { .. } => "integer-constant",
            TypeNode::Object { .. } => "object",
            TypeNode::Array { .. } => "array",
            TypeNode::Optional { .. } => "optional",
            TypeNode::Union { .. } => "union",
            TypeNode::TypeReference { .. } => "type-reference",
        }
    }

    /// Visit every node of this tree, parents before children.
    /// References are reported, not followed.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeNode)) {
        visit(self);
        match self {
            TypeNode::Object { fields } => {
                for field in fields.values() {
                    field.ty.walk(visit);
                }
            }
            TypeNode::Array { element_type } => element_type.walk(visit),
            TypeNode::Optional { optional_type } => optional_type.walk(visit),
            TypeNode::Union { types } => {
                for variant in types {
                    variant.walk(visit);
                }
            }
            _ => {}
        }
    }

    /// Names referenced anywhere in this tree, in traversal order
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let TypeNode::TypeReference { name } = node {
                names.push(name.as_str());
            }
        });
        names
    }
}

/// HTTP methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        };
        f.write_str(s)
    }
}

/// One segment of an endpoint path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PathSegment {
    Static { value: String },
    Param { name: String },
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Static { value } => write!(f, "{}", value),
            PathSegment::Param { name } => write!(f, ":{}", name),
        }
    }
}

/// An endpoint descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub method: HttpMethod,

    #[serde(default)]
    pub path: Vec<PathSegment>,

    pub request_type: TypeNode,

    pub response_type: TypeNode,

    pub default_error_type: TypeNode,

    /// Keyed by HTTP status code, iterated in ascending order
    #[serde(default, deserialize_with = "unique_btree_map")]
    #[schemars(with = "BTreeMap<u32, TypeNode>")]
    pub custom_error_types: BTreeMap<u32, TypeNode>,
}

impl Endpoint {
    /// Endpoint with every message slot set to `void`
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            path: Vec::new(),
            request_type: TypeNode::Void,
            response_type: TypeNode::Void,
            default_error_type: TypeNode::Void,
            custom_error_types: BTreeMap::new(),
        }
    }

    /// Message types in emission order: request, response, default error,
    /// then custom errors by ascending status code
    pub fn messages(&self) -> impl Iterator<Item = (Role, &TypeNode)> + '_ {
        [
            (Role::Request, &self.request_type),
            (Role::Response, &self.response_type),
            (Role::DefaultError, &self.default_error_type),
        ]
        .into_iter()
        .chain(
            self.custom_error_types
                .iter()
                .map(|(status, ty)| (Role::CustomError(*status), ty)),
        )
    }

    /// Path rendered as `/pets/:id`
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            out.push_str(&segment.to_string());
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}

/// The root aggregate: named types and endpoints, both in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Contract", description = "API contract intermediate representation")]
pub struct Contract {
    /// Contract name, used for output file naming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "unique_index_map")]
    #[schemars(with = "IndexMap<String, TypeNode>")]
    pub types: IndexMap<String, TypeNode>,

    #[serde(default, deserialize_with = "unique_index_map")]
    #[schemars(with = "IndexMap<String, Endpoint>")]
    pub endpoints: IndexMap<String, Endpoint>,
}

impl Contract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, name: impl Into<String>, ty: TypeNode) -> Self {
        self.types.insert(name.into(), ty);
        self
    }

    pub fn with_endpoint(mut self, name: impl Into<String>, endpoint: Endpoint) -> Self {
        self.endpoints.insert(name.into(), endpoint);
        self
    }

    /// Parse contract IR from JSON. A repeated key anywhere is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ContractParse(e.to_string()))
    }

    /// Serialize contract IR to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize contract IR to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Digest of the canonical JSON form, for provenance headers
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip_through_json() {
        let node: TypeNode =
            serde_json::from_str(r#"{"kind": "boolean-constant", "value": true}"#).unwrap();
        assert_eq!(node, TypeNode::boolean_constant(true));

        let json = serde_json::to_string(&TypeNode::array(TypeNode::String)).unwrap();
        assert_eq!(json, r#"{"kind":"array","elementType":{"kind":"string"}}"#);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = serde_json::from_str::<TypeNode>(r#"{"kind": "tuple", "types": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_object_field_optional_flag() {
        let node: TypeNode = serde_json::from_str(
            r#"{"kind": "object", "fields": {
                "a": {"type": {"kind": "number"}},
                "b": {"type": {"kind": "string"}, "optional": true}
            }}"#,
        )
        .unwrap();
        let TypeNode::Object { fields } = node else {
            panic!("expected object");
        };
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(fields["a"].is_required());
        assert!(!fields["b"].is_required());
    }

    #[test]
    fn test_references_are_collected_without_following() {
        let node = TypeNode::object([
            ("owner", TypeNode::reference("User")),
            (
                "tags",
                TypeNode::array(TypeNode::union([
                    TypeNode::reference("Tag"),
                    TypeNode::Null,
                ])),
            ),
        ]);
        assert_eq!(node.references(), vec!["User", "Tag"]);
    }

    #[test]
    fn test_endpoint_messages_order() {
        let mut endpoint = Endpoint::new(HttpMethod::Post);
        endpoint.custom_error_types.insert(404, TypeNode::Void);
        endpoint.custom_error_types.insert(403, TypeNode::Null);

        let roles: Vec<Role> = endpoint.messages().map(|(role, _)| role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Request,
                Role::Response,
                Role::DefaultError,
                Role::CustomError(403),
                Role::CustomError(404),
            ]
        );
    }

    #[test]
    fn test_path_string() {
        let mut endpoint = Endpoint::new(HttpMethod::Get);
        assert_eq!(endpoint.path_string(), "/");
        endpoint.path = vec![
            PathSegment::Static {
                value: "pets".into(),
            },
            PathSegment::Param { name: "id".into() },
        ];
        assert_eq!(endpoint.path_string(), "/pets/:id");
    }

    #[test]
    fn test_contract_preserves_insertion_order() {
        let contract = Contract::new()
            .with_type("Zebra", TypeNode::String)
            .with_type("Apple", TypeNode::Number);
        let names: Vec<_> = contract.types.keys().cloned().collect();
        assert_eq!(names, vec!["Zebra", "Apple"]);

        let json = contract.to_json().unwrap();
        let back = Contract::from_json(&json).unwrap();
        assert_eq!(back, contract);
    }

    #[test]
    fn test_repeated_ir_keys_are_rejected() {
        let repeated = [
            r#"{"types": {"A": {"kind": "string"}, "A": {"kind": "number"}}}"#,
            r#"{"types": {"P": {"kind": "object", "fields": {
                "id": {"type": {"kind": "number"}},
                "id": {"type": {"kind": "string"}}
            }}}}"#,
            r#"{"endpoints": {"ping": {
                "method": "GET", "requestType": {"kind": "void"},
                "responseType": {"kind": "void"}, "defaultErrorType": {"kind": "void"},
                "customErrorTypes": {"404": {"kind": "null"}, "404": {"kind": "void"}}
            }}}"#,
        ];
        for json in repeated {
            let err = Contract::from_json(json).unwrap_err();
            assert!(
                matches!(&err, Error::ContractParse(msg) if msg.contains("duplicate key")),
                "{json}: {err}"
            );
        }
    }

    #[test]
    fn test_hash_is_stable() {
        let contract = Contract::new().with_type("a", TypeNode::Void);
        assert_eq!(contract.hash(), contract.clone().hash());
        assert!(contract.hash().starts_with("sha256:"));
        assert_ne!(
            contract.hash(),
            Contract::new().with_type("a", TypeNode::Null).hash()
        );
    }
}

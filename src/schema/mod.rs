//! Schema extraction: turn a schema document into a [`Contract`]
//!
//! A schema document is YAML (or JSON with the same shape). Types are written
//! in a compact notation parsed by [`parser`]:
//!
//! ```yaml
//! name: pets
//! types:
//!   - name: Pet
//!     type: "{ id: number, name: string, tag?: string, kind: 'cat' | 'dog' }"
//!   - name: Error
//!     type: "{ message: string }"
//! endpoints:
//!   - name: getPet
//!     method: GET
//!     path: /pets/:id
//!     response: Pet
//!     default_error: Error
//!     errors:
//!       404: "{ message: string, id: number }"
//! ```
//!
//! Omitted message slots default to `void`. A `.json` file holding a
//! serialized [`Contract`] is accepted as well.
//!
//! Every contract leaving this module has passed [`integrity::check`].

pub mod integrity;
pub mod lexer;
pub mod parser;

use crate::error::{Error, Result};
use crate::model::{Contract, Endpoint, HttpMethod, PathSegment, TypeNode};
use crate::ordered::Entries;
use integrity::{duplicate_statuses, duplicates, IntegrityIssue};
use parser::parse_type;
use schemars::JsonSchema;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// A schema document as written by API authors
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Contract schema", description = "API contract schema document")]
pub struct SchemaDocument {
    /// Contract name (defaults to the file stem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub types: Vec<TypeEntry>,

    #[serde(default)]
    pub endpoints: Vec<EndpointEntry>,
}

/// A named type declaration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TypeEntry {
    pub name: String,

    /// Type expression
    #[serde(rename = "type")]
    pub ty: String,
}

/// An endpoint declaration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EndpointEntry {
    pub name: String,

    pub method: HttpMethod,

    /// Path such as `/pets/:id` or `/pets/{id}`
    #[serde(default)]
    pub path: String,

    #[serde(default = "void_expr")]
    pub request: String,

    #[serde(default = "void_expr")]
    pub response: String,

    #[serde(default = "void_expr")]
    pub default_error: String,

    /// Custom error bodies keyed by status code
    #[serde(default)]
    #[schemars(with = "BTreeMap<u32, String>")]
    pub errors: Entries<u32, String>,
}

fn void_expr() -> String {
    "void".to_string()
}

impl SchemaDocument {
    /// Parse document from YAML (JSON is valid YAML)
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::ContractParse(e.to_string()))
    }

    /// Build and check the contract this document describes
    pub fn into_contract(self) -> Result<Contract> {
        let mut problems = Vec::new();
        problems.extend(
            duplicates(self.types.iter().map(|t| t.name.as_str()))
                .into_iter()
                .map(IntegrityIssue::DuplicateType),
        );
        problems.extend(
            duplicates(self.endpoints.iter().map(|e| e.name.as_str()))
                .into_iter()
                .map(IntegrityIssue::DuplicateEndpoint),
        );
        for entry in &self.endpoints {
            problems.extend(duplicate_statuses(&entry.name, entry.errors.keys()));
        }
        if !problems.is_empty() {
            return Err(Error::ContractIntegrity(problems));
        }

        let mut contract = Contract {
            name: self.name,
            ..Contract::default()
        };

        for entry in self.types {
            let ty = parse_expr(&entry.ty, || format!("type '{}'", entry.name))?;
            contract.types.insert(entry.name, ty);
        }

        for entry in self.endpoints {
            let name = entry.name;
            let mut endpoint = Endpoint::new(entry.method);
            endpoint.path = parse_path(&entry.path);
            endpoint.request_type =
                parse_expr(&entry.request, || format!("endpoint '{}' request", name))?;
            endpoint.response_type =
                parse_expr(&entry.response, || format!("endpoint '{}' response", name))?;
            endpoint.default_error_type = parse_expr(&entry.default_error, || {
                format!("endpoint '{}' default error", name)
            })?;
            for (status, expr) in entry.errors.iter() {
                let ty = parse_expr(expr, || format!("endpoint '{}' {} error", name, status))?;
                endpoint.custom_error_types.insert(*status, ty);
            }
            contract.endpoints.insert(name, endpoint);
        }

        integrity::check(&contract)?;
        Ok(contract)
    }
}

fn parse_expr(src: &str, context: impl FnOnce() -> String) -> Result<TypeNode> {
    parse_type(src).map_err(|source| Error::TypeSyntax {
        context: context(),
        source,
    })
}

/// Split `/pets/:id/toys/{toy}` into static and parameter segments
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                PathSegment::Param {
                    name: name.to_string(),
                }
            } else if let Some(name) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                PathSegment::Param {
                    name: name.to_string(),
                }
            } else {
                PathSegment::Static {
                    value: segment.to_string(),
                }
            }
        })
        .collect()
}

/// Parse a schema document held in memory
pub fn parse_contract(source: &str) -> Result<Contract> {
    SchemaDocument::from_yaml(source)?.into_contract()
}

/// Load a contract from a schema document (`.yaml`, `.yml`) or a
/// serialized contract IR (`.json`)
pub fn load_contract(path: &Path) -> Result<Contract> {
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "read contract source");

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let mut contract = if is_json && looks_like_ir(&content) {
        let repeated = IrOutline::repeated_keys(&content);
        if !repeated.is_empty() {
            return Err(Error::ContractIntegrity(repeated));
        }
        let contract = Contract::from_json(&content)?;
        integrity::check(&contract)?;
        contract
    } else {
        parse_contract(&content)?
    };

    if contract.name.is_none() {
        contract.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.split('.').next().unwrap_or(s).to_string());
    }

    info!(
        path = %path.display(),
        types = contract.types.len(),
        endpoints = contract.endpoints.len(),
        "loaded contract"
    );
    Ok(contract)
}

/// Declaration keys of a serialized contract, repeats kept
#[derive(Debug, Default, Deserialize)]
struct IrOutline {
    #[serde(default)]
    types: Entries<String, IgnoredAny>,

    #[serde(default)]
    endpoints: Entries<String, EndpointOutline>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointOutline {
    #[serde(default)]
    custom_error_types: Entries<u32, IgnoredAny>,
}

impl IrOutline {
    /// Repeated type, endpoint and status keys. A document that does not
    /// fit the outline reports nothing here and fails in [`Contract::from_json`].
    fn repeated_keys(json: &str) -> Vec<IntegrityIssue> {
        let Ok(outline) = serde_json::from_str::<IrOutline>(json) else {
            return Vec::new();
        };
        let mut issues: Vec<IntegrityIssue> = duplicates(outline.types.keys())
            .into_iter()
            .map(IntegrityIssue::DuplicateType)
            .collect();
        issues.extend(
            duplicates(outline.endpoints.keys())
                .into_iter()
                .map(IntegrityIssue::DuplicateEndpoint),
        );
        for (name, endpoint) in outline.endpoints.iter() {
            issues.extend(duplicate_statuses(name, endpoint.custom_error_types.keys()));
        }
        issues
    }
}

/// Serialized contracts hold `types`/`endpoints` as maps, documents as lists
fn looks_like_ir(content: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(content)
        .map(|v| {
            ["types", "endpoints"]
                .iter()
                .any(|key| v.get(key).is_some_and(|section| section.is_object()))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &str = r#"
name: pets
types:
  - name: Pet
    type: "{ id: number, name: string, tag?: string }"
  - name: Error
    type: "{ message: string }"
endpoints:
  - name: getPet
    method: GET
    path: /pets/:id
    response: Pet
    default_error: Error
    errors:
      404: "{ message: string, id: number }"
      400: Error
  - name: createPet
    method: POST
    path: /pets
    request: "{ name: string, tag?: string }"
    response: Pet
"#;

    #[test]
    fn test_parse_contract() {
        let contract = parse_contract(PETS).unwrap();
        assert_eq!(contract.name.as_deref(), Some("pets"));
        assert_eq!(contract.types.keys().collect::<Vec<_>>(), vec!["Pet", "Error"]);
        assert_eq!(
            contract.endpoints.keys().collect::<Vec<_>>(),
            vec!["getPet", "createPet"]
        );

        let get_pet = &contract.endpoints["getPet"];
        assert_eq!(get_pet.method, HttpMethod::Get);
        assert_eq!(get_pet.path_string(), "/pets/:id");
        assert_eq!(get_pet.request_type, TypeNode::Void);
        assert_eq!(get_pet.response_type, TypeNode::reference("Pet"));
        assert_eq!(
            get_pet.custom_error_types.keys().copied().collect::<Vec<_>>(),
            vec![400, 404]
        );
    }

    #[test]
    fn test_duplicate_types_are_rejected() {
        let yaml = r#"
types:
  - name: A
    type: string
  - name: A
    type: number
"#;
        let err = parse_contract(yaml).unwrap_err();
        match err {
            Error::ContractIntegrity(issues) => {
                assert_eq!(issues, vec![IntegrityIssue::DuplicateType("A".into())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_statuses_are_rejected() {
        let yaml = r#"
types:
  - name: A
    type: string
endpoints:
  - name: getA
    method: GET
    errors:
      404: A
      500: A
      404: number
"#;
        let err = parse_contract(yaml).unwrap_err();
        match err {
            Error::ContractIntegrity(issues) => assert_eq!(
                issues,
                vec![IntegrityIssue::DuplicateStatus {
                    endpoint: "getA".into(),
                    status: 404
                }]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_ir_keys_are_integrity_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(
            &path,
            r#"{"types": {"A": {"kind": "string"}, "A": {"kind": "number"}},
                "endpoints": {
                  "ping": {"method": "GET", "requestType": {"kind": "void"},
                           "responseType": {"kind": "void"}, "defaultErrorType": {"kind": "void"},
                           "customErrorTypes": {"404": {"kind": "null"}, "404": {"kind": "void"}}},
                  "ping": {"method": "POST", "requestType": {"kind": "void"},
                           "responseType": {"kind": "void"}, "defaultErrorType": {"kind": "void"}}
                }}"#,
        )
        .unwrap();

        let err = load_contract(&path).unwrap_err();
        match err {
            Error::ContractIntegrity(issues) => assert_eq!(
                issues,
                vec![
                    IntegrityIssue::DuplicateType("A".into()),
                    IntegrityIssue::DuplicateEndpoint("ping".into()),
                    IntegrityIssue::DuplicateStatus {
                        endpoint: "ping".into(),
                        status: 404
                    },
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_document_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(SchemaDocument)).unwrap();
        assert_eq!(schema["title"], "Contract schema");
        let text = schema.to_string();
        assert!(text.contains("\"default_error\""));
        assert!(text.contains("\"errors\""));
    }

    #[test]
    fn test_syntax_error_names_its_context() {
        let yaml = r#"
endpoints:
  - name: broken
    method: PUT
    request: "{ a: }"
"#;
        let err = parse_contract(yaml).unwrap_err();
        assert!(matches!(err, Error::TypeSyntax { ref context, .. } if context == "endpoint 'broken' request"));
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let yaml = r#"
types:
  - name: A
    type: "B[]"
"#;
        assert!(matches!(
            parse_contract(yaml),
            Err(Error::ContractIntegrity(_))
        ));
    }

    #[test]
    fn test_bad_method_is_a_parse_error() {
        let yaml = r#"
endpoints:
  - name: x
    method: FETCH
"#;
        assert!(matches!(parse_contract(yaml), Err(Error::ContractParse(_))));
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            parse_path("/pets/{id}/toys/:toy"),
            vec![
                PathSegment::Static { value: "pets".into() },
                PathSegment::Param { name: "id".into() },
                PathSegment::Static { value: "toys".into() },
                PathSegment::Param { name: "toy".into() },
            ]
        );
        assert!(parse_path("/").is_empty());
        assert!(parse_path("").is_empty());
    }

    #[test]
    fn test_load_contract_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("pets.contract.yaml");
        std::fs::write(&yaml_path, PETS.replace("name: pets\n", "")).unwrap();
        let contract = load_contract(&yaml_path).unwrap();
        assert_eq!(contract.name.as_deref(), Some("pets"));

        let json_path = dir.path().join("pets.json");
        std::fs::write(&json_path, contract.to_json().unwrap()).unwrap();
        let reloaded = load_contract(&json_path).unwrap();
        assert_eq!(reloaded, contract);
    }
}

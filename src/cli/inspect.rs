//! Contract checking and IR output

use super::util::write_output;
use contractc::schema::integrity::IntegrityIssue;
use contractc::{load_contract, Error, Result};
use serde::Serialize;
use std::path::Path;

/// Result of `contractc check`
#[derive(Debug, Serialize)]
struct CheckReport {
    contract: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
    types: usize,
    endpoints: usize,
    issues: Vec<String>,
}

impl CheckReport {
    fn to_report(&self) -> String {
        if self.passed {
            format!(
                "✓ {}: {} types, {} endpoints ({})",
                self.contract,
                self.types,
                self.endpoints,
                self.hash.as_deref().unwrap_or_default()
            )
        } else {
            let mut out = format!("✗ {}: {} problem(s)", self.contract, self.issues.len());
            for issue in &self.issues {
                out.push_str("\n  - ");
                out.push_str(issue);
            }
            out
        }
    }

    fn with_issue(mut self, issue: String) -> Self {
        self.issues.push(issue);
        self
    }
}

/// Load a contract and report whether it passes extraction and integrity checks
pub fn cmd_check(path: &Path, json: bool) -> Result<()> {
    let label = path.display().to_string();
    let report = match load_contract(path) {
        Ok(contract) => CheckReport {
            contract: label,
            passed: true,
            hash: Some(contract.hash()),
            types: contract.types.len(),
            endpoints: contract.endpoints.len(),
            issues: Vec::new(),
        },
        Err(Error::ContractIntegrity(issues)) => failed(label, &issues),
        Err(other) => failed(label, &[]).with_issue(other.to_string()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_report());
    }

    if report.passed {
        Ok(())
    } else {
        Err("Contract check failed".into())
    }
}

fn failed(contract: String, issues: &[IntegrityIssue]) -> CheckReport {
    CheckReport {
        contract,
        passed: false,
        hash: None,
        types: 0,
        endpoints: 0,
        issues: issues.iter().map(|i| i.to_string()).collect(),
    }
}

/// Print the contract IR as JSON or YAML
pub fn cmd_ir(path: &Path, yaml: bool, output: Option<&Path>) -> Result<()> {
    let contract = load_contract(path)?;
    let content = if yaml {
        contract.to_yaml()?
    } else {
        contract.to_json()?
    };
    write_output(output, &content)
}

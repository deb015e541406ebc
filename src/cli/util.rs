//! CLI utility helpers

use contractc::{Error, Result};
use std::fs;
use std::path::Path;

/// Write content to file or stdout
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(Error::Io)?;
            }
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Contract name used for output files: its declared name, else the file stem
pub fn unit_name(contract: &contractc::Contract, path: &Path) -> String {
    contract
        .name
        .clone()
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "contract".to_string())
}

//! Validator unit generation

use super::util::{unit_name, write_output};
use crate::GenerateArgs;
use contractc::{load_contract, render_unit, Config, Error, Result, UnitOptions};
use tracing::info;

/// Generate one unit per target. Every unit is rendered before any is written.
pub fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&std::env::current_dir().map_err(Error::Io)?)?,
    };

    let contract = load_contract(&args.contract)?;
    let name = unit_name(&contract, &args.contract);

    let targets = if args.targets.is_empty() {
        config.targets.clone()
    } else {
        args.targets.clone()
    };
    let options = UnitOptions {
        provenance: config.provenance && !args.no_provenance,
        types: config.typescript.types && !args.no_types,
        format: config.rust.format && !args.no_format,
        source: args.contract.display().to_string(),
        template_dir: args
            .template_dir
            .clone()
            .or_else(|| config.template_dir.clone()),
    };

    let units = targets
        .iter()
        .map(|&target| Ok((target, render_unit(&contract, target, &options)?)))
        .collect::<Result<Vec<_>>>()?;

    for (target, unit) in units {
        if args.stdout {
            write_output(None, &unit)?;
            continue;
        }
        let file_name = config.file_name(&name, target);
        let path = match &args.out_dir {
            Some(dir) => dir.join(file_name),
            None => config.out_dir.join(file_name),
        };
        write_output(Some(&path), &unit)?;
        info!(path = %path.display(), target_lang = %target, "wrote validator unit");
    }
    Ok(())
}

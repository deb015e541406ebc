//! Template-based unit generation
//!
//! Uses MiniJinja templates to lay out a complete validator unit: provenance
//! header, imports, type aliases and declarations. Templates are embedded by
//! default, with optional override via:
//! - `--template-dir` CLI flag
//! - `contractc.yaml`: `template_dir`
//!
//! An override directory mirrors the embedded layout
//! (`validators/typescript.jinja`, `validators/rust.jinja`); missing files
//! fall back to the embedded version.

pub mod context;

use minijinja::{AutoEscape, Environment};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::emit::emit;
use crate::format::format_code;
use crate::model::Contract;
use crate::render::typedefs::type_aliases;
use crate::render::Target;
use context::UnitContext;

// Embedded templates (compiled into binary)
mod embedded {
    pub const TYPESCRIPT: &str = include_str!("../../templates/validators/typescript.jinja");
    pub const RUST: &str = include_str!("../../templates/validators/rust.jinja");
}

/// Import line every Rust unit starts with
const RUST_PRELUDE: &str = "use serde_json::Value;";

/// Template engine singleton
static ENGINE: OnceLock<Result<Environment<'static>, TemplateError>> = OnceLock::new();

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

/// Initialize the template engine with embedded templates
fn init_engine() -> Result<Environment<'static>, TemplateError> {
    let mut env = base_environment();
    for target in Target::ALL {
        env.add_template(template_name(target), embedded_source(target))
            .map_err(|e| TemplateError::ParseError(target.to_string(), e.to_string()))?;
    }
    Ok(env)
}

/// Get the global template engine
pub fn engine() -> Result<&'static Environment<'static>, TemplateError> {
    ENGINE.get_or_init(init_engine).as_ref().map_err(Clone::clone)
}

/// Create a new template engine with custom template directory
/// Templates in custom_dir override embedded templates
pub fn engine_with_override(custom_dir: &Path) -> Result<Environment<'static>, TemplateError> {
    let mut env = init_engine()?;
    load_custom_templates(&mut env, custom_dir)?;
    Ok(env)
}

/// Load custom templates from a directory
fn load_custom_templates(env: &mut Environment<'static>, dir: &Path) -> Result<(), TemplateError> {
    for target in Target::ALL {
        let path = dir.join(template_name(target));
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TemplateError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        env.add_template_owned(template_name(target).to_string(), content)
            .map_err(|e| TemplateError::ParseError(target.to_string(), e.to_string()))?;
        debug!(path = %path.display(), target_lang = %target, "loaded template override");
    }
    Ok(())
}

/// Get the template name for a target language
pub fn template_name(target: Target) -> &'static str {
    match target {
        Target::TypeScript => "validators/typescript.jinja",
        Target::Rust => "validators/rust.jinja",
    }
}

fn embedded_source(target: Target) -> &'static str {
    match target {
        Target::TypeScript => embedded::TYPESCRIPT,
        Target::Rust => embedded::RUST,
    }
}

/// Options controlling a rendered unit
#[derive(Debug, Clone)]
pub struct UnitOptions {
    /// Emit the provenance header
    pub provenance: bool,
    /// Emit `export type` aliases (TypeScript)
    pub types: bool,
    /// Pretty-print the unit (Rust)
    pub format: bool,
    /// Label recorded in the provenance header
    pub source: String,
    /// Directory with template overrides
    pub template_dir: Option<PathBuf>,
}

impl Default for UnitOptions {
    fn default() -> Self {
        Self {
            provenance: true,
            types: true,
            format: true,
            source: "contract".to_string(),
            template_dir: None,
        }
    }
}

/// Render a complete validator unit for one target
pub fn render_unit(
    contract: &Contract,
    target: Target,
    options: &UnitOptions,
) -> crate::Result<String> {
    let declarations = emit(contract, target)?;
    let joined = declarations
        .iter()
        .map(|d| d.source.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let body = match target {
        Target::TypeScript => joined,
        Target::Rust => {
            let code = if joined.is_empty() {
                RUST_PRELUDE.to_string()
            } else {
                format!("{}\n\n{}", RUST_PRELUDE, joined)
            };
            if options.format {
                match format_code(&code, target) {
                    Ok(formatted) => formatted.trim_end().to_string(),
                    Err(e) => {
                        warn!(error = %e, "formatting failed, keeping unformatted output");
                        code
                    }
                }
            } else {
                code
            }
        }
    };

    let mut ctx = UnitContext::new(
        contract,
        target,
        &options.source,
        options.provenance,
        declarations,
        body,
    );
    if target == Target::TypeScript && options.types {
        ctx = ctx.with_type_aliases(type_aliases(contract)?);
    }

    let count = ctx.declarations.len();
    let rendered = match &options.template_dir {
        Some(dir) => render_with(&engine_with_override(dir)?, target, &ctx)?,
        None => render_with(engine()?, target, &ctx)?,
    };
    info!(
        target_lang = %target,
        declarations = count,
        bytes = rendered.len(),
        "rendered validator unit"
    );
    Ok(rendered)
}

fn render_with(
    env: &Environment<'_>,
    target: Target,
    ctx: &UnitContext,
) -> Result<String, TemplateError> {
    let template = env
        .get_template(template_name(target))
        .map_err(|e| TemplateError::TemplateNotFound(e.to_string()))?;
    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Template errors
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// Template not found
    TemplateNotFound(String),
    /// Template parse error
    ParseError(String, String),
    /// Template render error
    RenderError(String),
    /// IO error loading custom templates
    IoError(String),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::TemplateNotFound(msg) => write!(f, "Template not found: {}", msg),
            TemplateError::ParseError(lang, msg) => {
                write!(f, "Template parse error for {}: {}", lang, msg)
            }
            TemplateError::RenderError(msg) => write!(f, "Template render error: {}", msg),
            TemplateError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<TemplateError> for crate::Error {
    fn from(e: TemplateError) -> Self {
        crate::Error::Template(e.to_string())
    }
}

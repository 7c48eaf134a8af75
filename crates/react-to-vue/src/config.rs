//! Configuration loading and option resolution.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use serde::Deserialize;
use std::fs;
use thiserror::Error;
use tracing::debug;
use vue_transformer::TransformOptions;

/// The project configuration file, looked up from the input's directory
/// upwards.
pub const CONFIG_FILE: &str = ".react-to-vue.json";

/// Project-wide defaults. Unset fields fall back to inference.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    pub ts: Option<bool>,
    pub flow: Option<bool>,
    pub fail_on_caveats: Option<bool>,
}

/// A configuration file that could not be used.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    #[diagnostic(code(react_to_vue::config::io))]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    #[diagnostic(
        code(react_to_vue::config::json),
        help("expected an object with optional `ts`, `flow` and `failOnCaveats` booleans")
    )]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ProjectConfig {
    /// Finds and loads the nearest configuration file at or above `dir`.
    pub fn discover(dir: &Utf8Path) -> Result<Option<(Utf8PathBuf, Self)>, ConfigError> {
        for ancestor in dir.ancestors() {
            let candidate = ancestor.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                debug!(path = %candidate, ?config, "loaded configuration");
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }

    /// Loads a configuration file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })
    }
}

/// Options after flags, configuration and inference are combined.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedOptions {
    pub transform: TransformOptions,
    pub fail_on_caveats: bool,
}

/// Combines, in order of precedence, command-line flags, the project
/// configuration and what the input itself suggests.
pub fn resolve(args: &Args, config: &ProjectConfig, source: &str) -> ResolvedOptions {
    let ts = args.ts || config.ts.unwrap_or_else(|| is_typescript_path(&args.input));
    let flow = args.flow || config.flow.unwrap_or_else(|| has_flow_pragma(source));
    ResolvedOptions {
        transform: TransformOptions { ts, flow },
        fail_on_caveats: args.fail_on_caveats || config.fail_on_caveats.unwrap_or(false),
    }
}

/// Returns true for `.ts` and `.tsx` files.
pub fn is_typescript_path(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("ts" | "tsx"))
}

/// Returns true if the comments heading the file carry an `@flow` pragma.
pub fn has_flow_pragma(source: &str) -> bool {
    let mut in_block = false;
    for line in source.trim_start_matches('\u{feff}').lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let is_comment = in_block || line.starts_with("//") || line.starts_with("/*");
        if !is_comment {
            return false;
        }
        if line.contains("@flow") {
            return true;
        }
        if line.starts_with("/*") || in_block {
            in_block = !line.contains("*/");
        }
    }
    false
}

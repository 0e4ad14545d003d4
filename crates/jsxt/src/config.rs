//! Layered option loading: defaults, then a TOML file, then command line overrides.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::Serialize;

use crate::error::ConfigError;
use crate::options::CompilerOptions;

/// Read from the working directory when no file is named explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "jsxt.toml";

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Clone, Debug, Default, Serialize, clap::Args)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    /// Directory the embedded toolchain is extracted into
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_module_extract_path: Option<PathBuf>,

    /// Source path for transforming JSX
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,

    /// Target path for transformed files
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,

    /// Source encoding
    #[arg(long = "source-charset", value_name = "CHARSET")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_char_set: Option<String>,

    /// Output encoding
    #[arg(long = "target-charset", value_name = "CHARSET")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_char_set: Option<String>,

    /// Target ECMAScript version
    #[arg(long = "target", value_name = "VERSION")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ecma_script_version: Option<String>,

    /// Strip annotation types (`--strip-types=false` turns a configured value off)
    #[arg(
        long = "strip-types",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_annotation_types: Option<bool>,

    /// Rewrite all module identifiers to be relative (`--relative=false` turns a configured value off)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative: Option<bool>,

    /// Scan modules for required dependencies (`--follow-requires=false` turns a configured value off)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_requires: Option<bool>,

    /// File extension to scan for
    #[arg(long, value_name = "EXT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Module id to transform; repeatable
    #[arg(long = "module-id", value_name = "ID")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub module_ids: Vec<String>,

    /// Program that launches the entry point ("" runs it directly)
    #[arg(long, value_name = "PROGRAM")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Archive carrying the toolchain instead of this executable
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain_archive: Option<PathBuf>,
}

/// Merge the layers and anchor relative paths at `base`.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load(
    config_file: Option<&Path>,
    overrides: &Overrides,
    base: &Path,
) -> Result<CompilerOptions, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(CompilerOptions::default()));

    figment = match config_file {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            tracing::debug!(path = %path.display(), "loading configuration file");
            figment.merge(Toml::file(path))
        }
        None => figment.merge(Toml::file(base.join(DEFAULT_CONFIG_FILE))),
    };

    let options: CompilerOptions = figment
        .merge(Serialized::defaults(overrides))
        .extract()?;

    options.anchored_at(base)
}

/// [`load`] anchored at the process working directory.
pub fn load_from_cwd(
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<CompilerOptions, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
    load(config_file, overrides, &cwd)
}

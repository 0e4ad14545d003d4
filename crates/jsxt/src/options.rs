use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options of one transformer invocation.
///
/// Keys use the camelCase names of the configuration surface
/// (`sourceCharSet`, `targetEcmaScriptVersion`, ...). Missing keys take the
/// [`Default`] values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Directory the toolchain is extracted into; also the child's working directory.
    pub node_module_extract_path: PathBuf,
    pub source_path: String,
    pub target_path: String,
    pub source_char_set: String,
    pub target_char_set: String,
    pub target_ecma_script_version: String,
    pub strip_annotation_types: bool,
    /// Rewrite module identifiers to be relative.
    pub relative: bool,
    /// Scan modules for required dependencies.
    pub follow_requires: bool,
    /// File extension to scan for, without the dot.
    pub extension: String,
    pub module_ids: Vec<String>,
    /// Transformer entry point, relative to the extract path.
    pub entry_point: PathBuf,
    /// Program that launches the entry point. Empty runs the entry point directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
    /// Archive carrying the toolchain. Defaults to the running executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain_archive: Option<PathBuf>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            node_module_extract_path: PathBuf::from("target/react-jsxtransformer"),
            source_path: String::new(),
            target_path: String::new(),
            source_char_set: "utf8".to_string(),
            target_char_set: "utf8".to_string(),
            target_ecma_script_version: "es5".to_string(),
            strip_annotation_types: false,
            relative: false,
            follow_requires: false,
            extension: "js".to_string(),
            module_ids: Vec::new(),
            entry_point: Path::new("react-tools").join("bin").join("jsx"),
            interpreter: Some("node".to_string()),
            toolchain_archive: None,
        }
    }
}

impl CompilerOptions {
    /// Check the invariants the transformer's argument grammar relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_path.is_empty() {
            return Err(ConfigError::Empty("sourcePath"));
        }
        if self.target_path.is_empty() {
            return Err(ConfigError::Empty("targetPath"));
        }
        if self.extension.is_empty() {
            return Err(ConfigError::Empty("extension"));
        }
        if self.node_module_extract_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty("nodeModuleExtractPath"));
        }
        if self.entry_point.as_os_str().is_empty() {
            return Err(ConfigError::Empty("entryPoint"));
        }
        Ok(())
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.interpreter.as_deref().filter(|program| !program.is_empty())
    }

    /// Location of the transformer entry point once the toolchain is extracted.
    pub fn entry_point_path(&self) -> PathBuf {
        self.node_module_extract_path.join(&self.entry_point)
    }

    /// Anchor relative directories at `base`.
    ///
    /// The transformer runs inside the extract path, so relative paths handed
    /// to it would otherwise resolve against the wrong directory.
    /// Fails when an anchored source or target path is not valid UTF-8.
    pub fn anchored_at(mut self, base: &Path) -> Result<Self, ConfigError> {
        if self.node_module_extract_path.is_relative() {
            self.node_module_extract_path = base.join(&self.node_module_extract_path);
        }
        for path in [&mut self.source_path, &mut self.target_path] {
            if !path.is_empty() && Path::new(path.as_str()).is_relative() {
                let anchored = base.join(path.as_str());
                *path = anchored
                    .to_str()
                    .ok_or_else(|| ConfigError::NonUtf8Path(anchored.clone()))?
                    .to_string();
            }
        }
        if let Some(archive) = self.toolchain_archive.as_mut() {
            if archive.is_relative() {
                *archive = base.join(&*archive);
            }
        }
        Ok(self)
    }
}

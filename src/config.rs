//! TOML configuration of a compiler run.
//!
//! ```toml
//! input = "raw_data.json"
//! output = "color_palettes.cpp"
//! families = ["ochRe"]        # or: all_families = true
//! variable = "color_palettes"
//!
//! [header]
//! namespace = "qualpal"
//! ```
//!
//! Relative paths are taken from the directory of the configuration
//! file.

use std::{fs, path::{Path, PathBuf}};
use serde::Deserialize;
use crate::{Error, Result,
            compile::{CompileOptions, FamilySelection}};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderConfig {
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub families: Option<Vec<String>>,
    #[serde(default)]
    pub all_families: bool,
    pub variable: Option<String>,
    pub header: Option<HeaderConfig>,
}

impl CompilerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(Error::io(path))?;
        let base = path.parent().unwrap_or(Path::new(""));
        Self::from_toml_str(&src, base).map_err(|reason| Error::Config {
            path: path.to_path_buf(), reason })
    }

    /// Parse `src`, resolving relative paths against `base`.
    fn from_toml_str(src: &str, base: &Path)
                     -> std::result::Result<Self, String> {
        let mut config: CompilerConfig = toml::from_str(src)
            .map_err(|e| e.to_string())?;
        if config.all_families && config.families.is_some() {
            return Err("`families` and `all_families` are mutually \
                        exclusive".to_string())
        }
        for p in [&mut config.input, &mut config.output].into_iter().flatten() {
            if p.is_relative() { *p = base.join(&*p) }
        }
        Ok(config)
    }

    /// The family selection, if the file makes one.
    pub fn selection(&self) -> Option<FamilySelection> {
        if self.all_families { return Some(FamilySelection::All) }
        self.families.clone().map(FamilySelection::Only)
    }

    /// Fold the emission settings of the file into `options`.
    pub fn apply(&self, mut options: CompileOptions) -> CompileOptions {
        if let Some(v) = &self.variable { options = options.variable(v) }
        if let Some(h) = &self.header { options = options.header(&h.namespace) }
        options
    }
}

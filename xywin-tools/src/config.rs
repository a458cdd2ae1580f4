use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_REPAIR_SH, DEFAULT_SAMBAMBA, DEFAULT_SAMTOOLS, DEFAULT_THREADS};
use crate::errors::ToolError;

///
/// Locations of the external programs and the thread count handed to them
///
/// Every field has a default (programs are looked up on `PATH`), so a TOML
/// file only needs the entries it changes:
///
/// ```toml
/// samtools = "/opt/samtools-1.19/bin/samtools"
/// threads = 8
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub samtools: PathBuf,
    pub sambamba: PathBuf,
    pub repair_sh: PathBuf,
    pub threads: usize,
}

impl Default for ToolPaths {
    fn default() -> Self {
        ToolPaths {
            samtools: PathBuf::from(DEFAULT_SAMTOOLS),
            sambamba: PathBuf::from(DEFAULT_SAMBAMBA),
            repair_sh: PathBuf::from(DEFAULT_REPAIR_SH),
            threads: DEFAULT_THREADS,
        }
    }
}

impl ToolPaths {
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ToolError> {
        let paths: ToolPaths = toml::from_str(contents).map_err(|e| ToolError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        if paths.threads == 0 {
            return Err(ToolError::Config {
                path: origin.to_string(),
                message: "threads must be at least 1".to_string(),
            });
        }

        Ok(paths)
    }

    pub fn from_file(path: &Path) -> Result<Self, ToolError> {
        let contents = read_to_string(path).map_err(|e| ToolError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Defaults, overridden by `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ToolError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Override the thread count; 0 is rejected as it is in the TOML file.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, ToolError> {
        if threads == 0 {
            return Err(ToolError::InvalidRequest(
                "threads must be at least 1".to_string(),
            ));
        }
        self.threads = threads;
        Ok(self)
    }
}

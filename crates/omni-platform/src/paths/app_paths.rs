use std::fs;
use std::path::{Path, PathBuf};

use omni_common::PlatformError;
use omni_config::state::{TABS_FILE, WINDOW_STATE_FILE};

use super::resolve::data_dir;

const PARTITIONS_DIR: &str = "partitions";

/// Locations under the data directory used at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Use `override_dir` when given (CLI `--data-dir`), else the platform
    /// data directory.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self, PlatformError> {
        let data_dir = match override_dir {
            Some(dir) => dir,
            None => data_dir()?,
        };
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Root for persistent storage partitions, one subdirectory each.
    pub fn partitions_dir(&self) -> PathBuf {
        self.data_dir.join(PARTITIONS_DIR)
    }

    pub fn window_state_file(&self) -> PathBuf {
        self.data_dir.join(WINDOW_STATE_FILE)
    }

    pub fn tabs_file(&self) -> PathBuf {
        self.data_dir.join(TABS_FILE)
    }

    pub fn ensure(&self) -> Result<(), PlatformError> {
        for dir in [self.data_dir.clone(), self.partitions_dir()] {
            fs::create_dir_all(&dir).map_err(|e| {
                PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
            })?;
        }
        tracing::debug!(data_dir = %self.data_dir.display(), "data directories ready");
        Ok(())
    }
}

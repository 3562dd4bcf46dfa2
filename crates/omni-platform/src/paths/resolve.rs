use std::path::PathBuf;

use omni_common::PlatformError;

pub(super) const APP_NAME: &str = "omni";

/// Platform data directory. Holds storage partitions and saved state.
///
/// - macOS: `~/Library/Application Support/omni`
/// - Linux: `$XDG_DATA_HOME/omni` (defaults to `~/.local/share/omni`)
/// - Windows: `%APPDATA%\omni`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}

/// Where downloads from AI tabs are saved. Falls back to the data
/// directory on systems without a downloads folder.
pub fn download_dir() -> Result<PathBuf, PlatformError> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => Ok(data_dir()?.join("downloads")),
    }
}

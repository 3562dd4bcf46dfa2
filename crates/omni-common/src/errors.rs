use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures reading or writing persisted state documents
/// (tab list, window geometry).
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state read error ({path}): {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("state write error ({path}): {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("state parse error ({path}): {reason}")]
    Parse { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("tab already exists: {0}")]
    AlreadyExists(String),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("unsupported by engine: {0}")]
    Unsupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OmniError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("window error: {0}")]
    Window(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, OmniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("layout.header_height".into());
        assert_eq!(
            err.to_string(),
            "config validation error: layout.header_height"
        );
    }

    #[test]
    fn state_error_display() {
        let err = StateError::Parse {
            path: PathBuf::from("/tmp/tabs.json"),
            reason: "expected value".into(),
        };
        assert_eq!(
            err.to_string(),
            "state parse error (/tmp/tabs.json): expected value"
        );
    }

    #[test]
    fn view_error_display() {
        let err = ViewError::AlreadyExists("chatgpt".into());
        assert_eq!(err.to_string(), "tab already exists: chatgpt");

        let err = ViewError::Unsupported("header interception".into());
        assert_eq!(err.to_string(), "unsupported by engine: header interception");
    }

    #[test]
    fn omni_error_from_config() {
        let err: OmniError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, OmniError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn omni_error_from_view() {
        let err: OmniError = ViewError::Engine("webview gone".into()).into();
        assert!(matches!(err, OmniError::View(_)));
        assert!(err.to_string().contains("webview gone"));
    }

    #[test]
    fn omni_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: OmniError = io_err.into();
        assert!(matches!(err, OmniError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn omni_error_other_variants() {
        let err = OmniError::Window("no display".into());
        assert_eq!(err.to_string(), "window error: no display");

        let err = OmniError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}

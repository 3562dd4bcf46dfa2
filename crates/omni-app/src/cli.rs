use std::path::PathBuf;

use clap::Parser;

/// Omni: several AI chat services side by side in one window.
#[derive(Parser, Debug)]
#[command(name = "omni", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Data directory override (storage partitions, tab list, window state).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`, `omni_views=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start with no tabs instead of restoring the previous session.
    #[arg(long)]
    pub fresh: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags() {
        let args = Args::try_parse_from(["omni"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.data_dir.is_none());
        assert!(!args.fresh);
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "omni",
            "--config",
            "/tmp/omni.toml",
            "--data-dir",
            "/tmp/omni-data",
            "--log-level",
            "debug",
            "--fresh",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/omni.toml")));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/omni-data")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.fresh);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["omni", "--execute", "ls"]).is_err());
    }
}

mod app_paths;
mod resolve;

pub use app_paths::AppPaths;
pub use resolve::{crash_report_dir, data_dir, download_dir, log_dir};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_omni() {
        let path = data_dir().unwrap();
        assert!(path.ends_with("omni"), "got: {path:?}");
    }

    #[test]
    fn crash_reports_live_under_logs() {
        let crash = crash_report_dir().unwrap();
        let logs = log_dir().unwrap();
        assert!(crash.starts_with(&logs));
        assert_eq!(crash.file_name().unwrap(), "crash-reports");
    }

    #[test]
    fn download_dir_resolves() {
        assert!(download_dir().is_ok());
    }
}

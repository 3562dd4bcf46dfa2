pub mod crash_report;
pub mod paths;

pub use paths::{crash_report_dir, data_dir, download_dir, log_dir, AppPaths};

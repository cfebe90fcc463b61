//! Outside-world adapters for the estate assistant: the HTTP client for the
//! analytics service, configuration loading and the report file sink.

pub mod analytics_client;
pub mod config;
pub mod paths;
pub mod report_store;

pub use analytics_client::AnalyticsClient;
pub use config::{ConfigOverrides, load_client_config};
pub use paths::EstatePaths;
pub use report_store::DirectoryReportSink;

//! CSV report downloads.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::analytics::{AnalyticsApi, DownloadRequest};
use crate::error::Result;

/// File name used when no area is in context.
pub const FULL_REPORT_FILENAME: &str = "Real_Estate_Full_Report.csv";

/// Alert shown when a download does not complete.
pub const DOWNLOAD_ALERT: &str = "Failed to download data.";

/// Destination for downloaded report bytes.
pub trait ReportSink: Send + Sync {
    /// Stores `bytes` under `filename` and returns where they ended up.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Result of a download action. Failures are already reduced to the alert text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, bytes: usize },
    Failed { alert: String },
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Client-side file name for a report covering `areas`.
///
/// `Report_Wakad_Aundh.csv` for areas in context, otherwise
/// [`FULL_REPORT_FILENAME`].
pub fn report_filename(areas: &[String]) -> String {
    if areas.is_empty() {
        FULL_REPORT_FILENAME.to_string()
    } else {
        format!("Report_{}.csv", areas.join("_"))
    }
}

/// Downloads the report for `request.areas` and hands it to `sink`.
///
/// Never returns an error: both transport and save failures become
/// [`DownloadOutcome::Failed`].
pub async fn download_report(
    api: &dyn AnalyticsApi,
    sink: &dyn ReportSink,
    request: DownloadRequest,
) -> DownloadOutcome {
    let filename = report_filename(&request.areas);

    let saved = match api.download(&request).await {
        Ok(bytes) => sink.save(&filename, &bytes).map(|path| (path, bytes.len())),
        Err(err) => Err(err),
    };

    match saved {
        Ok((path, bytes)) => {
            info!(file = %path.display(), bytes, "Report saved");
            DownloadOutcome::Saved { path, bytes }
        }
        Err(err) => {
            warn!(error = %err, areas = ?request.areas, "Download failed");
            DownloadOutcome::Failed {
                alert: DOWNLOAD_ALERT.to_string(),
            }
        }
    }
}

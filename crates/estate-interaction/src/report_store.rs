//! Filesystem destination for downloaded reports.

use std::fs;
use std::path::PathBuf;

use estate_core::EstateError;
use estate_core::error::Result;
use estate_core::report::ReportSink;

/// Writes reports into a directory, replacing any file of the same name.
#[derive(Debug, Clone)]
pub struct DirectoryReportSink {
    dir: PathBuf,
}

impl DirectoryReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl ReportSink for DirectoryReportSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        // Area names come from the server; never let them leave the directory.
        if filename.contains(['/', '\\']) || filename == ".." {
            return Err(EstateError::io(format!("Refusing to write report named '{filename}'")));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

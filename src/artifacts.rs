//! Screenshot artifact management.
//!
//! Artifacts live in one flat directory, one PNG per check that opts into
//! capture, named by check identity. Files are overwritten on each run; there
//! is no versioning and nothing ever reads them back.

use std::fs;
use std::io;
use std::path::PathBuf;

/// A flat directory of screenshot artifacts for one run
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Directory the screenshots are written into
    pub dir: PathBuf,
}

impl ArtifactStore {
    /// Create the store, making the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path for a check's screenshot
    pub fn screenshot_path(&self, check_name: &str) -> PathBuf {
        self.dir.join(format!("{}.png", sanitize_name(check_name)))
    }

    /// Write a screenshot for the given check, returning the file path
    pub fn write(&self, check_name: &str, png_bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.screenshot_path(check_name);
        fs::write(&path, png_bytes)?;
        Ok(path)
    }

}

/// Sanitize a check name for use in filenames
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

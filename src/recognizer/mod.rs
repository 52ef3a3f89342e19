pub mod seshat;

pub use seshat::SeshatBridge;

use std::path::PathBuf;

use crate::core::error::Result;
use crate::core::model::Fragment;

/// Boundary to the external recognizer.
///
/// Implementations take one staged fragment, run recognition and return the
/// raw text report. The full structured artifact is retrievable afterwards
/// from a location addressed by the fragment's line number.
pub trait Recognizer {
    /// Directory where fragments must be staged before recognition.
    fn staging_dir(&self) -> PathBuf;

    /// Runs recognition for one fragment and returns the raw report.
    fn recognize(&self, fragment: &Fragment) -> Result<String>;

    /// Location of the stored structured artifact for one line number.
    fn artifact_path(&self, line_number: usize) -> PathBuf;
}

//! Bridge to the seshat recognizer binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::core::error::{InklineError, Result};
use crate::core::model::Fragment;
use crate::recognizer::Recognizer;

/// Invokes the seshat binary once per fragment.
///
/// The binary reads `temp/temp{n}.inkml` under the work dir and stores its
/// structured artifact at `out/out{n}.inkml`; the recognized expression is
/// reported on stdout. Any stderr output is a fatal diagnostic for that
/// fragment.
#[derive(Debug, Clone)]
pub struct SeshatBridge {
    work_dir: PathBuf,
    binary: PathBuf,
    config: PathBuf,
}

impl SeshatBridge {
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            binary: PathBuf::from("./seshat"),
            config: PathBuf::from("Config/CONFIG"),
        }
    }

    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_config(mut self, config: PathBuf) -> Self {
        self.config = config;
        self
    }

    fn output_dir(&self) -> PathBuf {
        self.work_dir.join("out")
    }

    fn input_path(&self, line_number: usize) -> PathBuf {
        Path::new("temp").join(format!("temp{line_number}.inkml"))
    }
}

impl Recognizer for SeshatBridge {
    fn staging_dir(&self) -> PathBuf {
        self.work_dir.join("temp")
    }

    fn recognize(&self, fragment: &Fragment) -> Result<String> {
        fs::create_dir_all(self.output_dir())?;

        // Paths are relative to the work dir, matching the binary's own
        // config-relative file handling.
        let input = self.input_path(fragment.line_number);
        let output = Path::new("out").join(format!("out{}.inkml", fragment.line_number));

        debug!(line = fragment.line_number, "invoking recognizer");
        let result = Command::new(&self.binary)
            .current_dir(&self.work_dir)
            .arg("-c")
            .arg(&self.config)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("-r")
            .arg("render.pgm")
            .arg("-d")
            .arg("out.dot")
            .output()?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !result.status.success() || !stderr.trim().is_empty() {
            return Err(InklineError::RecognizerDiagnostic {
                fragment: fragment.line_number,
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&result.stdout).into_owned())
    }

    fn artifact_path(&self, line_number: usize) -> PathBuf {
        self.output_dir().join(format!("out{line_number}.inkml"))
    }
}

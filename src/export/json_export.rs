use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::RequestOutput;
use crate::export::Exporter;

/// Writes the canonical results as `results.json`.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, output: &RequestOutput) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("results.json");
        let data = serde_json::to_string_pretty(&output.results)?;
        fs::write(path, data)?;
        Ok(())
    }
}

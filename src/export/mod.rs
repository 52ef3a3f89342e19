pub mod inkml_export;
pub mod json_export;

pub use inkml_export::InkmlExporter;
pub use json_export::JsonExporter;

use anyhow::Result;

use crate::core::model::RequestOutput;

pub trait Exporter {
    fn export(&self, output: &RequestOutput) -> Result<()>;
}

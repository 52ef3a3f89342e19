//! Serialization of the unified document as a single ink file.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::{RequestOutput, UnifiedDocument};
use crate::export::Exporter;
use crate::ink::INKML_NS;

const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";

/// Persists the merged document at the request's fixed output location,
/// `outFinal.inkml` inside the exporter's directory.
#[derive(Debug, Clone)]
pub struct InkmlExporter {
    out_dir: PathBuf,
}

impl InkmlExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

/// Renders the unified document: the annotation block first with each math
/// markup tagged by its role, then the combined stroke list, then the
/// combined symbol-group table.
pub fn render_inkml(document: &UnifiedDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<ink xmlns=\"{INKML_NS}\">");
    let _ = writeln!(out, "<annotation type=\"UI\"></annotation>");
    let _ = writeln!(
        out,
        "<annotationXML type=\"truth\" encoding=\"Content-MathML\">"
    );
    for tagged in &document.markup {
        let _ = writeln!(
            out,
            "<math xmlns=\"{MATHML_NS}\" data-type=\"{}\">{}</math>",
            tagged.role.tag(),
            tagged.math
        );
    }
    let _ = writeln!(out, "</annotationXML>");

    for stroke in &document.strokes {
        let _ = writeln!(
            out,
            "<trace id=\"{}\">{}</trace>",
            stroke.id, stroke.coordinates
        );
    }

    for group in &document.symbol_groups {
        let _ = writeln!(out, "<traceGroup xml:id=\"{}\">", group.id);
        let _ = writeln!(
            out,
            "<annotation type=\"truth\">{}</annotation>",
            group.symbol
        );
        for stroke_ref in &group.stroke_refs {
            let _ = writeln!(out, "<traceView traceDataRef=\"{stroke_ref}\"/>");
        }
        let _ = writeln!(out, "</traceGroup>");
    }

    out.push_str("</ink>");
    out
}

impl Exporter for InkmlExporter {
    fn export(&self, output: &RequestOutput) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("outFinal.inkml");
        fs::write(path, render_inkml(&output.document))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::model::{Role, Stroke, SymbolGroup, TaggedMarkup};

    fn document() -> UnifiedDocument {
        UnifiedDocument {
            strokes: vec![
                Stroke {
                    id: "1".into(),
                    coordinates: "0 0, 1 1".into(),
                },
                Stroke {
                    id: "2".into(),
                    coordinates: "2 2".into(),
                },
            ],
            symbol_groups: vec![SymbolGroup {
                id: "1".into(),
                stroke_refs: vec!["1".into(), "2".into()],
                symbol: "x".into(),
            }],
            markup: vec![
                TaggedMarkup {
                    role: Role::Expression,
                    math: "<mi>x</mi>".into(),
                },
                TaggedMarkup {
                    role: Role::Hint,
                    math: "<mi>h</mi>".into(),
                },
            ],
        }
    }

    #[test]
    fn renders_tagged_markup_traces_and_groups() {
        let inkml = render_inkml(&document());

        assert!(inkml.starts_with("<ink xmlns=\"http://www.w3.org/2003/InkML\">"));
        assert!(inkml.contains("data-type=\"exp\"><mi>x</mi></math>"));
        assert!(inkml.contains("data-type=\"hint\"><mi>h</mi></math>"));
        assert!(inkml.contains("<trace id=\"1\">0 0, 1 1</trace>"));
        assert!(inkml.contains("<traceGroup xml:id=\"1\">"));
        assert!(inkml.contains("<annotation type=\"truth\">x</annotation>"));
        assert!(inkml.contains("<traceView traceDataRef=\"2\"/>"));
        assert!(inkml.ends_with("</ink>"));
    }

    #[test]
    fn rendered_document_is_well_formed_xml() {
        let inkml = render_inkml(&document());
        roxmltree::Document::parse(&inkml).unwrap();
    }
}

//! Parsing of stored recognition artifacts.

use std::sync::OnceLock;

use regex::Regex;
use roxmltree::{Document, Node};

use crate::core::error::{InklineError, Result};
use crate::core::model::{RecognitionArtifact, Stroke, SymbolGroup};

/// The structural markup block is carried verbatim, so it is captured from
/// the raw text rather than re-serialized from the parsed tree.
fn math_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<math[^>]*>(.*?)</math>").expect("math block pattern"))
}

/// Extracts one artifact's strokes, math markup and symbol-group table from
/// its stored ink document.
///
/// The recognizer writes strokes as top-level `trace` elements, the
/// recognized structure as a `math` block, and symbols as `traceGroup`
/// elements nested inside one wrapper `traceGroup`: each symbol references
/// its strokes via `traceView traceDataRef` attributes and its identity via
/// the `annotationXML href` attribute. A missing stroke list, wrapper table
/// or math block fails with `MissingStructure`.
pub fn parse_artifact(line_number: usize, xml: &str) -> Result<RecognitionArtifact> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let strokes: Vec<Stroke> = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "trace")
        .map(|node| Stroke {
            id: attr(&node, "id").unwrap_or_default().to_string(),
            coordinates: node.text().unwrap_or("").replace('\n', ""),
        })
        .collect();

    if strokes.is_empty() {
        return Err(missing(line_number, "stroke list"));
    }

    let math_markup = math_block()
        .captures(xml)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| missing(line_number, "math block"))?;

    let table = root
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == "traceGroup")
        .ok_or_else(|| missing(line_number, "traceGroup table"))?;

    let symbol_groups = table
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "traceGroup")
        .map(|group| parse_symbol_group(line_number, &group))
        .collect::<Result<Vec<_>>>()?;

    Ok(RecognitionArtifact {
        line_number,
        strokes,
        math_markup,
        symbol_groups,
    })
}

fn parse_symbol_group(line_number: usize, group: &Node) -> Result<SymbolGroup> {
    let id = attr(group, "id")
        .ok_or_else(|| missing(line_number, "traceGroup id"))?
        .to_string();

    let stroke_refs = group
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "traceView")
        .map(|view| {
            attr(&view, "traceDataRef")
                .map(str::to_string)
                .ok_or_else(|| missing(line_number, "traceView reference"))
        })
        .collect::<Result<Vec<_>>>()?;

    let symbol = group
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == "annotationXML")
        .and_then(|node| attr(&node, "href").map(str::to_string))
        .ok_or_else(|| missing(line_number, "symbol annotation"))?;

    Ok(SymbolGroup {
        id,
        stroke_refs,
        symbol,
    })
}

/// Attribute lookup by local name, so `xml:id` and plain `id` both resolve.
fn attr<'n>(node: &'n Node<'_, '_>, name: &str) -> Option<&'n str> {
    node.attributes()
        .find(|a| a.name() == name)
        .map(|a| a.value())
}

fn missing(line: usize, what: &str) -> InklineError {
    InklineError::MissingStructure {
        line,
        what: what.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_artifact_xml() -> &'static str {
        r#"<ink xmlns="http://www.w3.org/2003/InkML">
<annotationXML type="truth" encoding="Content-MathML">
<math xmlns="http://www.w3.org/1998/Math/MathML">
<mrow><mi xml:id="A">x</mi><mo xml:id="B">+</mo></mrow>
</math>
</annotationXML>
<trace id="1">10 20, 30 40</trace>
<trace id="2">50 60,
70 80</trace>
<traceGroup xml:id="G0">
<traceGroup xml:id="7">
<annotation type="truth">x</annotation>
<annotationXML href="A"/>
<traceView traceDataRef="1"/>
</traceGroup>
<traceGroup xml:id="8">
<annotation type="truth">+</annotation>
<annotationXML href="B"/>
<traceView traceDataRef="1"/>
<traceView traceDataRef="2"/>
</traceGroup>
</traceGroup>
</ink>"#
    }

    #[test]
    fn parses_strokes_math_and_groups() {
        let artifact = parse_artifact(0, sample_artifact_xml()).unwrap();

        assert_eq!(artifact.strokes.len(), 2);
        assert_eq!(artifact.strokes[0].id, "1");
        assert_eq!(artifact.strokes[0].coordinates, "10 20, 30 40");
        // Newlines inside coordinate text are stripped.
        assert_eq!(artifact.strokes[1].coordinates, "50 60,70 80");

        assert!(artifact.math_markup.contains("<mrow>"));

        assert_eq!(artifact.symbol_groups.len(), 2);
        assert_eq!(artifact.symbol_groups[0].id, "7");
        assert_eq!(artifact.symbol_groups[0].symbol, "A");
        assert_eq!(artifact.symbol_groups[0].stroke_refs, vec!["1"]);
        assert_eq!(artifact.symbol_groups[1].stroke_refs, vec!["1", "2"]);
    }

    #[test]
    fn missing_strokes_fail() {
        let xml = r#"<ink><traceGroup xml:id="G0"></traceGroup></ink>"#;
        let err = parse_artifact(4, xml).unwrap_err();
        assert!(matches!(
            err,
            InklineError::MissingStructure { line: 4, .. }
        ));
    }

    #[test]
    fn missing_group_table_fails() {
        let xml = concat!(
            "<ink><math a=\"b\">x</math>",
            "<trace id=\"1\">1 2</trace></ink>"
        );
        let err = parse_artifact(2, xml).unwrap_err();
        match err {
            InklineError::MissingStructure { line, what } => {
                assert_eq!(line, 2);
                assert_eq!(what, "traceGroup table");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

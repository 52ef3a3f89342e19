//! Per-line fragment construction and staging.

use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::error::Result;
use crate::core::model::{Fragment, Point, SegmentedTrace};
use crate::ink::{INKML_NS, PAIR_SEPARATOR};

/// Groups segmented strokes by line number and serializes each group as a
/// standalone ink document ready for recognition.
///
/// Within a line, strokes are ordered by their original document index so
/// writing order survives the vertical sort. Fragments come out in ascending
/// line-number order.
pub fn build_fragments(mut traces: Vec<SegmentedTrace>) -> Vec<Fragment> {
    traces.sort_by(|a, b| {
        (a.line_number, a.index).cmp(&(b.line_number, b.index))
    });

    let mut groups: BTreeMap<usize, String> = BTreeMap::new();
    for trace in &traces {
        let body = groups.entry(trace.line_number).or_default();
        let _ = writeln!(
            body,
            "<trace id=\"{}\">{}</trace>",
            trace.index,
            coordinate_text(&trace.coords)
        );
    }

    groups
        .into_iter()
        .map(|(line_number, body)| Fragment {
            line_number,
            inkml: format!("<ink xmlns=\"{INKML_NS}\">\n{body}</ink>"),
        })
        .collect()
}

/// Inverse of coordinate extraction: pairs joined by the fixed separator.
pub fn coordinate_text(coords: &[Point]) -> String {
    coords
        .iter()
        .map(|(x, y)| format!("{x} {y}"))
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

/// Writes each fragment as `temp{n}.inkml` into the staging directory and
/// returns the line numbers used as submission identifiers.
pub fn write_fragments(fragments: &[Fragment], staging_dir: &Path) -> Result<Vec<usize>> {
    fs::create_dir_all(staging_dir)?;

    let mut line_numbers = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let path = staging_dir.join(format!("temp{}.inkml", fragment.line_number));
        fs::write(&path, &fragment.inkml)?;
        debug!(line = fragment.line_number, path = %path.display(), "staged fragment");
        line_numbers.push(fragment.line_number);
    }
    Ok(line_numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::ink::extract::extract_traces;
    use crate::ink::segment::assign_line_numbers;

    fn trace(index: usize, line_number: usize, coords: Vec<Point>) -> SegmentedTrace {
        let mean_y = coords.iter().map(|&(_, y)| y).sum::<f64>() / coords.len() as f64;
        SegmentedTrace {
            index,
            mean_y,
            line_number,
            coords,
        }
    }

    #[test]
    fn one_fragment_per_line() {
        let traces = vec![
            trace(0, 0, vec![(1.0, 2.0)]),
            trace(1, 0, vec![(3.0, 4.0)]),
            trace(2, 1, vec![(5.0, 600.0)]),
        ];
        let fragments = build_fragments(traces);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].line_number, 0);
        assert_eq!(fragments[1].line_number, 1);
        assert!(fragments[0].inkml.contains("<trace id=\"0\">1 2</trace>"));
        assert!(fragments[0].inkml.contains("<trace id=\"1\">3 4</trace>"));
        assert!(fragments[1].inkml.contains("<trace id=\"2\">5 600</trace>"));
    }

    #[test]
    fn writing_order_restored_within_line() {
        // Stroke 0 sits lower than stroke 1 but both share a line; the
        // fragment must list 0 first.
        let traces = vec![
            trace(1, 0, vec![(0.0, 10.0)]),
            trace(0, 0, vec![(0.0, 90.0)]),
        ];
        let fragments = build_fragments(traces);
        let inkml = &fragments[0].inkml;
        let first = inkml.find("id=\"0\"").unwrap();
        let second = inkml.find("id=\"1\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn extraction_round_trips_through_fragment() {
        let source = "<ink xmlns=\"http://www.w3.org/2003/InkML\">\n\
             <trace id=\"0\">10 20, 30 40, </trace>\n</ink>";
        let records = extract_traces(source).unwrap();
        let segmented = assign_line_numbers(records, 200.0).unwrap();
        let fragments = build_fragments(segmented);

        let reparsed = extract_traces(&fragments[0].inkml).unwrap();
        assert_eq!(reparsed[0].coords, vec![(10.0, 20.0), (30.0, 40.0)]);
    }

    #[test]
    fn coordinate_text_joins_with_separator() {
        assert_eq!(
            coordinate_text(&[(10.0, 20.0), (30.5, 40.0)]),
            "10 20, 30.5 40"
        );
    }
}

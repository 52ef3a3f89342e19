//! Coordinate extraction from ink documents.

use roxmltree::Document;

use crate::core::error::{InklineError, Result};
use crate::core::model::{Point, TraceRecord};
use crate::ink::PAIR_SEPARATOR;

/// Parses an ink document and yields one record per stroke with its mean
/// vertical position, sorted by mean Y ascending.
///
/// Stroke text holds `"x y"` pairs joined by `", "`. Capture devices append
/// a terminator entry after the last pair; a trailing token that is not a
/// parseable pair is discarded. A stroke left with zero coordinates fails
/// with `InvalidInput` naming the stroke index.
pub fn extract_traces(ink_xml: &str) -> Result<Vec<TraceRecord>> {
    let doc = Document::parse(ink_xml)?;

    let mut records = Vec::new();
    let traces = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "trace");

    for (index, node) in traces.enumerate() {
        let coords = parse_coordinates(node.text().unwrap_or(""), index)?;
        if coords.is_empty() {
            return Err(InklineError::InvalidInput { stroke: index });
        }
        let mean_y = coords.iter().map(|&(_, y)| y).sum::<f64>() / coords.len() as f64;
        records.push(TraceRecord {
            index,
            mean_y,
            coords,
        });
    }

    records.sort_by(|a, b| a.mean_y.total_cmp(&b.mean_y));
    Ok(records)
}

fn parse_coordinates(text: &str, stroke: usize) -> Result<Vec<Point>> {
    let mut pairs: Vec<&str> = text.split(PAIR_SEPARATOR).map(str::trim).collect();

    // Drop the trailing terminator token if present.
    if let Some(last) = pairs.last() {
        if parse_pair(last).is_none() {
            pairs.pop();
        }
    }

    let mut coords = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match parse_pair(pair) {
            Some(point) => coords.push(point),
            None => return Err(InklineError::InvalidInput { stroke }),
        }
    }
    Ok(coords)
}

fn parse_pair(pair: &str) -> Option<Point> {
    let mut parts = pair.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some((x, y))
}

//! Threshold-based line segmentation.

use crate::core::error::{InklineError, Result};
use crate::core::model::{SegmentedTrace, TraceRecord};

/// Vertical distance (in ink coordinate units) beyond which a stroke starts
/// a new line.
pub const DEFAULT_THRESHOLD: f64 = 200.0;

/// Assigns a line number to every stroke with one-pass greedy threshold
/// clustering over the mean vertical positions.
///
/// Records must already be sorted by `mean_y` ascending (the extractor's
/// output order). The anchor starts at the first record's mean Y; whenever a
/// record is more than `threshold` below the anchor, the anchor moves to it
/// and the line counter increments. Line numbers come out contiguous from 0
/// with no gaps or reuse. Assumes lines do not vertically overlap.
pub fn assign_line_numbers(
    records: Vec<TraceRecord>,
    threshold: f64,
) -> Result<Vec<SegmentedTrace>> {
    let first = records.first().ok_or(InklineError::EmptyInput)?;

    let mut anchor = first.mean_y;
    let mut line_number = 0usize;

    let segmented = records
        .into_iter()
        .map(|record| {
            if record.mean_y - anchor > threshold {
                anchor = record.mean_y;
                line_number += 1;
            }
            SegmentedTrace {
                index: record.index,
                mean_y: record.mean_y,
                line_number,
                coords: record.coords,
            }
        })
        .collect();

    Ok(segmented)
}

/// Number of distinct lines in a segmented stroke set.
///
/// Traces keep the extractor's mean-Y order, so the last trace carries the
/// highest line number.
pub fn line_count(traces: &[SegmentedTrace]) -> usize {
    traces.last().map(|t| t.line_number + 1).unwrap_or(0)
}

//! Global identifier renumbering across artifacts.

use std::collections::HashMap;

use crate::core::error::{InklineError, Result};
use crate::core::model::{RecognitionArtifact, Stroke, SymbolGroup};

/// Monotonic counters for the merged document's identifier namespaces.
///
/// Scoped to one request and threaded explicitly through the merge: the
/// counters go in, come back advanced, and are never held as ambient state
/// across requests.
#[derive(Debug, Clone, Copy)]
pub struct IdCounters {
    pub stroke: u64,
    pub group: u64,
}

impl IdCounters {
    pub fn new() -> Self {
        Self {
            stroke: 1,
            group: 1,
        }
    }
}

impl Default for IdCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites one artifact's fragment-local identifiers into the global
/// namespace.
///
/// Every stroke gets a fresh identifier off the stroke counter; the
/// local-to-global map then rewrites each symbol group's stroke references,
/// and each group gets a fresh identifier off the group counter. A group
/// reference to a stroke the artifact does not contain fails with
/// `MissingStructure`, so the merged document never carries dangling
/// references.
pub fn renumber_artifact(
    artifact: &RecognitionArtifact,
    counters: &mut IdCounters,
) -> Result<RecognitionArtifact> {
    let mut translation: HashMap<&str, String> = HashMap::with_capacity(artifact.strokes.len());

    let strokes = artifact
        .strokes
        .iter()
        .map(|stroke| {
            let id = counters.stroke.to_string();
            counters.stroke += 1;
            translation.insert(stroke.id.as_str(), id.clone());
            Stroke {
                id,
                coordinates: stroke.coordinates.clone(),
            }
        })
        .collect();

    let symbol_groups = artifact
        .symbol_groups
        .iter()
        .map(|group| {
            let stroke_refs = group
                .stroke_refs
                .iter()
                .map(|local| {
                    translation.get(local.as_str()).cloned().ok_or_else(|| {
                        InklineError::MissingStructure {
                            line: artifact.line_number,
                            what: format!("stroke referenced by group {}: {local}", group.id),
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let id = counters.group.to_string();
            counters.group += 1;
            Ok(SymbolGroup {
                id,
                stroke_refs,
                symbol: group.symbol.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecognitionArtifact {
        line_number: artifact.line_number,
        strokes,
        math_markup: artifact.math_markup.clone(),
        symbol_groups,
    })
}

//! Reassembly of per-fragment recognition artifacts into one document.

pub mod artifact;
pub mod renumber;

use tracing::debug;

use crate::core::error::Result;
use crate::core::model::{RecognitionArtifact, Role, TaggedMarkup, UnifiedDocument};
use crate::merge::renumber::{renumber_artifact, IdCounters};

/// Merges all artifacts of one request into a unified document.
///
/// Artifacts must arrive in ascending line-number order; that order defines
/// both the identifier assignment and the expression/hint parity of the
/// markup blocks. A failure in any single artifact aborts the whole merge.
pub fn merge_artifacts(
    artifacts: &[RecognitionArtifact],
    counters: &mut IdCounters,
) -> Result<UnifiedDocument> {
    let mut strokes = Vec::new();
    let mut symbol_groups = Vec::new();
    let mut markup = Vec::new();

    for (position, artifact) in artifacts.iter().enumerate() {
        let renumbered = renumber_artifact(artifact, counters)?;
        debug!(
            line = artifact.line_number,
            strokes = renumbered.strokes.len(),
            groups = renumbered.symbol_groups.len(),
            "merged artifact"
        );

        strokes.extend(renumbered.strokes);
        symbol_groups.extend(renumbered.symbol_groups);
        markup.push(TaggedMarkup {
            role: Role::from_position(position),
            math: renumbered.math_markup,
        });
    }

    Ok(UnifiedDocument {
        strokes,
        symbol_groups,
        markup,
    })
}

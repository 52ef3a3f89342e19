use serde::{Deserialize, Serialize};

/// One (x, y) coordinate sample of a pen stroke.
pub type Point = (f64, f64);

/// Semantic role of a fragment, fixed by submission order: even positions
/// carry the primary expression, odd positions carry the hint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Expression,
    Hint,
}

impl Role {
    pub fn from_position(position: usize) -> Self {
        if position % 2 == 0 {
            Role::Expression
        } else {
            Role::Hint
        }
    }

    /// Marker used in the merged document's annotation block.
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Expression => "exp",
            Role::Hint => "hint",
        }
    }
}

/// One stroke as extracted from the source ink document, before any line
/// assignment. `index` is the stroke's position in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    pub index: usize,
    pub mean_y: f64,
    pub coords: Vec<Point>,
}

/// A stroke after line segmentation. Line numbers are contiguous integers
/// starting at 0, assigned in increasing order of vertical position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentedTrace {
    pub index: usize,
    pub mean_y: f64,
    pub line_number: usize,
    pub coords: Vec<Point>,
}

/// One line's worth of strokes serialized for independent recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub line_number: usize,
    pub inkml: String,
}

/// A stroke as it appears inside a recognition artifact. The coordinate
/// text is kept verbatim; only the identifier is rewritten during merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub id: String,
    pub coordinates: String,
}

/// A recognizer-identified cluster of strokes forming one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolGroup {
    pub id: String,
    pub stroke_refs: Vec<String>,
    pub symbol: String,
}

/// The structured recognizer output for one fragment, with the recognizer's
/// own fragment-local identifier namespace still in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionArtifact {
    pub line_number: usize,
    pub strokes: Vec<Stroke>,
    pub math_markup: String,
    pub symbol_groups: Vec<SymbolGroup>,
}

/// A recognized markup block tagged with its fragment's role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedMarkup {
    pub role: Role,
    pub math: String,
}

/// The merge of all artifacts for one request. Every stroke identifier and
/// every symbol-group identifier is unique across the whole document, and
/// every group's stroke references resolve to strokes present here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedDocument {
    pub strokes: Vec<Stroke>,
    pub symbol_groups: Vec<SymbolGroup>,
    pub markup: Vec<TaggedMarkup>,
}

/// The normalized textual result for one fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalResult {
    pub line_number: usize,
    pub role: Role,
    pub text: String,
}

/// Terminal output of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOutput {
    pub results: Vec<CanonicalResult>,
    pub document: UnifiedDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_alternates_by_position() {
        assert_eq!(Role::from_position(0), Role::Expression);
        assert_eq!(Role::from_position(1), Role::Hint);
        assert_eq!(Role::from_position(2), Role::Expression);
        assert_eq!(Role::from_position(3), Role::Hint);
    }

    #[test]
    fn role_tags() {
        assert_eq!(Role::Expression.tag(), "exp");
        assert_eq!(Role::Hint.tag(), "hint");
    }
}

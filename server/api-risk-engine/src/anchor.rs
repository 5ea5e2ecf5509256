//! Structural anchors: locate a marker key inside a diff path.
//!
//! The depth of `paths` (or `parameters`) varies with where in the document a
//! change sits, so classifiers work in offsets relative to the anchor.

use crate::types::PathSegment;

/// Key holding the endpoint collection of an OpenAPI document.
pub const PATHS: &str = "paths";
/// Key holding a parameter list (endpoint- or operation-level).
pub const PARAMETERS: &str = "parameters";

/// Index of the first `Key(marker)` segment, or `None`.
pub fn find_anchor(path: &[PathSegment], marker: &str) -> Option<usize> {
  path.iter().position(|seg| seg.as_key() == Some(marker))
}

/// Number of segments from the anchor to the end of the path, anchor included.
pub fn relative_len(path: &[PathSegment], anchor: usize) -> usize {
  path.len().saturating_sub(anchor)
}

/// Segment `offset` places after the anchor, rendered as a string.
pub fn segment_after(path: &[PathSegment], anchor: usize, offset: usize) -> Option<String> {
  path.get(anchor + offset).map(|seg| seg.to_string())
}

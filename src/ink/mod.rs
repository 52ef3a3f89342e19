pub mod extract;
pub mod fragment;
pub mod segment;

/// InkML namespace used by both input documents and generated fragments.
pub const INKML_NS: &str = "http://www.w3.org/2003/InkML";

/// Separator between coordinate pairs in stroke text content.
pub const PAIR_SEPARATOR: &str = ", ";

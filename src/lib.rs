pub mod core;
pub mod export;
pub mod ink;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod recognizer;

pub use crate::core::error::{InklineError, Result};
pub use crate::core::model::{CanonicalResult, RequestOutput, Role, UnifiedDocument};

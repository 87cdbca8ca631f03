//! Pipeline trait.
use crate::error::Error;

/// Implemented by every pipeline.
///
/// Generic over the return type, so that a pipeline can hand back
/// what it produced (written paths, counts, summaries).
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

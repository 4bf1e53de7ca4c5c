//! Error types for mesh preparation.

use thiserror::Error;

/// Errors raised while normalizing an input mesh.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// Every cell of the input was dropped as unsupported or degenerate.
    #[error("mesh contains no supported cells")]
    NoSupportedCells,
}

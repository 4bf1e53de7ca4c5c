//! Error types for contact extraction.

use thiserror::Error;

use seam_mesh::MeshError;

use crate::edge::Src;

/// Failures surfaced by [`extract_contact`](crate::extract_contact).
#[derive(Debug, Error)]
pub enum ContactError {
    /// An input mesh could not be decomposed into faces.
    #[error("failed to prepare the {side} mesh")]
    Prepare {
        /// Which input mesh failed.
        side: Src,
        /// Underlying decomposition error.
        source: MeshError,
    },
}

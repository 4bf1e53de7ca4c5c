//! Public entry point for contact extraction.

use std::fmt;
use std::sync::Arc;

use seam_math::Tolerance;
use seam_mesh::{prepare, PreparedMesh, RawMesh};

use crate::curve::ContactCurve;
use crate::edge::Src;
use crate::error::ContactError;
use crate::pipeline;
use crate::trace::{TraceEvent, TraceSink};

/// Extraction settings.
#[derive(Clone, Default)]
pub struct ContactConfig {
    /// Geometric tolerances used by every pipeline stage.
    pub tolerance: Tolerance,
    /// Optional structured trace receiver; `None` disables tracing.
    pub trace: Option<Arc<dyn TraceSink>>,
}

impl ContactConfig {
    /// Hand an event to the sink, building it only when one is set.
    pub(crate) fn emit(&self, event: impl FnOnce() -> TraceEvent) {
        if let Some(sink) = &self.trace {
            sink.record(&event());
        }
    }
}

impl fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactConfig")
            .field("tolerance", &self.tolerance)
            .field("trace", &self.trace.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Output of [`extract_contact`].
#[derive(Debug)]
pub struct ContactResult {
    /// The extracted contact curve.
    pub curve: ContactCurve,
    /// First input after face decomposition; segment face indices and
    /// source vertex ids refer to it.
    pub mesh_a: PreparedMesh,
    /// Second input after face decomposition.
    pub mesh_b: PreparedMesh,
    /// Contact ran through a non-manifold edge of the first mesh; the
    /// curve around such edges is not reliable.
    pub invalid_a: bool,
    /// Same for the second mesh.
    pub invalid_b: bool,
}

/// Extract the contact curve between two closed polygonal surfaces.
///
/// Both inputs are decomposed into convex-safe faces first; the curve's
/// provenance ids refer to the decomposed faces returned in the result,
/// and each face carries the index of the input cell it came from.
pub fn extract_contact(
    a: &RawMesh,
    b: &RawMesh,
    config: &ContactConfig,
) -> Result<ContactResult, ContactError> {
    let mesh_a = prepare(a).map_err(|source| ContactError::Prepare {
        side: Src::A,
        source,
    })?;
    let mesh_b = prepare(b).map_err(|source| ContactError::Prepare {
        side: Src::B,
        source,
    })?;

    let (curve, invalid_a, invalid_b) = pipeline::extract(&mesh_a, &mesh_b, config);

    Ok(ContactResult {
        curve,
        mesh_a,
        mesh_b,
        invalid_a,
        invalid_b,
    })
}

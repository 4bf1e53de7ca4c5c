#![warn(missing_docs)]

//! Contact-curve extraction between two closed polygonal surfaces.
//!
//! Given two meshes whose surfaces cross each other, computes the
//! polyline along which they touch, with full provenance back to the
//! faces, edges, and vertices involved.
//!
//! The pipeline has 5 stages:
//! 1. **Face preparation** — decompose cells into plane polygonal faces
//! 2. **AABB filter** — broadphase to find candidate face pairs
//! 3. **Plane/line narrow phase** — cutting line of each pair, edge
//!    crossings, pocket resolution
//! 4. **Interval stitching** — clip the inside intervals of both faces
//!    against each other
//! 5. **Accumulation** — weld endpoints and flag contact through
//!    non-manifold edges
//!
//! The extraction itself performs no I/O; diagnostics go to an optional
//! [`TraceSink`].

pub mod bbox;
pub mod plane;

mod api;
mod crossing;
mod curve;
mod edge;
mod error;
mod overlap;
mod pipeline;
mod trace;

pub use api::{extract_contact, ContactConfig, ContactResult};
pub use curve::{ContactCurve, ContactSegment};
pub use edge::Src;
pub use error::ContactError;
pub use trace::{TraceEvent, TraceSink};

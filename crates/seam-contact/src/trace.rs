//! Structured trace events for the extraction pipeline.
//!
//! Tracing is off unless the caller installs a sink; the pipeline never
//! writes to stdout or stderr on its own.

use crate::edge::Src;

/// Diagnostic events emitted while walking candidate face pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// Broad phase finished with this many face pairs to test.
    CandidatePairs {
        /// Pair count after AABB pruning.
        count: usize,
    },
    /// A face pair was skipped because its planes do not meet in a line.
    PlanesParallel {
        /// Face index in the first mesh.
        face_a: usize,
        /// Face index in the second mesh.
        face_b: usize,
    },
    /// Crossing counts of both faces along their cutting line.
    Crossings {
        /// Face index in the first mesh.
        face_a: usize,
        /// Face index in the second mesh.
        face_b: usize,
        /// Crossings on the first face.
        count_a: usize,
        /// Crossings on the second face.
        count_b: usize,
    },
    /// A face's crossings could not be paired into intervals because an
    /// odd number survived resolution, usually on a non-planar face
    /// whose estimated normal drifted; the pair was skipped.
    OddCrossings {
        /// Face index in the first mesh.
        face_a: usize,
        /// Face index in the second mesh.
        face_b: usize,
        /// Crossings on the first face.
        count_a: usize,
        /// Crossings on the second face.
        count_b: usize,
    },
    /// A crossing drifted off its carrying edge, usually from an
    /// inaccurate face normal.
    OffEdgePoint {
        /// Face index in the first mesh.
        face_a: usize,
        /// Face index in the second mesh.
        face_b: usize,
        /// Which mesh the drifting crossing belongs to.
        src: Src,
        /// Distance from the edge's carrier line.
        distance: f64,
    },
    /// Overlaps produced for one face pair.
    Overlaps {
        /// Face index in the first mesh.
        face_a: usize,
        /// Face index in the second mesh.
        face_b: usize,
        /// Number of contact segments from this pair.
        count: usize,
    },
}

/// Receiver for [`TraceEvent`]s; shared across worker threads.
pub trait TraceSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: &TraceEvent);
}

#[cfg(test)]
pub(crate) mod test_sink {
    use super::*;
    use std::sync::Mutex;

    /// Collects events for assertions.
    #[derive(Default)]
    pub struct Recorder(pub Mutex<Vec<TraceEvent>>);

    impl TraceSink for Recorder {
        fn record(&self, event: &TraceEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }
}

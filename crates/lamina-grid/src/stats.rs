//! Diagnostic counters for a grid view.
//!
//! [`GridStats`] is a point-in-time reading of the chain shape behind a
//! handle. Core logic never consults these numbers; they exist for
//! tests and telemetry, and they are the only window through which
//! compaction is observable at all.

/// Chain-shape counters captured from one view at one moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Nodes from this view's head to the root, inclusive.
    pub layer_count: usize,
    /// Cells changed in this view's head node alone.
    pub layer_size: usize,
    /// Distinct nodes alive across every handle of this root.
    pub all_layer_count: usize,
}

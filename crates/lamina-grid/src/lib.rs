//! Version-chain engine for the Lamina layered grid store.
//!
//! A grid is stored as a chain of sparse diff layers over a shared root,
//! so many snapshots derived from a common ancestor each cost memory
//! proportional to their own changes rather than to the full grid.
//!
//! # Architecture
//!
//! ```text
//! GridEditor / GridSnapshot (two thin wrappers, one chain core)
//! └── LayerRef (RAII liveness guard: Clone/Drop adjust `live`)
//!     └── Arc<Layer> (sparse IndexMap diff + swappable parent link)
//!         ├── parent: ArcSwapOption<Layer>  (root-ward, None at root)
//!         └── meta: Arc<GridMeta>           (bounds, default, layer counter)
//! ```
//!
//! Reads walk the chain root-ward and take the nearest diff hit, falling
//! back to the default fill value. Writes allocate exactly one new layer
//! (or are a no-op when the value is already observable). The compactor
//! runs opportunistically on access: it folds maximal runs of layers with
//! no competing dependent into one replacement layer and installs it with
//! a single atomic parent-link swap, so concurrent readers are never
//! disturbed — an in-flight walk keeps the old (equivalent) chain alive
//! through its own `Arc`s.
//!
//! Liveness is explicit reference counting, not collector timing: every
//! handle and every child layer counts as one dependent of the layer it
//! points at, and dropping a handle decrements that count synchronously.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub(crate) mod chain;
pub(crate) mod compact;
pub mod handle;
pub(crate) mod layer;
pub mod stats;

pub use handle::{GridEditor, GridSnapshot};
pub use stats::GridStats;

//! Version-chain nodes, root metadata, and liveness bookkeeping.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use indexmap::IndexMap;
use lamina_core::{Bounds, CellValue};

/// A cell coordinate, validated against [`Bounds`] before use as a key.
pub(crate) type Cell = (i32, i32);

/// Root metadata shared by every layer and handle derived from one grid.
///
/// Immutable for the life of the chain, except for the live-layer
/// counter backing the `all_layer_count` diagnostic.
pub(crate) struct GridMeta<V> {
    /// Validated grid dimensions.
    pub(crate) bounds: Bounds,
    /// The fill value observed for cells no diff mentions.
    pub(crate) default: V,
    /// Number of layers currently alive across every branch of this root.
    layers: AtomicUsize,
}

impl<V: CellValue> GridMeta<V> {
    pub(crate) fn new(bounds: Bounds, default: V) -> Arc<Self> {
        Arc::new(Self {
            bounds,
            default,
            layers: AtomicUsize::new(0),
        })
    }

    /// Distinct layers alive across all handles of this root.
    pub(crate) fn layer_total(&self) -> usize {
        self.layers.load(Ordering::Acquire)
    }

    fn retain_layer(&self) {
        self.layers.fetch_add(1, Ordering::AcqRel);
    }

    fn release_layer(&self) {
        self.layers.fetch_sub(1, Ordering::AcqRel);
    }
}

/// One node in the version chain: a sparse diff over its parent.
///
/// Immutable once created, except for the `live` count and the parent
/// link, which only the compactor swaps (for an observationally
/// identical replacement).
pub(crate) struct Layer<V: CellValue> {
    /// Cells changed relative to the parent. Presence implies the value
    /// differs from what the parent would report.
    pub(crate) diff: IndexMap<Cell, V>,
    /// Root-ward link; `None` only for the root layer. Readers clone the
    /// `Arc` out of this slot, so a walk that raced a compaction swap
    /// simply finishes on the old (equivalent) chain.
    pub(crate) parent: ArcSwapOption<Layer<V>>,
    /// Number of handles and child layers currently depending on this
    /// layer. A count above 1 marks a branch point the compactor must
    /// not cross.
    pub(crate) live: AtomicU32,
    /// Shared root metadata.
    pub(crate) meta: Arc<GridMeta<V>>,
}

impl<V: CellValue> Layer<V> {
    /// Create the root layer: empty diff, no parent, no dependents yet.
    pub(crate) fn root(meta: Arc<GridMeta<V>>) -> Arc<Self> {
        meta.retain_layer();
        Arc::new(Self {
            diff: IndexMap::new(),
            parent: ArcSwapOption::empty(),
            live: AtomicU32::new(0),
            meta,
        })
    }

    /// Allocate a single-cell child of `parent`.
    ///
    /// The parent gains one dependent (the new child's link).
    pub(crate) fn child(parent: &Arc<Layer<V>>, cell: Cell, value: V) -> Arc<Self> {
        let meta = Arc::clone(&parent.meta);
        meta.retain_layer();
        parent.live.fetch_add(1, Ordering::AcqRel);
        let mut diff = IndexMap::with_capacity(1);
        diff.insert(cell, value);
        Arc::new(Self {
            diff,
            parent: ArcSwapOption::new(Some(Arc::clone(parent))),
            live: AtomicU32::new(0),
            meta,
        })
    }

    /// Materialize the replacement for a folded run.
    ///
    /// `live` starts at 1: the surviving leaf-ward layer takes this node
    /// as its parent the moment it is installed, and the node is not
    /// published anywhere else before that.
    pub(crate) fn folded(
        diff: IndexMap<Cell, V>,
        anchor: Option<Arc<Layer<V>>>,
        meta: &Arc<GridMeta<V>>,
    ) -> Arc<Self> {
        meta.retain_layer();
        if let Some(a) = &anchor {
            a.live.fetch_add(1, Ordering::AcqRel);
        }
        Arc::new(Self {
            diff,
            parent: ArcSwapOption::new(anchor),
            live: AtomicU32::new(1),
            meta: Arc::clone(meta),
        })
    }
}

impl<V: CellValue> Drop for Layer<V> {
    fn drop(&mut self) {
        self.meta.release_layer();
        // Unlink root-ward iteratively: a freed chain of depth N must not
        // recurse N frames deep through nested Arc drops. Each severed
        // link gives back the dependent it contributed to its parent.
        let mut parent = self.parent.swap(None);
        while let Some(p) = parent {
            p.live.fetch_sub(1, Ordering::AcqRel);
            if Arc::strong_count(&p) == 1 {
                // Sole owner: take its parent before letting it drop so
                // its own Drop sees no link and the loop stays flat.
                parent = p.parent.swap(None);
            } else {
                break;
            }
        }
    }
}

/// A liveness-counted reference to a layer.
///
/// Binding a `LayerRef` is what makes a layer a handle target: `Clone`
/// and `Drop` adjust the layer's `live` count, so "last reference
/// dropped" is a synchronous event the compactor can rely on rather
/// than a collector-timing accident.
pub(crate) struct LayerRef<V: CellValue> {
    head: Arc<Layer<V>>,
}

impl<V: CellValue> LayerRef<V> {
    /// Bind a new reference to `head`, registering it as a dependent.
    pub(crate) fn bind(head: Arc<Layer<V>>) -> Self {
        head.live.fetch_add(1, Ordering::AcqRel);
        Self { head }
    }

    /// The layer this reference currently points at.
    pub(crate) fn head(&self) -> &Arc<Layer<V>> {
        &self.head
    }

    /// Point this reference at a new head, releasing the old binding.
    pub(crate) fn rebind(&mut self, head: Arc<Layer<V>>) {
        head.live.fetch_add(1, Ordering::AcqRel);
        let old = std::mem::replace(&mut self.head, head);
        old.live.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<V: CellValue> Clone for LayerRef<V> {
    fn clone(&self) -> Self {
        Self::bind(Arc::clone(&self.head))
    }
}

impl<V: CellValue> Drop for LayerRef<V> {
    fn drop(&mut self) {
        self.head.live.fetch_sub(1, Ordering::AcqRel);
    }
}

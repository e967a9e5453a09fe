//! Opportunistic folding of dead version-chain runs.
//!
//! Invoked on every `get`/`set`. The goal is to bound chain length to
//! the number of still-distinguishable branches rather than to write
//! history, without ever changing what any live handle observes.
//!
//! A layer strictly below a head whose `live` count is exactly 1 owes
//! that count to its path child: no handle references it (a handle
//! would add a second dependent) and no other branch hangs off it. Such
//! layers form "dead runs". The fold unions a maximal run's diffs into
//! one replacement layer parented on the first still-contended ancestor
//! and installs it with a single atomic swap of the head's parent link.
//!
//! Correctness leans on two facts:
//!
//! - `live == 1` on a chain-interior layer is stable: new handles are
//!   only minted from existing handles, and none exists for the layer,
//!   so a dependent cannot reappear between the check and the swap.
//! - The replacement is observationally identical to the run it covers,
//!   so a reader that loaded the old parent link mid-walk finishes on an
//!   equivalent chain (kept alive by its own `Arc`s), and concurrent
//!   folds of the same run merely install interchangeable replacements.
//!
//! Folding is best-effort: every early return below is a "skip this
//! time", never an error.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use lamina_core::CellValue;

use crate::chain;
use crate::layer::{Cell, Layer};

/// Fold the maximal dead run strictly below `head`, if one exists.
///
/// Never touches `head` itself and never crosses a layer with more than
/// one dependent (a branch point). Runs shorter than two layers are
/// left alone — replacing one layer with another saves nothing.
pub(crate) fn fold_dead_run<V: CellValue>(head: &Arc<Layer<V>>) {
    // Collect the maximal root-ward run of sole-dependent layers and
    // the anchor below it (None when the run reaches the root).
    let mut run: SmallVec<[Arc<Layer<V>>; 8]> = SmallVec::new();
    let mut anchor = head.parent.load_full();
    while let Some(layer) = anchor {
        if layer.live.load(Ordering::Acquire) != 1 {
            anchor = Some(layer);
            break;
        }
        anchor = layer.parent.load_full();
        run.push(layer);
    }
    if run.len() < 2 {
        return;
    }

    let meta = &head.meta;

    // Union the run's diffs, leaf-ward entries overriding root-ward
    // ones, then drop entries the anchor already reports. The filter
    // keeps the diff invariant: presence implies "differs from parent".
    let mut diff: IndexMap<Cell, V> = IndexMap::new();
    for layer in run.iter().rev() {
        for (&cell, value) in &layer.diff {
            diff.insert(cell, value.clone());
        }
    }
    diff.retain(|&cell, value| chain::observe(anchor.as_ref(), meta, cell) != *value);

    let replacement = if diff.is_empty() {
        // Nothing survives filtering: link the head straight to the
        // anchor, which gains the head as a dependent.
        if let Some(a) = &anchor {
            a.live.fetch_add(1, Ordering::AcqRel);
        }
        anchor
    } else {
        Some(Layer::folded(diff, anchor, meta))
    };

    // Single publish point. Whatever the swap displaces — the run's
    // leaf-most layer, or a replacement installed by a concurrent fold
    // of the same run — loses the head as a dependent and is released
    // through the normal drop path.
    let old = head.parent.swap(replacement);
    if let Some(old) = old {
        old.live.fetch_sub(1, Ordering::AcqRel);
    }
}

//! Chain-walk logic shared by both grid view types.
//!
//! All reads resolve through [`lookup`]: walk root-ward from a head
//! layer, take the nearest diff hit, fall back to the default fill
//! value at the root. Parent links are cloned out of their `ArcSwap`
//! slots, so a walk that races a compaction swap finishes on the old
//! (observationally identical) chain.

use std::sync::Arc;

use lamina_core::CellValue;

use crate::layer::{Cell, GridMeta, Layer};

/// Resolve `cell` through the chain starting at `head`.
pub(crate) fn lookup<V: CellValue>(head: &Arc<Layer<V>>, cell: Cell) -> V {
    let mut cur = Arc::clone(head);
    loop {
        if let Some(value) = cur.diff.get(&cell) {
            return value.clone();
        }
        match cur.parent.load_full() {
            Some(parent) => cur = parent,
            None => return cur.meta.default.clone(),
        }
    }
}

/// Resolve `cell` through an optional chain; `None` reports the default.
///
/// Used by the compactor to ask what the anchor below a dead run would
/// observe for a cell.
pub(crate) fn observe<V: CellValue>(
    anchor: Option<&Arc<Layer<V>>>,
    meta: &GridMeta<V>,
    cell: Cell,
) -> V {
    match anchor {
        Some(layer) => lookup(layer, cell),
        None => meta.default.clone(),
    }
}

/// Count the nodes from `head` to the root, inclusive.
pub(crate) fn layer_count<V: CellValue>(head: &Arc<Layer<V>>) -> usize {
    let mut count = 1;
    let mut cur = Arc::clone(head);
    while let Some(parent) = cur.parent.load_full() {
        count += 1;
        cur = parent;
    }
    count
}

/// Materialize a dense row-major copy of the grid as seen from `head`.
///
/// Cell `(x, y)` lands at index `y * width + x`. Diffs are applied
/// root-ward first so leaf-ward entries win.
pub(crate) fn to_dense<V: CellValue>(head: &Arc<Layer<V>>) -> Vec<V> {
    let bounds = head.meta.bounds;
    let width = bounds.width() as usize;
    let mut cells = vec![head.meta.default.clone(); bounds.cell_count()];

    let mut stack = Vec::new();
    let mut cur = Arc::clone(head);
    loop {
        let parent = cur.parent.load_full();
        stack.push(cur);
        match parent {
            Some(p) => cur = p,
            None => break,
        }
    }
    for layer in stack.iter().rev() {
        for (&(x, y), value) in &layer.diff {
            cells[y as usize * width + x as usize] = value.clone();
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::Bounds;

    fn chain_of(values: &[(Cell, u8)]) -> Arc<Layer<u8>> {
        let meta = GridMeta::new(Bounds::new(8, 8).unwrap(), 0u8);
        let mut head = Layer::root(meta);
        for &(cell, value) in values {
            head = Layer::child(&head, cell, value);
        }
        head
    }

    #[test]
    fn lookup_falls_back_to_default() {
        let head = chain_of(&[((1, 1), 5)]);
        assert_eq!(lookup(&head, (0, 0)), 0);
        assert_eq!(lookup(&head, (1, 1)), 5);
    }

    #[test]
    fn nearest_to_head_layer_wins() {
        let head = chain_of(&[((2, 3), 1), ((2, 3), 2), ((2, 3), 9)]);
        assert_eq!(lookup(&head, (2, 3)), 9);
    }

    #[test]
    fn layer_count_includes_head_and_root() {
        let head = chain_of(&[]);
        assert_eq!(layer_count(&head), 1);
        let head = chain_of(&[((0, 0), 1), ((1, 0), 2)]);
        assert_eq!(layer_count(&head), 3);
    }

    #[test]
    fn to_dense_is_row_major_with_leafward_override() {
        let head = chain_of(&[((0, 0), 1), ((7, 7), 3), ((0, 0), 2)]);
        let dense = to_dense(&head);
        assert_eq!(dense.len(), 64);
        assert_eq!(dense[0], 2);
        assert_eq!(dense[7 * 8 + 7], 3);
        assert_eq!(dense[1], 0);
    }
}

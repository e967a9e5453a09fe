//! The two grid view types: single-owner editor and value-like snapshot.
//!
//! Both are thin wrappers over the same chain core and differ only in
//! `set` semantics: [`GridEditor::set`] rebinds its own head in place,
//! [`GridSnapshot::set`] returns a new snapshot and leaves the original
//! untouched — that is the rollback/branch guarantee. Converting between
//! the two shares the current head layer, which raises its dependent
//! count to at least 2 and makes it a branch point until one side is
//! dropped.

use std::sync::Arc;

use lamina_core::{Bounds, CellValue, GridError, GridRead};

use crate::chain;
use crate::compact;
use crate::layer::{GridMeta, Layer, LayerRef};
use crate::stats::GridStats;

/// The single-owner, mutable view of a grid version chain.
///
/// Writes advance this editor's own head pointer; no other handle ever
/// observes them. Concurrent `set` calls require external serialization
/// by construction (`set` takes `&mut self`).
pub struct GridEditor<V: CellValue> {
    head: LayerRef<V>,
}

/// The value-like, immutable view of a grid version chain.
///
/// Cloning is cheap (one reference-count bump) and reads are safe from
/// any number of threads with no external locking. `set` returns a new
/// snapshot derived from this one.
#[derive(Clone)]
pub struct GridSnapshot<V: CellValue> {
    head: LayerRef<V>,
}

// Compile-time assertion: snapshots must be shareable across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<GridSnapshot<u8>>();
    assert::<GridEditor<u8>>();
};

impl<V: CellValue> GridEditor<V> {
    /// Create a new grid filled with `default`.
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero, or
    /// [`GridError::DimensionTooLarge`] if either exceeds
    /// [`Bounds::MAX_DIM`].
    pub fn new(width: u32, height: u32, default: V) -> Result<Self, GridError> {
        let bounds = Bounds::new(width, height)?;
        let meta = GridMeta::new(bounds, default);
        Ok(Self {
            head: LayerRef::bind(Layer::root(meta)),
        })
    }

    /// Write `value` at `(x, y)`, advancing this editor's head.
    ///
    /// Writing the value already observable at the cell is a no-op: no
    /// layer is allocated and no diff grows. Fails with
    /// [`GridError::OutOfRange`] for coordinates outside the grid.
    pub fn set(&mut self, x: i32, y: i32, value: V) -> Result<(), GridError> {
        self.meta().bounds.check(x, y)?;
        if chain::lookup(self.head.head(), (x, y)) == value {
            return Ok(());
        }
        let child = Layer::child(self.head.head(), (x, y), value);
        self.head.rebind(child);
        compact::fold_dead_run(self.head.head());
        Ok(())
    }

    /// Take an immutable snapshot sharing this editor's current head.
    ///
    /// The shared head becomes a branch point: later writes through the
    /// editor diverge from the snapshot without disturbing it.
    pub fn snapshot(&self) -> GridSnapshot<V> {
        GridSnapshot {
            head: self.head.clone(),
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.meta().bounds.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.meta().bounds.height()
    }

    /// The default fill value.
    pub fn default_value(&self) -> &V {
        &self.meta().default
    }

    /// Distinct layers alive across every handle of this grid's root.
    ///
    /// Test/telemetry only; never consulted by core logic.
    pub fn all_layer_count(&self) -> usize {
        self.meta().layer_total()
    }

    /// Snapshot of the diagnostic counters.
    pub fn stats(&self) -> GridStats {
        GridStats {
            layer_count: self.layer_count(),
            layer_size: self.layer_size(),
            all_layer_count: self.all_layer_count(),
        }
    }

    fn meta(&self) -> &GridMeta<V> {
        &self.head.head().meta
    }
}

impl<V: CellValue> GridSnapshot<V> {
    /// Derive a new snapshot with `value` written at `(x, y)`.
    ///
    /// This snapshot is untouched. Writing the value already observable
    /// at the cell allocates nothing and returns a snapshot value-equal
    /// to this one. Fails with [`GridError::OutOfRange`] for coordinates
    /// outside the grid.
    #[must_use = "set returns the derived snapshot; the original is unchanged"]
    pub fn set(&self, x: i32, y: i32, value: V) -> Result<GridSnapshot<V>, GridError> {
        self.meta().bounds.check(x, y)?;
        if chain::lookup(self.head.head(), (x, y)) == value {
            return Ok(self.clone());
        }
        let child = Layer::child(self.head.head(), (x, y), value);
        let derived = GridSnapshot {
            head: LayerRef::bind(child),
        };
        compact::fold_dead_run(derived.head.head());
        Ok(derived)
    }

    /// Create an editor sharing this snapshot's head.
    ///
    /// The shared head becomes a branch point; the editor's writes
    /// diverge from this snapshot without disturbing it.
    pub fn to_editor(&self) -> GridEditor<V> {
        GridEditor {
            head: self.head.clone(),
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.meta().bounds.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.meta().bounds.height()
    }

    /// The default fill value.
    pub fn default_value(&self) -> &V {
        &self.meta().default
    }

    /// Distinct layers alive across every handle of this grid's root.
    ///
    /// Test/telemetry only; never consulted by core logic.
    pub fn all_layer_count(&self) -> usize {
        self.meta().layer_total()
    }

    /// Snapshot of the diagnostic counters.
    pub fn stats(&self) -> GridStats {
        GridStats {
            layer_count: self.layer_count(),
            layer_size: self.layer_size(),
            all_layer_count: self.all_layer_count(),
        }
    }

    fn meta(&self) -> &GridMeta<V> {
        &self.head.head().meta
    }
}

impl<V: CellValue> GridRead<V> for GridEditor<V> {
    fn get(&self, x: i32, y: i32) -> Result<V, GridError> {
        self.meta().bounds.check(x, y)?;
        compact::fold_dead_run(self.head.head());
        Ok(chain::lookup(self.head.head(), (x, y)))
    }

    fn layer_count(&self) -> usize {
        chain::layer_count(self.head.head())
    }

    fn layer_size(&self) -> usize {
        self.head.head().diff.len()
    }

    fn to_dense(&self) -> Vec<V> {
        chain::to_dense(self.head.head())
    }
}

impl<V: CellValue> GridRead<V> for GridSnapshot<V> {
    fn get(&self, x: i32, y: i32) -> Result<V, GridError> {
        self.meta().bounds.check(x, y)?;
        compact::fold_dead_run(self.head.head());
        Ok(chain::lookup(self.head.head(), (x, y)))
    }

    fn layer_count(&self) -> usize {
        chain::layer_count(self.head.head())
    }

    fn layer_size(&self) -> usize {
        self.head.head().diff.len()
    }

    fn to_dense(&self) -> Vec<V> {
        chain::to_dense(self.head.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_reports_default_everywhere() {
        let editor = GridEditor::new(4, 3, 0.5f32).unwrap();
        assert_eq!(editor.width(), 4);
        assert_eq!(editor.height(), 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(editor.get(x, y).unwrap(), 0.5);
            }
        }
        assert_eq!(editor.layer_count(), 1);
        assert_eq!(editor.layer_size(), 0);
    }

    #[test]
    fn construction_rejects_zero_dimensions() {
        assert!(matches!(
            GridEditor::new(0, 3, 0u8),
            Err(GridError::EmptyGrid { .. })
        ));
        assert!(matches!(
            GridEditor::new(3, 0, 0u8),
            Err(GridError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn editor_set_advances_in_place() {
        let mut editor = GridEditor::new(8, 8, 0u8).unwrap();
        editor.set(2, 3, 7).unwrap();
        editor.set(2, 3, 9).unwrap();
        assert_eq!(editor.get(2, 3).unwrap(), 9);
        assert_eq!(editor.get(3, 2).unwrap(), 0);
    }

    #[test]
    fn noop_write_allocates_nothing() {
        let mut editor = GridEditor::new(20, 10, 0u8).unwrap();
        let layers_before = editor.all_layer_count();
        editor.set(5, 6, 0).unwrap();
        assert_eq!(editor.all_layer_count(), layers_before);
        assert_eq!(editor.layer_size(), 0);

        let snap = editor.snapshot();
        let same = snap.set(5, 6, 0).unwrap();
        assert_eq!(same.layer_size(), 0);
        assert_eq!(same.to_dense(), snap.to_dense());
    }

    #[test]
    fn snapshot_set_leaves_original_untouched() {
        let root = GridEditor::new(20, 10, 0u8).unwrap().snapshot();
        let a = root.set(5, 6, 1).unwrap();
        assert_eq!(a.get(5, 6).unwrap(), 1);
        assert_eq!(root.get(5, 6).unwrap(), 0);
    }

    #[test]
    fn out_of_range_set_fails_without_allocating() {
        let mut editor = GridEditor::new(10, 10, 0u8).unwrap();
        let layers_before = editor.all_layer_count();
        assert!(matches!(
            editor.set(10, 0, 1),
            Err(GridError::OutOfRange { x: 10, y: 0, .. })
        ));
        assert_eq!(editor.all_layer_count(), layers_before);
    }

    #[test]
    fn editor_roundtrip_through_snapshot_shares_head() {
        let mut editor = GridEditor::new(8, 8, 0u8).unwrap();
        editor.set(1, 1, 3).unwrap();
        let snap = editor.snapshot();
        let editor2 = snap.to_editor();
        assert_eq!(editor2.get(1, 1).unwrap(), 3);
        // The shared head is one node counted once, not per handle.
        assert_eq!(snap.layer_count(), editor2.layer_count());
    }

    #[test]
    fn stats_reflect_the_three_counters() {
        let mut editor = GridEditor::new(8, 8, 0u8).unwrap();
        editor.set(0, 0, 1).unwrap();
        let stats = editor.stats();
        assert_eq!(stats.layer_count, editor.layer_count());
        assert_eq!(stats.layer_size, 1);
        assert_eq!(stats.all_layer_count, editor.all_layer_count());
    }

    #[test]
    fn editor_chain_stays_short_under_sustained_writes() {
        let mut editor = GridEditor::new(16, 16, 0u32).unwrap();
        for i in 0..1_000u32 {
            let x = (i % 16) as i32;
            let y = ((i / 16) % 16) as i32;
            editor.set(x, y, i + 1).unwrap();
        }
        // No other handle exists, so every dead run folds as it forms.
        assert!(editor.layer_count() <= 3);
        assert!(editor.all_layer_count() <= 3);
        // Last write to (15, 14) was iteration 751 (i % 256 == 239).
        assert_eq!(editor.get(15, 14).unwrap(), 752);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn editor_reads_match_dense_model(
                ops in proptest::collection::vec((0i32..8, 0i32..6, 0u8..4), 1..64),
            ) {
                let mut editor = GridEditor::new(8, 6, 0u8).unwrap();
                let mut model = vec![0u8; 48];
                for &(x, y, v) in &ops {
                    editor.set(x, y, v).unwrap();
                    model[(y * 8 + x) as usize] = v;
                }
                for y in 0..6i32 {
                    for x in 0..8i32 {
                        prop_assert_eq!(
                            editor.get(x, y).unwrap(),
                            model[(y * 8 + x) as usize]
                        );
                    }
                }
                prop_assert_eq!(editor.to_dense(), model);
            }

            #[test]
            fn snapshots_are_unaffected_by_later_writes_and_drops(
                ops in proptest::collection::vec(
                    (0i32..6, 0i32..6, 0u8..8, proptest::bool::ANY, proptest::bool::ANY),
                    1..48,
                ),
            ) {
                let mut editor = GridEditor::new(6, 6, 0u8).unwrap();
                let mut model = vec![0u8; 36];
                let mut saved: Vec<(GridSnapshot<u8>, Vec<u8>)> = Vec::new();

                for &(x, y, v, take_snap, drop_snap) in &ops {
                    editor.set(x, y, v).unwrap();
                    model[(y * 6 + x) as usize] = v;
                    if take_snap {
                        saved.push((editor.snapshot(), model.clone()));
                    }
                    if drop_snap && !saved.is_empty() {
                        saved.remove(saved.len() / 2);
                    }
                }

                for (snap, expected) in &saved {
                    prop_assert_eq!(&snap.to_dense(), expected);
                }
                prop_assert_eq!(editor.to_dense(), model);
            }
        }
    }
}

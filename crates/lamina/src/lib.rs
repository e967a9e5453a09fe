//! Lamina: a persistent layered 2-D grid store.
//!
//! A grid with a single default fill value that supports cheap
//! branching: any number of independent snapshots derived from a common
//! ancestor, each costing memory proportional to its own changes rather
//! than to the full grid. Version data no longer reachable from any
//! live handle is folded away automatically, transparently to every
//! reader.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Lamina sub-crates. For most users, adding `lamina` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lamina::{GridEditor, GridRead};
//!
//! // A 20x10 grid of zeros.
//! let mut editor = GridEditor::new(20, 10, 0u8).unwrap();
//! editor.set(5, 6, 1).unwrap();
//!
//! // Snapshots branch off without copying the grid.
//! let a = editor.snapshot();
//! let b1 = a.set(5, 6, 2).unwrap();
//! let b2 = a.set(5, 6, 3).unwrap();
//!
//! assert_eq!(b1.get(5, 6).unwrap(), 2);
//! assert_eq!(b2.get(5, 6).unwrap(), 3);
//! assert_eq!(a.get(5, 6).unwrap(), 1);
//!
//! // The editor keeps moving independently of every snapshot.
//! editor.set(5, 6, 9).unwrap();
//! assert_eq!(a.get(5, 6).unwrap(), 1);
//! ```
//!
//! # Crates
//!
//! | Module source | Contents |
//! |---------------|----------|
//! | `lamina-core` | [`Bounds`], [`GridError`], [`CellValue`], [`GridRead`] |
//! | `lamina-grid` | [`GridEditor`], [`GridSnapshot`], [`GridStats`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use lamina_core::{Bounds, CellValue, GridError, GridRead};
pub use lamina_grid::{GridEditor, GridSnapshot, GridStats};

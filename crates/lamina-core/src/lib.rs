//! Core types and traits for the Lamina layered grid store.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the Lamina workspace:
//! coordinate bounds, the error taxonomy, the [`CellValue`] marker
//! trait, and the [`GridRead`] access trait implemented by both grid
//! view types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod error;
pub mod traits;
pub mod value;

pub use bounds::Bounds;
pub use error::GridError;
pub use traits::GridRead;
pub use value::CellValue;

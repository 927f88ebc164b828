//! Invoice document rendering.
//!
//! [`build_document`] turns an invoice into a layout-agnostic [`Document`]
//! (header lines, party table, items table with per-rate and total rows,
//! totals table). The document renders to plain text directly and to PDF
//! with the `pdf` feature.

mod document;
mod layout;
mod options;
#[cfg(feature = "pdf")]
pub mod pdf;

pub use document::*;
pub use layout::build_document;
pub use options::{Labels, RenderOptions};

#[cfg(feature = "pdf")]
pub use pdf::{render_pdf, write_pdf};

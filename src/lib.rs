//! # fakturka
//!
//! Sales invoice rendering built around an exact-decimal value calculator.
//!
//! All monetary values and VAT rates use [`rust_decimal::Decimal`], never
//! floating point. Rounding to two places happens only when amounts are
//! formatted for display.
//!
//! ## Quick Start
//!
//! ```rust
//! use fakturka::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new("Hosting", dec!(1), dec!(10000), dec!(10)).build(),
//!     LineItemBuilder::new("Licencja", dec!(1), dec!(10000), dec!(20)).build(),
//!     LineItemBuilder::new("Wsparcie", "1", "5000", "20").build(),
//! ];
//!
//! let result = calculate_invoice_summary(&items).unwrap();
//! assert_eq!(result.vat_rate_values.len(), 2);
//! assert_eq!(result.vat_rate_values[1].gross_value, dec!(18000));
//! assert_eq!(result.summary.gross_value, dec!(29000));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, value calculator, validation |
//! | `render` | Document model and plain-text rendering |
//! | `pdf` | PDF output |
//! | `json` | JSON request decoding and base64 document encoding |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "json")]
pub mod payload;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

//! Core invoice types, the value calculator, and validation.
//!
//! This module provides the invoice data model and the exact-decimal
//! calculation of item, per-rate and grand totals.

mod builder;
mod calculator;
mod error;
mod exact;
pub mod format;
mod types;
mod validation;

pub use builder::*;
pub use calculator::*;
pub use error::*;
pub use format::{format_currency, format_decimal};
pub use types::*;
pub use validation::*;

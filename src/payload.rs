//! Request/response adapter: JSON invoice in, base64-encoded PDF out.
//!
//! Numeric item fields may be JSON numbers or decimal strings. serde_json runs
//! with `arbitrary_precision`, so numbers reach the calculator as their literal
//! text and never pass through `f64`: `0.1` is exactly one tenth and
//! `0.30000000000000001` keeps all of its digits.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use crate::core::{Invoice, InvoiceError};
use crate::render::{RenderOptions, render_pdf};

/// Decode a JSON request body into an invoice.
pub fn decode_invoice(body: &str) -> Result<Invoice, InvoiceError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "rejected invoice payload");
        InvoiceError::Payload(e.to_string())
    })
}

/// Encode rendered document bytes for transport.
pub fn encode_document(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode the request, render the invoice PDF and return it base64-encoded.
///
/// Fails whole: a malformed payload or item amount yields an error and no
/// document.
pub fn generate_invoice(body: &str, options: &RenderOptions) -> Result<String, InvoiceError> {
    let invoice = decode_invoice(body)?;
    let pdf = render_pdf(&invoice, options)?;
    info!(
        invoice = %invoice.invoice_number,
        bytes = pdf.len(),
        "generated invoice"
    );
    Ok(encode_document(&pdf))
}

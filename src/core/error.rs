use thiserror::Error;

/// Errors that can occur while calculating, building, or rendering an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A line item field could not be parsed as a decimal.
    #[error("malformed amount in item {index}, field `{field}`: {value:?}")]
    MalformedAmount {
        /// Zero-based position of the item in the input sequence.
        index: usize,
        /// Field name as it appears in the payload (e.g. "netPrice").
        field: &'static str,
        /// The offending input text.
        value: String,
    },

    /// A derived value overflowed or would need rounding to fit a `Decimal`.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document serialization failed.
    #[error("render error: {0}")]
    Render(String),

    /// The request payload could not be decoded.
    #[error("payload error: {0}")]
    Payload(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[2].netPrice").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

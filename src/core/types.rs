use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::exact;

/// Sales invoice: header fields plus the raw line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number, e.g. "1/2019".
    pub invoice_number: String,
    /// Issue date (data wystawienia).
    pub date: NaiveDate,
    /// Place of issue (miejsce wystawienia).
    pub place: String,
    /// Payment due date (termin płatności).
    pub payment_due: NaiveDate,
    /// Seller (sprzedawca).
    pub issuer: Issuer,
    /// Buyer (nabywca).
    pub receiver: Institution,
    /// Line items in presentation order.
    pub items: Vec<LineItem>,
    /// Name of the person issuing the invoice.
    #[serde(default)]
    pub created_by: String,
}

/// A party on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    /// Address lines, rendered one per line.
    pub address: Vec<String>,
    /// Tax identification number (NIP). Treated as an opaque string.
    pub nip: String,
}

/// The seller, which additionally carries bank account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issuer {
    pub name: String,
    pub address: Vec<String>,
    pub nip: String,
    /// Bank name and account number lines.
    pub account: Vec<String>,
}

/// A decimal field exactly as the caller supplied it.
///
/// Values arriving as text are kept verbatim and parsed by the calculator, so
/// a malformed field is reported against its item and field name instead of
/// failing deserialization of the whole payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDecimal {
    /// Already an exact decimal.
    Exact(Decimal),
    /// Decimal text (plain or scientific notation), not yet parsed.
    Text(String),
}

impl RawDecimal {
    /// Parse into an exact decimal. Returns `None` if the text is not a
    /// finite decimal number.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Exact(value) => Some(*value),
            Self::Text(text) => super::calculator::parse_decimal(text),
        }
    }
}

impl fmt::Display for RawDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<Decimal> for RawDecimal {
    fn from(value: Decimal) -> Self {
        Self::Exact(value)
    }
}

impl From<i32> for RawDecimal {
    fn from(value: i32) -> Self {
        Self::Exact(Decimal::from(value))
    }
}

impl From<i64> for RawDecimal {
    fn from(value: i64) -> Self {
        Self::Exact(Decimal::from(value))
    }
}

impl From<u32> for RawDecimal {
    fn from(value: u32) -> Self {
        Self::Exact(Decimal::from(value))
    }
}

impl From<u64> for RawDecimal {
    fn from(value: u64) -> Self {
        Self::Exact(Decimal::from(value))
    }
}

impl From<&str> for RawDecimal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawDecimal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for RawDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Exact(value) => Serialize::serialize(value, serializer),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

impl<'de> Deserialize<'de> for RawDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawDecimalVisitor;

        impl<'de> Visitor<'de> for RawDecimalVisitor {
            type Value = RawDecimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number or a decimal string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawDecimal, E> {
                Ok(RawDecimal::Exact(Decimal::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawDecimal, E> {
                Ok(RawDecimal::Exact(Decimal::from(v)))
            }

            // Only reached from formats that have no decimal text for the
            // number. serde_json hands non-integers to `visit_map` instead.
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawDecimal, E> {
                Ok(RawDecimal::Text(v.to_string()))
            }

            // serde_json with `arbitrary_precision` delivers every number
            // that is not a plain i64/u64 as a one-entry map holding its
            // literal text.
            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<RawDecimal, A::Error> {
                match map.next_key::<String>()? {
                    Some(key) if key == JSON_NUMBER_TOKEN => Ok(RawDecimal::Text(map.next_value()?)),
                    _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawDecimal, E> {
                Ok(RawDecimal::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RawDecimal, E> {
                Ok(RawDecimal::Text(v))
            }
        }

        deserializer.deserialize_any(RawDecimalVisitor)
    }
}

/// Raw invoice line as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    /// Quantity.
    pub amount: RawDecimal,
    /// Unit price before tax.
    pub net_price: RawDecimal,
    /// VAT rate in percent (23 means 23%).
    pub vat_percent: RawDecimal,
}

/// Net, VAT and gross amounts. Used for per-rate groups and the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceValue {
    pub net_value: Decimal,
    pub vat_value: Decimal,
    pub gross_value: Decimal,
}

impl InvoiceValue {
    pub const ZERO: Self = Self {
        net_value: Decimal::ZERO,
        vat_value: Decimal::ZERO,
        gross_value: Decimal::ZERO,
    };

    /// Elementwise exact addition. `None` if any component overflows or
    /// would need rounding.
    ///
    /// There is no `Add`/`Sum` impl. Totals go through this method or
    /// [`checked_sum`](Self::checked_sum).
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            net_value: exact::add(self.net_value, other.net_value)?,
            vat_value: exact::add(self.vat_value, other.vat_value)?,
            gross_value: exact::add(self.gross_value, other.gross_value)?,
        })
    }

    /// Exact total of `values`, starting from [`InvoiceValue::ZERO`].
    pub fn checked_sum(values: impl IntoIterator<Item = Self>) -> Option<Self> {
        values
            .into_iter()
            .try_fold(Self::ZERO, |total, value| total.checked_add(value))
    }
}

/// A line item with all derived amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedItem {
    pub description: String,
    pub amount: Decimal,
    pub net_price: Decimal,
    pub vat_percent: Decimal,
    /// `net_price × amount`.
    pub net_value: Decimal,
    /// `net_value × vat_percent ÷ 100`.
    pub vat_value: Decimal,
    /// `net_value + vat_value`.
    pub gross_value: Decimal,
}

impl CalculatedItem {
    pub fn value(&self) -> InvoiceValue {
        InvoiceValue {
            net_value: self.net_value,
            vat_value: self.vat_value,
            gross_value: self.gross_value,
        }
    }
}

/// Totals of all items sharing one VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateGroupSummary {
    pub vat_rate: Decimal,
    pub net_value: Decimal,
    pub vat_value: Decimal,
    pub gross_value: Decimal,
}

impl RateGroupSummary {
    pub fn value(&self) -> InvoiceValue {
        InvoiceValue {
            net_value: self.net_value,
            vat_value: self.vat_value,
            gross_value: self.gross_value,
        }
    }
}

/// Output of [`calculate_invoice_summary`](super::calculate_invoice_summary).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    /// Calculated items, in input order.
    pub items: Vec<CalculatedItem>,
    /// One entry per distinct VAT rate, in order of first occurrence.
    pub vat_rate_values: Vec<RateGroupSummary>,
    /// Grand total over all items.
    pub summary: InvoiceValue,
}

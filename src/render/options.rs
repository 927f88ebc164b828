use serde::{Deserialize, Serialize};

/// Rendering configuration. Every field has a default, so a partial
/// JSON/TOML object deserializes into a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub labels: Labels,
    /// Base font size in points.
    pub font_size: f32,
    /// Unit shown after each quantity, e.g. "3 szt".
    pub quantity_unit: String,
    /// Payment method shown in the header.
    pub payment_method: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            font_size: 8.0,
            quantity_unit: "szt".into(),
            payment_method: "przelew".into(),
        }
    }
}

/// Document captions. Defaults are Polish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub invoice_number: String,
    pub issue_date: String,
    pub place: String,
    pub payment_due: String,
    pub payment_method: String,
    pub seller: String,
    pub buyer: String,
    pub tax_id: String,
    pub position: String,
    pub description: String,
    pub quantity: String,
    pub net_price: String,
    pub net_value: String,
    pub vat_percent: String,
    pub vat_value: String,
    pub gross_value: String,
    /// Caption of the first per-rate row ("of which").
    pub including: String,
    /// Caption of the grand total row.
    pub total: String,
    pub amount_due: String,
    pub created_by: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            invoice_number: "Faktura numer".into(),
            issue_date: "Data wystawienia".into(),
            place: "Miejsce wystawienia".into(),
            payment_due: "Termin płatności".into(),
            payment_method: "Płatność".into(),
            seller: "Sprzedawca".into(),
            buyer: "Nabywca".into(),
            tax_id: "NIP".into(),
            position: "LP".into(),
            description: "Nazwa towaru / usługi".into(),
            quantity: "Ilość".into(),
            net_price: "Cena netto".into(),
            net_value: "Wartość netto".into(),
            vat_percent: "VAT %".into(),
            vat_value: "Wartość VAT".into(),
            gross_value: "Wartość brutto".into(),
            including: "W tym".into(),
            total: "Razem".into(),
            amount_due: "Do zapłaty".into(),
            created_by: "Imię i nazwisko wystawcy".into(),
        }
    }
}

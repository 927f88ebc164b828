use chrono::NaiveDate;

use super::calculator;
use super::error::InvoiceError;
use super::types::*;
use super::validation;

impl Invoice {
    /// Run the value calculator over this invoice's items.
    pub fn summary(&self) -> Result<InvoiceSummary, InvoiceError> {
        calculator::calculate_invoice_summary(&self.items)
    }
}

/// Builder for constructing valid invoices.
///
/// ```
/// use fakturka::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("1/2019", NaiveDate::from_ymd_opt(2019, 1, 31).unwrap())
///     .place("Gdańsk")
///     .payment_due(NaiveDate::from_ymd_opt(2019, 2, 14).unwrap())
///     .issuer(IssuerBuilder::new("Issuer Name", "1234567890")
///         .address_line("Street 1/1")
///         .account_line("12 3456 7890 1234 5678 9012 3456")
///         .build())
///     .receiver(InstitutionBuilder::new("Receiver name", "0987654321").build())
///     .add_item(LineItemBuilder::new("Nazwa usługi", dec!(1), dec!(1650), dec!(23)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.summary().unwrap().summary.gross_value, dec!(2029.50));
/// ```
pub struct InvoiceBuilder {
    invoice_number: String,
    date: NaiveDate,
    place: String,
    payment_due: Option<NaiveDate>,
    issuer: Option<Issuer>,
    receiver: Option<Institution>,
    items: Vec<LineItem>,
    created_by: String,
}

impl InvoiceBuilder {
    pub fn new(invoice_number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            date,
            place: String::new(),
            payment_due: None,
            issuer: None,
            receiver: None,
            items: Vec::new(),
            created_by: String::new(),
        }
    }

    pub fn place(mut self, place: impl Into<String>) -> Self {
        self.place = place.into();
        self
    }

    /// Defaults to the issue date.
    pub fn payment_due(mut self, date: NaiveDate) -> Self {
        self.payment_due = Some(date);
        self
    }

    pub fn issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn receiver(mut self, receiver: Institution) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn created_by(mut self, name: impl Into<String>) -> Self {
        self.created_by = name.into();
        self
    }

    /// Build the invoice and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        if self.items.len() > 10_000 {
            return Err(InvoiceError::Builder(
                "invoice cannot have more than 10,000 line items".into(),
            ));
        }
        if self.invoice_number.len() > 200 {
            return Err(InvoiceError::Builder(
                "invoice number cannot exceed 200 characters".into(),
            ));
        }

        let invoice = self.build_unchecked()?;

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(InvoiceError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without validation. Negative amounts (credit lines) pass through.
    pub fn build_unchecked(self) -> Result<Invoice, InvoiceError> {
        let issuer = self
            .issuer
            .ok_or_else(|| InvoiceError::Builder("issuer is required".into()))?;
        let receiver = self
            .receiver
            .ok_or_else(|| InvoiceError::Builder("receiver is required".into()))?;

        Ok(Invoice {
            invoice_number: self.invoice_number,
            date: self.date,
            place: self.place,
            payment_due: self.payment_due.unwrap_or(self.date),
            issuer,
            receiver,
            items: self.items,
            created_by: self.created_by,
        })
    }
}

/// Builder for the receiving party.
pub struct InstitutionBuilder {
    name: String,
    address: Vec<String>,
    nip: String,
}

impl InstitutionBuilder {
    pub fn new(name: impl Into<String>, nip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Vec::new(),
            nip: nip.into(),
        }
    }

    pub fn address_line(mut self, line: impl Into<String>) -> Self {
        self.address.push(line.into());
        self
    }

    pub fn build(self) -> Institution {
        Institution {
            name: self.name,
            address: self.address,
            nip: self.nip,
        }
    }
}

/// Builder for the issuing party.
pub struct IssuerBuilder {
    name: String,
    address: Vec<String>,
    nip: String,
    account: Vec<String>,
}

impl IssuerBuilder {
    pub fn new(name: impl Into<String>, nip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Vec::new(),
            nip: nip.into(),
            account: Vec::new(),
        }
    }

    pub fn address_line(mut self, line: impl Into<String>) -> Self {
        self.address.push(line.into());
        self
    }

    /// Bank name, account number and similar lines.
    pub fn account_line(mut self, line: impl Into<String>) -> Self {
        self.account.push(line.into());
        self
    }

    pub fn build(self) -> Issuer {
        Issuer {
            name: self.name,
            address: self.address,
            nip: self.nip,
            account: self.account,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: String,
    amount: RawDecimal,
    net_price: RawDecimal,
    vat_percent: RawDecimal,
}

impl LineItemBuilder {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<RawDecimal>,
        net_price: impl Into<RawDecimal>,
        vat_percent: impl Into<RawDecimal>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            net_price: net_price.into(),
            vat_percent: vat_percent.into(),
        }
    }

    pub fn amount(mut self, amount: impl Into<RawDecimal>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn net_price(mut self, price: impl Into<RawDecimal>) -> Self {
        self.net_price = price.into();
        self
    }

    pub fn vat_percent(mut self, rate: impl Into<RawDecimal>) -> Self {
        self.vat_percent = rate.into();
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            amount: self.amount,
            net_price: self.net_price,
            vat_percent: self.vat_percent,
        }
    }
}

use chrono::NaiveDate;
use fakturka::core::*;
use fakturka::render::{RenderOptions, build_document};
use rust_decimal_macros::dec;

fn main() {
    // Two VAT rates, presented in the order they first appear
    let invoice = InvoiceBuilder::new("7/2019", NaiveDate::from_ymd_opt(2019, 3, 1).unwrap())
        .place("Gdańsk")
        .payment_due(NaiveDate::from_ymd_opt(2019, 3, 15).unwrap())
        .issuer(
            IssuerBuilder::new("Issuer Name", "1234567890")
                .address_line("Street 1/1")
                .address_line("00-000 Warszawa, Polska")
                .account_line("bankName")
                .account_line("12 3456 7890 1234 5678 9012 3456")
                .build(),
        )
        .receiver(
            InstitutionBuilder::new("Receiver name", "0987654321")
                .address_line("Street 1/2")
                .address_line("00-000 Warszawa, Polska")
                .build(),
        )
        .add_item(LineItemBuilder::new("Książka", dec!(3), dec!(42.50), dec!(5)).build())
        .add_item(LineItemBuilder::new("Wdrożenie", dec!(12), dec!(150), dec!(23)).build())
        .add_item(LineItemBuilder::new("Dostawa", "1", "19.99", "23").build())
        .created_by("Jan Kowalski")
        .build()
        .expect("invoice should be valid");

    let summary = invoice.summary().expect("amounts are well-formed");
    println!("Invoice: {}", invoice.invoice_number);
    println!("Date:    {}", invoice.date);
    println!("Seller:  {}", invoice.issuer.name);
    println!("Buyer:   {}", invoice.receiver.name);
    println!("---");
    for item in &summary.items {
        println!(
            "  {} x {} @ {} = {} (+{}% VAT)",
            format_decimal(item.amount),
            item.description,
            format_currency(item.net_price),
            format_currency(item.net_value),
            format_decimal(item.vat_percent),
        );
    }
    println!("---");
    for group in &summary.vat_rate_values {
        println!(
            "  {:>3}%: net {} vat {} gross {}",
            format_decimal(group.vat_rate),
            format_currency(group.net_value),
            format_currency(group.vat_value),
            format_currency(group.gross_value),
        );
    }
    println!("Net:     {}", format_currency(summary.summary.net_value));
    println!("VAT:     {}", format_currency(summary.summary.vat_value));
    println!("Gross:   {}", format_currency(summary.summary.gross_value));

    println!();
    let document = build_document(&invoice, &RenderOptions::default()).expect("layout");
    print!("{}", document.to_plain_text());
}

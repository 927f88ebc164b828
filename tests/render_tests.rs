#![cfg(feature = "pdf")]

use chrono::NaiveDate;
use fakturka::core::*;
use fakturka::render::{self, Block, RenderOptions};
use lopdf::content::Content;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_invoice(items: Vec<LineItem>) -> Invoice {
    let mut builder = InvoiceBuilder::new("1/2019", date(2019, 1, 31))
        .place("Gdańsk")
        .payment_due(date(2019, 2, 14))
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
        .created_by("Jan Kowalski");
    for item in items {
        builder = builder.add_item(item);
    }
    builder.build().unwrap()
}

fn sample_items() -> Vec<LineItem> {
    vec![
        LineItemBuilder::new("Nazwa usługi", dec!(1), dec!(1650), dec!(23)).build(),
        LineItemBuilder::new("Nazwa usługi2", dec!(2), dec!(850), dec!(23)).build(),
    ]
}

/// All strings drawn with `Tj` on every page, in order.
fn drawn_strings(pdf: &[u8]) -> Vec<Vec<String>> {
    let doc = lopdf::Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .map(|op| {
                    String::from_utf8_lossy(op.operands[0].as_str().unwrap()).into_owned()
                })
                .collect()
        })
        .collect()
}

#[test]
fn pdf_starts_with_header() {
    let pdf = render::render_pdf(&test_invoice(sample_items()), &RenderOptions::default()).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.5"));
}

#[test]
fn pdf_contains_items_and_totals() {
    let pdf = render::render_pdf(&test_invoice(sample_items()), &RenderOptions::default()).unwrap();
    let pages = drawn_strings(&pdf);

    assert_eq!(pages.len(), 1);
    let strings = &pages[0];
    for expected in [
        "Faktura numer ",
        "1/2019",
        "Sprzedawca",
        "Razem",
        "W tym",
        "3350.00",
        "770.50",
        "4120.50",
        "2 szt",
        "Jan Kowalski",
    ] {
        assert!(
            strings.iter().any(|s| s == expected),
            "missing {expected:?} in {strings:?}"
        );
    }
    // Polish diacritics are transliterated for the standard fonts.
    assert!(strings.iter().any(|s| s == "Nazwa uslugi"));
}

#[test]
fn long_invoice_breaks_across_pages() {
    let items = (1..=120)
        .map(|i| LineItemBuilder::new(format!("Pozycja {i}"), 1, 10, 23).build())
        .collect();
    let pdf = render::render_pdf(&test_invoice(items), &RenderOptions::default()).unwrap();
    let pages = drawn_strings(&pdf);

    assert!(pages.len() > 1);
    let last = pages.last().unwrap();
    assert!(last.iter().any(|s| s == "Jan Kowalski"));
    // Every row number is drawn exactly once.
    let all: Vec<&String> = pages.iter().flatten().collect();
    assert_eq!(all.iter().filter(|s| s.as_str() == "120").count(), 1);
}

#[test]
fn document_blocks_in_order() {
    let doc = render::build_document(&test_invoice(sample_items()), &RenderOptions::default())
        .unwrap();

    let kinds: Vec<&str> = doc
        .blocks
        .iter()
        .map(|b| match b {
            Block::Line(_) => "line",
            Block::Rule => "rule",
            Block::Table(_) => "table",
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "line", "line", "line", "line", "line", "rule", "table", "table", "table", "rule",
            "line", "rule", "line", "line",
        ]
    );
    assert_eq!(doc.font_size, 8.0);
}

#[test]
fn malformed_amount_produces_no_pdf() {
    let mut invoice = test_invoice(sample_items());
    invoice.items[1].amount = "dwa".into();

    let err = render::render_pdf(&invoice, &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        InvoiceError::MalformedAmount {
            index: 1,
            field: "amount",
            ..
        }
    ));
}

use tracing::info;

use super::document::*;
use super::options::{Labels, RenderOptions};
use crate::core::{
    InvoiceError, Invoice, InvoiceSummary, InvoiceValue, format_currency, format_decimal,
};

const ITEM_COLUMN_WIDTHS: [u8; 8] = [3, 39, 5, 12, 12, 5, 12, 12];

/// Calculate the invoice and lay it out as a [`Document`].
///
/// Order of blocks: header lines, parties, items table (items, per-rate rows,
/// total row), totals table, amount due, issuer signature.
pub fn build_document(invoice: &Invoice, options: &RenderOptions) -> Result<Document, InvoiceError> {
    let summary = invoice.summary()?;
    let labels = &options.labels;

    info!(
        invoice = %invoice.invoice_number,
        items = summary.items.len(),
        rates = summary.vat_rate_values.len(),
        "building invoice document"
    );

    let blocks = vec![
        header_line(&format!("{} ", labels.invoice_number), &invoice.invoice_number),
        header_line(&format!("{}: ", labels.issue_date), &invoice.date.to_string()),
        header_line(&format!("{}: ", labels.place), &invoice.place),
        header_line(&format!("{}: ", labels.payment_due), &invoice.payment_due.to_string()),
        header_line(&format!("{}: ", labels.payment_method), &options.payment_method),
        Block::Rule,
        Block::Table(parties_table(invoice, labels)),
        Block::Table(items_table(&summary, options)),
        Block::Table(totals_table(&summary.summary, labels)),
        Block::Rule,
        header_line(
            &format!("{} ", labels.amount_due),
            &format_currency(summary.summary.gross_value),
        ),
        Block::Rule,
        Block::Line(vec![Span::bold(format!("{}:", labels.created_by))]),
        Block::Line(vec![Span::plain(invoice.created_by.clone())]),
    ];

    Ok(Document {
        blocks,
        font_size: options.font_size,
    })
}

fn header_line(label: &str, value: &str) -> Block {
    Block::Line(vec![Span::bold(label), Span::plain(value)])
}

fn parties_table(invoice: &Invoice, labels: &Labels) -> Table {
    let issuer = &invoice.issuer;
    let receiver = &invoice.receiver;

    Table {
        widths: vec![50, 50],
        bordered: false,
        rows: vec![
            vec![Cell::new(&labels.seller).bold(), Cell::new(&labels.buyer).bold()],
            vec![Cell::new(&issuer.name), Cell::new(&receiver.name)],
            vec![
                Cell::new(issuer.address.join("\n")),
                Cell::new(receiver.address.join("\n")),
            ],
            vec![
                Cell::new(format!("{}: {}", labels.tax_id, issuer.nip)),
                Cell::new(format!("{}: {}", labels.tax_id, receiver.nip)),
            ],
            vec![Cell::new(issuer.account.join("\n")), Cell::empty()],
        ],
    }
}

fn items_table(summary: &InvoiceSummary, options: &RenderOptions) -> Table {
    let labels = &options.labels;

    let header = vec![
        Cell::new(&labels.position).right(),
        Cell::new(&labels.description),
        Cell::new(&labels.quantity).right(),
        Cell::new(&labels.net_price).right(),
        Cell::new(&labels.net_value).right(),
        Cell::new(&labels.vat_percent).right(),
        Cell::new(&labels.vat_value).right(),
        Cell::new(&labels.gross_value).right(),
    ];

    let item_rows = summary.items.iter().enumerate().map(|(index, item)| {
        vec![
            Cell::new((index + 1).to_string()).right(),
            Cell::new(&item.description),
            Cell::new(format!(
                "{} {}",
                format_decimal(item.amount),
                options.quantity_unit
            ))
            .right(),
            Cell::new(format_currency(item.net_price)).right(),
            Cell::new(format_currency(item.net_value)).right(),
            Cell::new(format_decimal(item.vat_percent)).right(),
            Cell::new(format_currency(item.vat_value)).right(),
            Cell::new(format_currency(item.gross_value)).right(),
        ]
    });

    let rate_rows = summary
        .vat_rate_values
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let caption = if index == 0 {
                Cell::new(&labels.including).right()
            } else {
                Cell::empty()
            };
            vec![
                Cell::empty(),
                Cell::empty(),
                Cell::empty(),
                caption,
                Cell::new(format_currency(group.net_value)).right(),
                Cell::new(format_decimal(group.vat_rate)).right(),
                Cell::new(format_currency(group.vat_value)).right(),
                Cell::new(format_currency(group.gross_value)).right(),
            ]
        });

    let total = &summary.summary;
    let total_row = vec![
        Cell::empty(),
        Cell::empty(),
        Cell::empty(),
        Cell::new(&labels.total).bold().right(),
        Cell::new(format_currency(total.net_value)).right(),
        Cell::new(""),
        Cell::new(format_currency(total.vat_value)).right(),
        Cell::new(format_currency(total.gross_value)).right(),
    ];

    let mut rows = vec![header];
    rows.extend(item_rows);
    rows.extend(rate_rows);
    rows.push(total_row);

    Table {
        widths: ITEM_COLUMN_WIDTHS.to_vec(),
        bordered: true,
        rows,
    }
}

fn totals_table(total: &InvoiceValue, labels: &Labels) -> Table {
    Table {
        widths: vec![20, 20],
        bordered: false,
        rows: vec![
            vec![
                Cell::new(&labels.net_value).bold(),
                Cell::new(format_currency(total.net_value)),
            ],
            vec![
                Cell::new(&labels.vat_value).bold(),
                Cell::new(format_currency(total.vat_value)),
            ],
            vec![
                Cell::new(&labels.gross_value).bold(),
                Cell::new(format_currency(total.gross_value)),
            ],
        ],
    }
}

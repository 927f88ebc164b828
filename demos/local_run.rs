//! Render the sample request body to `invoice.pdf` in the working directory.
//!
//! Run with: `RUST_LOG=debug cargo run --example local_run --features json`

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use fakturka::payload;
use fakturka::render::RenderOptions;
use tracing_subscriber::EnvFilter;

const REQUEST: &str = r#"{
    "date": "2019-01-31",
    "invoiceNumber": "1/2019",
    "issuer": {
        "account": ["bankName", "12 3456 7890 1234 5678 9012 3456"],
        "address": ["Street 1/1", "00-000 Warszawa, Polska"],
        "name": "Issuer Name",
        "nip": "1234567890"
    },
    "paymentDue": "2019-02-14",
    "place": "Gdańsk",
    "receiver": {
        "address": ["Street 1/2", "00-000 Warszawa, Polska"],
        "name": "Receiver name",
        "nip": "0987654321"
    },
    "items": [
        { "description": "Nazwa usługi", "amount": 1, "netPrice": 1650, "vatPercent": 23 },
        { "description": "Nazwa usługi2", "amount": 2, "netPrice": 850, "vatPercent": 23 }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let encoded = payload::generate_invoice(REQUEST, &RenderOptions::default())?;
    let pdf = STANDARD.decode(encoded)?;

    std::fs::write("invoice.pdf", &pdf)?;
    println!("finished writing invoice.pdf file ({} bytes)", pdf.len());
    Ok(())
}

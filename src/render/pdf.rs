//! PDF serialization of a [`Document`] using the standard Helvetica fonts.

use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};
use tracing::info;

use super::document::*;
use super::layout::build_document;
use super::options::RenderOptions;
use crate::core::{Invoice, InvoiceError};

/// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const CELL_PADDING: f32 = 2.0;
const RULE_HEIGHT: f32 = 10.0;

/// Build the invoice document and serialize it to PDF bytes.
pub fn render_pdf(invoice: &Invoice, options: &RenderOptions) -> Result<Vec<u8>, InvoiceError> {
    let document = build_document(invoice, options)?;
    write_pdf(&document)
}

/// Serialize a document to PDF. Content that does not fit on one A4 page
/// continues on the next; table rows are never split.
pub fn write_pdf(document: &Document) -> Result<Vec<u8>, InvoiceError> {
    let mut writer = PageWriter::new(document.font_size);
    for block in &document.blocks {
        match block {
            Block::Line(spans) => writer.line(spans),
            Block::Rule => writer.rule(),
            Block::Table(table) => writer.table(table),
        }
    }
    let pages = writer.finish();
    let page_count = pages.len();

    let bytes = assemble(pages)?;
    info!(pages = page_count, bytes = bytes.len(), "wrote invoice PDF");
    Ok(bytes)
}

struct PageWriter {
    font_size: f32,
    line_height: f32,
    /// Top of the free area on the current page.
    y: f32,
    current: Vec<Operation>,
    pages: Vec<Vec<Operation>>,
}

impl PageWriter {
    fn new(font_size: f32) -> Self {
        Self {
            font_size,
            line_height: font_size * 1.4,
            y: PAGE_HEIGHT - MARGIN,
            current: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Start a new page unless `height` still fits on the current one.
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, spans: &[Span]) {
        self.reserve(self.line_height);
        let baseline = self.y - self.font_size;
        let mut x = MARGIN;
        for span in spans {
            self.text(x, baseline, &span.text, span.bold);
            x += text_width(&span.text, self.font_size);
        }
        self.y -= self.line_height;
    }

    fn rule(&mut self) {
        self.reserve(RULE_HEIGHT);
        let y = self.y - RULE_HEIGHT / 2.0;
        self.current.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "RG",
                vec![Object::Real(0.5), Object::Real(0.5), Object::Real(0.5)],
            ),
            Operation::new("w", vec![Object::Real(1.0)]),
            Operation::new("m", vec![Object::Real(MARGIN), Object::Real(y)]),
            Operation::new(
                "l",
                vec![Object::Real(MARGIN + CONTENT_WIDTH), Object::Real(y)],
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
        self.y -= RULE_HEIGHT;
    }

    fn table(&mut self, table: &Table) {
        let mut columns = Vec::with_capacity(table.widths.len());
        let mut x = MARGIN;
        for percent in &table.widths {
            let width = CONTENT_WIDTH * f32::from(*percent) / 100.0;
            columns.push((x, width));
            x += width;
        }

        for row in &table.rows {
            let lines = row
                .iter()
                .map(|c| c.text.lines().count())
                .max()
                .unwrap_or(0)
                .max(1);
            let height = lines as f32 * self.line_height + 2.0 * CELL_PADDING;
            self.reserve(height);

            for (cell, &(x, width)) in row.iter().zip(&columns) {
                if table.bordered && cell.border {
                    self.rect(x, self.y - height, width, height);
                }
                for (n, text) in cell.text.lines().enumerate() {
                    let baseline =
                        self.y - CELL_PADDING - self.font_size - n as f32 * self.line_height;
                    let tx = match cell.align {
                        Align::Left => x + CELL_PADDING,
                        Align::Right => {
                            x + width - CELL_PADDING - text_width(text, self.font_size)
                        }
                    };
                    self.text(tx, baseline, text, cell.bold);
                }
            }
            self.y -= height;
        }
        self.y -= self.line_height / 2.0;
    }

    fn text(&mut self, x: f32, baseline: f32, text: &str, bold: bool) {
        if text.is_empty() {
            return;
        }
        let font = if bold { "F2" } else { "F1" };
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), Object::Real(self.font_size)],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(baseline)]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.current.extend([
            Operation::new("w", vec![Object::Real(0.5)]),
            Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(y),
                    Object::Real(width),
                    Object::Real(height),
                ],
            ),
            Operation::new("S", vec![]),
        ]);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(font_dictionary("Helvetica"));
    let bold = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| InvoiceError::Render(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("fakturka"),
    });
    doc.trailer.set("Info", info_id);

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Render(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode text for a WinAnsiEncoding font. Polish letters outside the code
/// page lose their diacritics; anything else unmappable becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '„' => 0x84,
            '…' => 0x85,
            'Š' => 0x8a,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            'š' => 0x9a,
            'ž' => 0x9e,
            'ą' => b'a',
            'Ą' => b'A',
            'ć' => b'c',
            'Ć' => b'C',
            'ę' => b'e',
            'Ę' => b'E',
            'ł' => b'l',
            'Ł' => b'L',
            'ń' => b'n',
            'Ń' => b'N',
            'ś' => b's',
            'Ś' => b'S',
            'ź' | 'ż' => b'z',
            'Ź' | 'Ż' => b'Z',
            _ => b'?',
        })
        .collect()
}

/// Helvetica advance widths for ' '..='~', in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width of `text` in points. Bold text is measured with regular metrics.
fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| match b {
            b' '..=b'~' => u32::from(HELVETICA_WIDTHS[usize::from(b - b' ')]),
            _ => 556,
        })
        .sum();
    units as f32 * font_size / 1000.0
}

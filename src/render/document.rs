use serde::{Deserialize, Serialize};

/// Layout-agnostic invoice document: a vertical sequence of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
    /// Base font size in points.
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A single line of text made of differently styled runs.
    Line(Vec<Span>),
    /// Horizontal separator.
    Rule,
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Table cell. Text may span several lines separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub bold: bool,
    pub align: Align,
    /// Draw a border around this cell (bordered tables only).
    pub border: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            align: Align::Left,
            border: true,
        }
    }

    /// Borderless empty filler cell.
    pub fn empty() -> Self {
        Self {
            border: false,
            ..Self::new("")
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column widths in percent of the content width.
    pub widths: Vec<u8>,
    pub bordered: bool,
    pub rows: Vec<Vec<Cell>>,
}

const RULE_WIDTH: usize = 72;

impl Document {
    /// Render as fixed-width plain text, one block after another.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Line(spans) => {
                    for span in spans {
                        out.push_str(&span.text);
                    }
                    out.push('\n');
                }
                Block::Rule => {
                    out.push_str(&"-".repeat(RULE_WIDTH));
                    out.push('\n');
                }
                Block::Table(table) => write_table(table, &mut out),
            }
        }
        out
    }
}

fn write_table(table: &Table, out: &mut String) {
    let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            let widest = cell.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            widths[i] = widths[i].max(widest);
        }
    }

    let separator = if table.bordered { " | " } else { "   " };
    for row in &table.rows {
        let height = row
            .iter()
            .map(|c| c.text.lines().count())
            .max()
            .unwrap_or(0)
            .max(1);
        for line_no in 0..height {
            let mut line = String::new();
            for (i, &width) in widths.iter().enumerate() {
                if i > 0 {
                    line.push_str(separator);
                }
                let (text, align) = row
                    .get(i)
                    .map(|c| (c.text.lines().nth(line_no).unwrap_or(""), c.align))
                    .unwrap_or(("", Align::Left));
                match align {
                    Align::Left => line.push_str(&format!("{text:<width$}")),
                    Align::Right => line.push_str(&format!("{text:>width$}")),
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
}

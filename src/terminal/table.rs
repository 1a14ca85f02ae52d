use console::{measure_text_width, pad_str, Alignment};

use super::LineWriter;

/// A bordered text table. Cells may contain styled text, widths are measured without
/// the escape codes.
pub struct Table {
    header: Vec<String>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|cell| cell.to_string()).collect(),
            alignments: vec![Alignment::Left; header.len()],
            rows: Vec::new(),
        }
    }

    pub fn align(mut self, column: usize, alignment: Alignment) -> Self {
        if let Some(entry) = self.alignments.get_mut(column) {
            *entry = alignment;
        }
        self
    }

    /// Adds a row. Missing cells are left empty, surplus cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row = row;
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    pub fn print(&self, writer: &impl LineWriter) {
        let widths = self.column_widths();
        let separator = separator_line(&widths);

        writer.write_line(&separator);
        writer.write_line(&self.format_row(&self.header, &widths, true));
        writer.write_line(&separator);
        for row in &self.rows {
            writer.write_line(&self.format_row(row, &widths, false));
        }
        writer.write_line(&separator);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .header
            .iter()
            .map(|cell| measure_text_width(cell))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        widths
    }

    fn format_row(&self, row: &[String], widths: &[usize], is_header: bool) -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .zip(&self.alignments)
            .map(|((cell, width), alignment)| {
                let alignment = if is_header { Alignment::Left } else { *alignment };
                pad_str(cell, *width, alignment, None).into_owned()
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    }
}

fn separator_line(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
    format!("+{}+", dashes.join("+"))
}

//! Plain-text invoice layout.
//!
//! Example page:
//! ```text
//! Studio
//! 1 Main St
//! me@studio.dev
//!
//! BILL TO: Acme (a@x.com)
//!
//! +------------+------------------------------------------+-------+------------+------------+
//! | Date       | Task                                     |  Hrs  |    Rate    |   Total    |
//! +------------+------------------------------------------+-------+------------+------------+
//! | 2024-01-15 | Site: Design                             | 10.0  |   $50.00   |  $500.00   |
//! +------------+------------------------------------------+-------+------------+------------+
//!
//!                                                                          TOTAL DUE: $500.00
//!
//!                                                                                 Page 1 of 1
//! ```

use super::document::{InvoiceDocument, InvoiceRow, COLUMNS};
use super::InvoiceRenderer;

const DEFAULT_ROWS_PER_PAGE: usize = 40;
const PAGE_BREAK: char = '\u{000C}';

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// Minimum width and alignment per column. Only the description column is
/// capped at its width; the others grow to the widest cell on the document.
const LAYOUT: [(usize, Align); 5] = [
    (10, Align::Left),
    (40, Align::Left),
    (5, Align::Center),
    (10, Align::Center),
    (10, Align::Center),
];
const DESCRIPTION: usize = 1;

/// Renders invoices as fixed-width text pages separated by form feeds.
///
/// The issuer and bill-to blocks appear on the first page, the total on the
/// last. Every page repeats the column header and ends with `Page N of M`.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    rows_per_page: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl TextRenderer {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
        }
    }

    pub fn render_text(&self, doc: &InvoiceDocument) -> String {
        let pages: Vec<&[InvoiceRow]> = if doc.rows.is_empty() {
            vec![&doc.rows[..]]
        } else {
            doc.rows.chunks(self.rows_per_page).collect()
        };
        let page_count = pages.len();
        let widths = column_widths(doc);
        let width = table_width(&widths);

        let mut rendered = Vec::with_capacity(page_count);
        for (index, rows) in pages.into_iter().enumerate() {
            let mut out = String::new();

            if index == 0 {
                push_line(&mut out, &doc.issuer.name);
                push_line(&mut out, &doc.issuer.address);
                push_line(&mut out, &doc.issuer.email);
                push_line(&mut out, "");
                push_line(&mut out, &doc.bill_to);
                push_line(&mut out, "");
            }

            let border = border_line(&widths);
            push_line(&mut out, &border);
            push_line(&mut out, &table_line(COLUMNS, &widths));
            push_line(&mut out, &border);
            for row in rows {
                push_line(&mut out, &table_line(row.cells(), &widths));
            }
            push_line(&mut out, &border);

            if index + 1 == page_count {
                push_line(&mut out, "");
                push_line(&mut out, &format!("{:>width$}", doc.total_due));
            }

            push_line(&mut out, "");
            let footer = format!("Page {} of {}", index + 1, page_count);
            push_line(&mut out, &format!("{:>width$}", footer));

            rendered.push(out);
        }

        rendered.join(&PAGE_BREAK.to_string())
    }
}

impl InvoiceRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &InvoiceDocument) -> Vec<u8> {
        self.render_text(document).into_bytes()
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn column_widths(doc: &InvoiceDocument) -> [usize; 5] {
    let mut widths = LAYOUT.map(|(w, _)| w);
    let cells = std::iter::once(COLUMNS).chain(doc.rows.iter().map(InvoiceRow::cells));
    for row in cells {
        for (i, cell) in row.into_iter().enumerate() {
            if i != DESCRIPTION {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }
    widths
}

fn table_width(widths: &[usize; 5]) -> usize {
    widths.iter().map(|w| w + 3).sum::<usize>() + 1
}

fn border_line(widths: &[usize; 5]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn table_line(cells: [&str; 5], widths: &[usize; 5]) -> String {
    let mut line = String::from("|");
    for (i, cell) in cells.into_iter().enumerate() {
        let w = widths[i];
        let text = if i == DESCRIPTION {
            fit(cell, w)
        } else {
            cell.to_string()
        };
        let padded = match LAYOUT[i].1 {
            Align::Left => format!("{:<w$}", text),
            Align::Center => format!("{:^w$}", text),
        };
        line.push(' ');
        line.push_str(&padded);
        line.push_str(" |");
    }
    line
}

/// Truncate to `width` characters, marking the cut with `~`.
fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::IssuerBlock;

    fn row(n: usize) -> InvoiceRow {
        InvoiceRow {
            date: "2024-01-15".to_string(),
            description: format!("Site: Task {n}"),
            hours: "1.0".to_string(),
            rate: "$10.00".to_string(),
            total: "$10.00".to_string(),
        }
    }

    fn doc(rows: usize) -> InvoiceDocument {
        InvoiceDocument {
            issuer: IssuerBlock {
                name: "Studio".to_string(),
                address: "1 Main St".to_string(),
                email: "me@studio.dev".to_string(),
            },
            bill_to: "BILL TO: Acme (a@x.com)".to_string(),
            rows: (1..=rows).map(row).collect(),
            total_due: format!("TOTAL DUE: ${}.00", rows * 10),
        }
    }

    #[test]
    fn test_single_page_contains_all_sections() {
        let text = TextRenderer::default().render_text(&doc(2));

        assert!(text.starts_with(
            "Studio\n1 Main St\nme@studio.dev\n\nBILL TO: Acme (a@x.com)\n"
        ));
        assert!(text.contains("| 2024-01-15 | Site: Task 1 "));
        assert!(text.trim_end().ends_with("Page 1 of 1"));
        assert!(text.contains("TOTAL DUE: $20.00"));
        assert!(!text.contains(PAGE_BREAK));
    }

    #[test]
    fn test_lines_are_table_width() {
        let text = TextRenderer::default().render_text(&doc(1));
        let widths = column_widths(&doc(1));
        let header = text.lines().find(|l| l.starts_with("| Date")).unwrap();
        assert_eq!(header.chars().count(), table_width(&widths));
        assert_eq!(border_line(&widths).len(), table_width(&widths));
        assert_eq!(table_width(&widths), 91);
    }

    #[test]
    fn test_wide_numbers_are_never_cut() {
        let mut wide = doc(1);
        wide.rows.push(InvoiceRow {
            date: "2024-01-01".to_string(),
            description: "Site: Build".to_string(),
            hours: "100.25".to_string(),
            rate: "$1,250.00".to_string(),
            total: "$125,312.50".to_string(),
        });
        let text = TextRenderer::default().render_text(&wide);

        let row = text.lines().find(|l| l.contains("Site: Build")).unwrap();
        assert!(row.contains(" 100.25 "));
        assert!(row.contains(" $1,250.00 "));
        assert!(row.contains(" $125,312.50 "));
        assert!(!row.contains('~'));

        let table: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .collect();
        assert!(table.iter().all(|l| l.chars().count() == table[0].chars().count()));
    }

    #[test]
    fn test_paginates_and_keeps_row_order() {
        let text = TextRenderer::new(2).render_text(&doc(5));
        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("BILL TO"));
        assert!(!pages[1].contains("BILL TO"));
        assert!(pages[1].contains("| Date"));
        assert!(pages[2].contains("Task 5"));
        assert!(pages[2].contains("TOTAL DUE: $50.00"));
        assert!(!pages[0].contains("TOTAL DUE"));
        assert!(pages[1].contains("Page 2 of 3"));

        let order: Vec<usize> = (1..=5)
            .map(|n| text.find(&format!("Task {n} ")).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_long_description_is_truncated() {
        assert_eq!(fit("abcdef", 4), "abc~");
        assert_eq!(fit("abc", 4), "abc");

        let mut long = doc(1);
        long.rows[0].description = "x".repeat(60);
        let text = TextRenderer::default().render_text(&long);
        assert!(text.contains(&format!("| {}~ |", "x".repeat(39))));
    }
}

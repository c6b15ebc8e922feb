//! A4 PDF invoice layout.
//!
//! Issuer in bold at the top, then the bill-to line, a bordered table with a
//! shaded header row, and the bold total right-aligned under the table.
//! Every page repeats the table header and carries a `Page N of M` footer.
//! Text uses the standard Helvetica fonts, so nothing is embedded.

use std::ops::Range;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::document::{InvoiceDocument, InvoiceRow, COLUMNS};
use super::InvoiceRenderer;

const DEFAULT_ROWS_PER_PAGE: usize = 40;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

// Page geometry, in millimetres from the top-left corner.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 20.0;
const FIRST_TABLE_TOP: f32 = MARGIN + 45.0;
const ROW_HEIGHT: f32 = 10.0;
const TOTAL_HEIGHT: f32 = 15.0;
const CELL_PADDING: f32 = 1.0;

const TABLE: [(f32, Align); 5] = [
    (30.0, Align::Left),
    (90.0, Align::Left),
    (20.0, Align::Center),
    (25.0, Align::Center),
    (25.0, Align::Center),
];
const DESCRIPTION: usize = 1;
const HEADER_GRAY: f32 = 200.0 / 255.0;

/// Helvetica advance widths for `' '..='~'`, in thousandths of the font size.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Renders invoices as PDF pages.
///
/// Rows flow onto a new page when the current one is full, or after
/// `rows_per_page` rows, whichever comes first.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    rows_per_page: usize,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl PdfRenderer {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Row ranges per page. A trailing empty range holds the total when it
    /// does not fit under the last rows.
    fn paginate(&self, row_count: usize) -> Vec<Range<usize>> {
        let mut pages = Vec::new();
        let mut start = 0;
        loop {
            let top = table_top(pages.is_empty());
            let room = ((BOTTOM_LIMIT - top - ROW_HEIGHT) / ROW_HEIGHT) as usize;
            let end = (start + room.min(self.rows_per_page).max(1)).min(row_count);
            pages.push(start..end);
            start = end;
            if start >= row_count {
                break;
            }
        }

        let last = pages.len() - 1;
        let used = ROW_HEIGHT * (1 + pages[last].len()) as f32;
        if table_top(last == 0) + used + TOTAL_HEIGHT > BOTTOM_LIMIT {
            pages.push(row_count..row_count);
        }
        pages
    }

    pub fn render_pdf(&self, doc: &InvoiceDocument) -> Vec<u8> {
        let pages = self.paginate(doc.rows.len());
        let page_count = pages.len();

        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let page_ids: Vec<Ref> = (0..page_count).map(|i| Ref::new(5 + 2 * i as i32)).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().copied())
            .count(page_count as i32);
        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for (index, rows) in pages.into_iter().enumerate() {
            let page_id = page_ids[index];
            let content_id = Ref::new(6 + 2 * index as i32);
            {
                let mut page = pdf.page(page_id);
                page.media_box(Rect::new(0.0, 0.0, pt(PAGE_WIDTH), pt(PAGE_HEIGHT)));
                page.parent(tree_id);
                page.contents(content_id);
                page.resources()
                    .fonts()
                    .pair(REGULAR, regular_id)
                    .pair(BOLD, bold_id);
            }

            let mut canvas = Canvas::new();
            let first = index == 0;
            if first {
                canvas.issuer(doc);
            }
            let rows = &doc.rows[rows];
            let mut y = table_top(first);
            if first || !rows.is_empty() {
                y = canvas.table(rows, y);
            }
            if index + 1 == page_count {
                canvas.total(&doc.total_due, y + TOTAL_HEIGHT - ROW_HEIGHT);
            }
            canvas.footer(index + 1, page_count);

            pdf.stream(content_id, &canvas.content.finish());
        }

        pdf.finish()
    }
}

impl InvoiceRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &InvoiceDocument) -> Vec<u8> {
        self.render_pdf(document)
    }
}

fn table_top(first_page: bool) -> f32 {
    if first_page {
        FIRST_TABLE_TOP
    } else {
        MARGIN
    }
}

/// Content stream writer working in top-left millimetres.
struct Canvas {
    content: Content,
}

impl Canvas {
    fn new() -> Self {
        Self {
            content: Content::new(),
        }
    }

    fn issuer(&mut self, doc: &InvoiceDocument) {
        let width = PAGE_WIDTH - 2.0 * MARGIN;
        let mut y = MARGIN;
        self.text_cell(MARGIN, y, width, 10.0, &doc.issuer.name, BOLD, 14.0, Align::Left);
        y += 10.0;
        for line in [&doc.issuer.address, &doc.issuer.email] {
            self.text_cell(MARGIN, y, width, 5.0, line, REGULAR, 10.0, Align::Left);
            y += 5.0;
        }
        y += 10.0;
        self.text_cell(MARGIN, y, width, 10.0, &doc.bill_to, BOLD, 11.0, Align::Left);
    }

    /// Header row plus `rows`, starting at `top`. Returns the y below the table.
    fn table(&mut self, rows: &[InvoiceRow], top: f32) -> f32 {
        let mut x = MARGIN;
        for (title, (w, _)) in COLUMNS.into_iter().zip(TABLE) {
            self.border(x, top, w, ROW_HEIGHT, true);
            self.text_cell(x, top, w, ROW_HEIGHT, title, BOLD, 10.0, Align::Center);
            x += w;
        }

        let mut y = top + ROW_HEIGHT;
        for row in rows {
            let mut x = MARGIN;
            for (i, (cell, (w, align))) in row.cells().into_iter().zip(TABLE).enumerate() {
                self.border(x, y, w, ROW_HEIGHT, false);
                let room = w - 2.0 * CELL_PADDING;
                if i == DESCRIPTION {
                    let cut = truncate(cell, 10.0, room);
                    self.text_cell(x, y, w, ROW_HEIGHT, &cut, REGULAR, 10.0, align);
                } else {
                    let size = size_to_fit(cell, 10.0, room);
                    self.text_cell(x, y, w, ROW_HEIGHT, cell, REGULAR, size, align);
                }
                x += w;
            }
            y += ROW_HEIGHT;
        }
        y
    }

    fn total(&mut self, total_due: &str, top: f32) {
        let width = PAGE_WIDTH - 2.0 * MARGIN;
        let size = size_to_fit(total_due, 12.0, width - 2.0 * CELL_PADDING);
        self.text_cell(MARGIN, top, width, ROW_HEIGHT, total_due, BOLD, size, Align::Right);
    }

    fn footer(&mut self, page: usize, page_count: usize) {
        let label = format!("Page {} of {}", page, page_count);
        let top = PAGE_HEIGHT - 15.0;
        self.text_cell(0.0, top, PAGE_WIDTH, 10.0, &label, REGULAR, 8.0, Align::Center);
    }

    fn border(&mut self, x: f32, y: f32, w: f32, h: f32, shaded: bool) {
        self.content.set_line_width(0.2 * pt(1.0));
        self.content.rect(pt(x), pt(PAGE_HEIGHT - y - h), pt(w), pt(h));
        if shaded {
            self.content.set_fill_gray(HEADER_GRAY);
            self.content.fill_nonzero_and_stroke();
            self.content.set_fill_gray(0.0);
        } else {
            self.content.stroke();
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text_cell(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        text: &str,
        font: Name,
        size: f32,
        align: Align,
    ) {
        let text_width = text_width(text, size);
        let left = match align {
            Align::Left => x + CELL_PADDING,
            Align::Center => x + (w - text_width) / 2.0,
            Align::Right => x + w - CELL_PADDING - text_width,
        };
        let baseline = y + h / 2.0 + 0.3 * mm(size);

        self.content.begin_text();
        self.content.set_font(font, size);
        self.content.next_line(pt(left), pt(PAGE_HEIGHT - baseline));
        self.content.show(Str(&encode(text)));
        self.content.end_text();
    }
}

/// Millimetres to points.
fn pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Points to millimetres.
fn mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// Width of `text` in millimetres at font `size`.
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => u32::from(HELVETICA_WIDTHS[c as usize - 32]),
            _ => 556,
        })
        .sum();
    mm(units as f32 * size / 1000.0)
}

/// Largest size up to `size` at which `text` fits in `room` millimetres.
fn size_to_fit(text: &str, size: f32, room: f32) -> f32 {
    let width = text_width(text, size);
    if width <= room {
        size
    } else {
        size * room / width
    }
}

/// Cut `text` so it fits in `room` millimetres, marking the cut with `...`.
fn truncate(text: &str, size: f32, room: f32) -> String {
    if text_width(text, size) <= room {
        return text.to_string();
    }
    let mut cut: String = text.to_string();
    while !cut.is_empty() && text_width(&format!("{cut}..."), size) > room {
        cut.pop();
    }
    cut.push_str("...");
    cut
}

/// WinAnsi bytes for the standard fonts; unmappable characters become `?`.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '€' => 0x80,
            '\u{A0}'..='\u{FF}' => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::IssuerBlock;

    fn doc(rows: usize) -> InvoiceDocument {
        InvoiceDocument {
            issuer: IssuerBlock {
                name: "Studio".to_string(),
                address: "1 Main St".to_string(),
                email: "me@studio.dev".to_string(),
            },
            bill_to: "BILL TO: Acme (a@x.com)".to_string(),
            rows: (1..=rows)
                .map(|n| InvoiceRow {
                    date: "2024-01-15".to_string(),
                    description: format!("Site: Task {n}"),
                    hours: "1.0".to_string(),
                    rate: "$10.00".to_string(),
                    total: "$10.00".to_string(),
                })
                .collect(),
            total_due: format!("TOTAL DUE: ${}.00", rows * 10),
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn test_renders_a_pdf_document() {
        let bytes = PdfRenderer::default().render(&doc(2));

        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, "Helvetica-Bold"));
        assert!(contains(&bytes, "Studio"));
        assert!(contains(&bytes, "Site: Task 2"));
        assert!(contains(&bytes, "TOTAL DUE: $20.00"));
        assert!(contains(&bytes, "Page 1 of 1"));
    }

    #[test]
    fn test_rows_flow_onto_following_pages() {
        let renderer = PdfRenderer::default();
        assert_eq!(renderer.paginate(0), vec![0..0]);
        assert_eq!(renderer.paginate(30), vec![0..21, 21..30]);

        let bytes = renderer.render(&doc(30));
        assert!(contains(&bytes, "Page 2 of 2"));
        assert!(contains(&bytes, "Site: Task 30"));
    }

    #[test]
    fn test_total_moves_to_its_own_page_when_full() {
        assert_eq!(
            PdfRenderer::default().paginate(46),
            vec![0..21, 21..46, 46..46]
        );
    }

    #[test]
    fn test_rows_per_page_caps_each_page() {
        assert_eq!(PdfRenderer::new(2).paginate(5), vec![0..2, 2..4, 4..5]);
        assert_eq!(PdfRenderer::new(0).paginate(2), vec![0..1, 1..2]);
    }

    #[test]
    fn test_numbers_shrink_instead_of_truncating() {
        let room = 25.0 - 2.0 * CELL_PADDING;
        let size = size_to_fit("$1,000,000,000.00", 10.0, room);
        assert!(size < 10.0);
        assert!(text_width("$1,000,000,000.00", size) <= room + 0.001);
        assert_eq!(size_to_fit("$500.00", 10.0, room), 10.0);
    }

    #[test]
    fn test_long_descriptions_are_cut_to_the_column() {
        let room = 90.0 - 2.0 * CELL_PADDING;
        let cut = truncate(&"x".repeat(200), 10.0, room);
        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, 10.0) <= room);
        assert_eq!(truncate("Site: Design", 10.0, room), "Site: Design");
    }

    #[test]
    fn test_encoding() {
        assert_eq!(encode("€1 é"), vec![0x80, b'1', b' ', 0xE9]);
        assert_eq!(encode("日"), vec![b'?']);
    }
}

//! Invoice documents.
//!
//! [`InvoiceDocument::build`] turns an [`Invoice`] into formatted text cells;
//! an [`InvoiceRenderer`] lays those out into file contents.

mod document;
mod format;
mod pdf;
mod text;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use document::*;
pub use format::*;
pub use pdf::PdfRenderer;
pub use text::TextRenderer;

use crate::models::Invoice;

/// Output format of exported invoices.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Text,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "text",
        }
    }

    pub fn renderer(self, rows_per_page: usize) -> Box<dyn InvoiceRenderer> {
        match self {
            Self::Pdf => Box::new(PdfRenderer::new(rows_per_page)),
            Self::Text => Box::new(TextRenderer::new(rows_per_page)),
        }
    }
}

/// Turns a laid-out invoice into file bytes.
pub trait InvoiceRenderer {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, document: &InvoiceDocument) -> Vec<u8>;
}

/// `Invoice_{client name}.{ext}`, with path separators replaced by `_`.
pub fn invoice_file_name(client_name: &str, extension: &str) -> String {
    let safe: String = client_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("Invoice_{}.{}", safe, extension)
}

/// Render `invoice` into `dir`, overwriting any earlier file for the same
/// client name. Returns the written path.
pub fn export_invoice<R: InvoiceRenderer + ?Sized>(
    invoice: &Invoice,
    renderer: &R,
    currency: &CurrencyFormat,
    dir: &Path,
) -> std::io::Result<PathBuf> {
    let document = InvoiceDocument::build(invoice, currency);
    let bytes = renderer.render(&document);

    fs::create_dir_all(dir)?;
    let path = dir.join(invoice_file_name(
        &invoice.bill_to.name,
        renderer.extension(),
    ));
    fs::write(&path, bytes)?;

    tracing::info!(
        "Wrote invoice for {} ({} items) to {}",
        invoice.bill_to.id,
        invoice.line_items.len(),
        path.display()
    );
    Ok(path)
}

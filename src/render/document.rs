use serde::Serialize;

use super::format::{format_hours, CurrencyFormat};
use crate::models::Invoice;

/// Column titles of the line-item table.
pub const COLUMNS: [&str; 5] = ["Date", "Task", "Hrs", "Rate", "Total"];

/// Issuer block at the top of the first page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerBlock {
    pub name: String,
    pub address: String,
    pub email: String,
}

/// One table row with every cell already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub date: String,
    pub description: String,
    pub hours: String,
    pub rate: String,
    pub total: String,
}

impl InvoiceRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.description.as_str(),
            self.hours.as_str(),
            self.rate.as_str(),
            self.total.as_str(),
        ]
    }
}

/// Layout-independent content of an invoice document.
///
/// All number formatting happens here; renderers only place text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub issuer: IssuerBlock,
    pub bill_to: String,
    pub rows: Vec<InvoiceRow>,
    pub total_due: String,
}

impl InvoiceDocument {
    pub fn build(invoice: &Invoice, currency: &CurrencyFormat) -> Self {
        let rows = invoice
            .line_items
            .iter()
            .map(|item| InvoiceRow {
                date: item.date.format("%Y-%m-%d").to_string(),
                description: item.description(),
                hours: format_hours(item.hours),
                rate: currency.format(item.rate),
                total: currency.format(item.total),
            })
            .collect();

        Self {
            issuer: IssuerBlock {
                name: invoice.issuer.name.clone(),
                address: invoice.issuer.address.clone(),
                email: invoice.issuer.email.clone(),
            },
            bill_to: format!(
                "BILL TO: {} ({})",
                invoice.bill_to.name, invoice.bill_to.email
            ),
            rows,
            total_due: format!("TOTAL DUE: {}", currency.format(invoice.grand_total)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::*;

    fn entry(task: &str, hours: f64, rate: f64) -> WorkEntry {
        WorkEntry {
            client_id: "C1".to_string(),
            project: "Site".to_string(),
            task: task.to_string(),
            hours,
            rate,
            total: hours * rate,
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        }
    }

    #[test]
    fn test_build_formats_every_section() {
        let invoice = Invoice {
            issuer: Profile {
                name: "Studio".to_string(),
                email: "me@studio.dev".to_string(),
                address: "1 Main St".to_string(),
            },
            bill_to: Client {
                id: "C1".to_string(),
                name: "Acme".to_string(),
                email: "a@x.com".to_string(),
            },
            line_items: vec![entry("Design", 10.0, 50.0), entry("Build", 30.0, 45.5)],
            grand_total: 1865.0,
        };

        let doc = InvoiceDocument::build(&invoice, &CurrencyFormat::default());

        assert_eq!(doc.issuer.name, "Studio");
        assert_eq!(doc.bill_to, "BILL TO: Acme (a@x.com)");
        assert_eq!(
            doc.rows[0].cells(),
            ["2024-02-29", "Site: Design", "10.0", "$50.00", "$500.00"]
        );
        assert_eq!(doc.rows[1].description, "Site: Build");
        assert_eq!(doc.rows[1].total, "$1,365.00");
        assert_eq!(doc.total_due, "TOTAL DUE: $1,865.00");
    }
}

//! Command-line surface: one-shot subcommands plus the interactive menu.

mod menu;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub use menu::run_menu;

use crate::billing::DuplicateClientPolicy;
use crate::config::Config;
use crate::models::*;
use crate::render::{export_invoice, format_hours, DocumentFormat};
use crate::store::{JsonFileStore, StateStore};
use crate::workbook::Workbook;

#[derive(Debug, Parser)]
#[command(name = "freelance")]
#[command(about = "Track clients and billable work, and generate invoices")]
pub struct Cli {
    /// State file to use instead of the configured one
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the business profile
    ShowProfile,
    /// Replace the business profile
    SetProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
    },
    /// Register a client
    AddClient {
        /// Client id, e.g. C1
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Replace an existing client with the same id
        #[arg(long)]
        overwrite: bool,
    },
    /// List registered clients
    Clients,
    /// Log billable work for a client
    Log {
        client_id: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        task: String,
        #[arg(long, allow_hyphen_values = true)]
        hours: String,
        #[arg(long, allow_hyphen_values = true)]
        rate: String,
        /// Date of the work (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List work logged for a client
    Entries { client_id: String },
    /// Write the invoice document for a client
    Invoice {
        client_id: String,
        /// Directory to write the invoice to
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Document format; defaults to the configured one
        #[arg(long, value_enum)]
        format: Option<DocumentFormat>,
    },
    /// Start the interactive menu (default)
    Menu,
}

/// Resolve configuration, open the state file and run the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }
    tracing::debug!("Using state file {}", config.data_file.display());

    let store = JsonFileStore::new(&config.data_file);
    let mut workbook = Workbook::open(store)
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?
        .with_duplicate_policy(config.duplicate_clients);

    let stdout = std::io::stdout();
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = std::io::stdin();
            run_menu(&mut workbook, &config, stdin.lock(), stdout.lock())
        }
        command => execute(&mut workbook, command, &config, &mut stdout.lock()),
    }
}

/// Run one non-interactive command, writing its report to `out`.
pub fn execute<S: StateStore>(
    workbook: &mut Workbook<S>,
    command: Commands,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let currency = config.currency();

    match command {
        Commands::ShowProfile => {
            let profile = workbook.profile();
            writeln!(out, "{}", profile.name)?;
            writeln!(out, "{}", profile.address)?;
            writeln!(out, "{}", profile.email)?;
        }
        Commands::SetProfile {
            name,
            email,
            address,
        } => {
            workbook.set_profile(UpdateProfileInput {
                name,
                email,
                address,
            })?;
            writeln!(out, "Profile updated.")?;
        }
        Commands::AddClient {
            id,
            name,
            email,
            overwrite,
        } => {
            if overwrite {
                workbook.set_duplicate_policy(DuplicateClientPolicy::Overwrite);
            }
            let client = workbook.add_client(AddClientInput { id, name, email })?;
            writeln!(out, "Client {} saved as {}.", client.name, client.id)?;
        }
        Commands::Clients => {
            let clients = workbook.list_clients();
            if clients.is_empty() {
                writeln!(out, "No clients yet.")?;
            }
            for client in clients {
                writeln!(
                    out,
                    "ID: {} | Name: {} | Email: {}",
                    client.id, client.name, client.email
                )?;
            }
        }
        Commands::Log {
            client_id,
            project,
            task,
            hours,
            rate,
            date,
        } => {
            let input = LogWorkInput {
                client_id,
                project,
                task,
                hours,
                rate,
            };
            let entry = match date {
                Some(date) => workbook.log_work_on(input, date)?,
                None => workbook.log_work(input)?,
            };
            writeln!(
                out,
                "Logged {} h at {} = {} for {} on {}.",
                format_hours(entry.hours),
                currency.format(entry.rate),
                currency.format(entry.total),
                entry.client_id,
                entry.date
            )?;
        }
        Commands::Entries { client_id } => {
            workbook.state().client(&client_id)?;
            let entries = workbook.entries_for_client(&client_id);
            if entries.is_empty() {
                writeln!(out, "No work logged for {}.", client_id)?;
            }
            for entry in entries {
                writeln!(
                    out,
                    "{} | {} | {} h | {} | {}",
                    entry.date,
                    entry.description(),
                    format_hours(entry.hours),
                    currency.format(entry.rate),
                    currency.format(entry.total)
                )?;
            }
        }
        Commands::Invoice {
            client_id,
            out_dir,
            format,
        } => {
            let invoice = workbook.build_invoice(&client_id)?;
            let dir = out_dir.unwrap_or_else(|| config.invoice_dir.clone());
            let renderer = format
                .unwrap_or(config.document_format)
                .renderer(config.rows_per_page);
            let path = export_invoice(&invoice, renderer.as_ref(), &currency, &dir)
                .with_context(|| format!("Failed to write invoice to {}", dir.display()))?;
            writeln!(
                out,
                "Saved invoice for {} ({}) as {}.",
                invoice.bill_to.name,
                currency.format(invoice.grand_total),
                path.display()
            )?;
        }
        Commands::Menu => {
            anyhow::bail!("The interactive menu cannot be run as a single command");
        }
    }

    Ok(())
}

//! Interactive menu loop.
//!
//! Reads answers line by line from `input` and reports to `output`. A failed
//! action prints its error and returns to the menu; end of input exits.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::models::*;
use crate::render::export_invoice;
use crate::store::StateStore;
use crate::workbook::Workbook;

const MENU: &str = "\n--- FREELANCE SUITE ---
1. Update My Profile
2. Add Client
3. Log Work
4. Generate Invoice
5. Exit";

/// Whether the menu keeps going after an action.
enum Flow {
    Continue,
    Quit,
}

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Print `label` and read one line. `None` at end of input.
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(Some(trimmed.to_string()))
    }

    fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Reads the next answer, leaving the action with `Flow::Quit` at end of input.
macro_rules! ask_or_quit {
    ($console:expr, $label:expr) => {
        match $console.ask($label)? {
            Some(answer) => answer,
            None => return Ok(Flow::Quit),
        }
    };
}

pub fn run_menu<S, R, W>(
    workbook: &mut Workbook<S>,
    config: &Config,
    input: R,
    output: W,
) -> Result<()>
where
    S: StateStore,
    R: BufRead,
    W: Write,
{
    let mut console = Console { input, output };

    loop {
        console.say(MENU)?;
        let Some(choice) = console.ask("Select (1-5): ")? else {
            break;
        };

        let outcome = match choice.trim() {
            "1" => update_profile(workbook, &mut console),
            "2" => add_client(workbook, &mut console),
            "3" => log_work(workbook, &mut console),
            "4" => generate_invoice(workbook, config, &mut console),
            "5" => break,
            other => {
                console.say(format!("Unknown option: {}", other))?;
                continue;
            }
        };

        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::debug!("Menu action failed: {:#}", e);
                console.say(format!("Error: {:#}", e))?;
            }
        }
    }

    Ok(())
}

fn update_profile<S: StateStore, R: BufRead, W: Write>(
    workbook: &mut Workbook<S>,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    console.say("\n--- SET UP YOUR BUSINESS INFO ---")?;
    let name = ask_or_quit!(console, "Your Business Name: ");
    let email = ask_or_quit!(console, "Your Business Email: ");
    let address = ask_or_quit!(console, "Your Business Address: ");

    workbook.set_profile(UpdateProfileInput {
        name,
        email,
        address,
    })?;
    console.say("Profile updated.")?;
    Ok(Flow::Continue)
}

fn add_client<S: StateStore, R: BufRead, W: Write>(
    workbook: &mut Workbook<S>,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    console.say("\n--- ADD A NEW CLIENT ---")?;
    let id = ask_or_quit!(console, "Create a Client ID (e.g., C1): ");
    let name = ask_or_quit!(console, "Client/Company Name: ");
    let email = ask_or_quit!(console, "Client Email: ");

    let client = workbook.add_client(AddClientInput { id, name, email })?;
    console.say(format!("Client {} saved.", client.name))?;
    Ok(Flow::Continue)
}

fn log_work<S: StateStore, R: BufRead, W: Write>(
    workbook: &mut Workbook<S>,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    if workbook.list_clients().is_empty() {
        console.say("Add a client first!")?;
        return Ok(Flow::Continue);
    }

    console.say("\n--- LOG WORK ---")?;
    let listing: Vec<String> = workbook
        .list_clients()
        .into_iter()
        .map(|c| format!("ID: {} | Name: {}", c.id, c.name))
        .collect();
    for line in listing {
        console.say(line)?;
    }

    let client_id = ask_or_quit!(console, "Enter Client ID for this work: ");
    workbook.state().client(&client_id)?;

    let project = ask_or_quit!(console, "Project Name: ");
    let task = ask_or_quit!(console, "Task Description: ");
    let hours = ask_or_quit!(console, "Hours worked: ");
    let rate = ask_or_quit!(console, "Hourly rate: ");

    workbook.log_work(LogWorkInput {
        client_id,
        project,
        task,
        hours,
        rate,
    })?;
    console.say("Work logged successfully!")?;
    Ok(Flow::Continue)
}

fn generate_invoice<S: StateStore, R: BufRead, W: Write>(
    workbook: &Workbook<S>,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    let client_id = ask_or_quit!(console, "\nWhich Client ID do you want to invoice? ");
    let invoice = workbook.build_invoice(&client_id)?;

    let renderer = config.document_format.renderer(config.rows_per_page);
    let path = export_invoice(
        &invoice,
        renderer.as_ref(),
        &config.currency(),
        &config.invoice_dir,
    )?;
    console.say(format!("Saved as {}", path.display()))?;
    Ok(Flow::Continue)
}

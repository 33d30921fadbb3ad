//! Implements InputPort. Inquire-based interactive shell.
//!
//! Prompts for the PO details, shows a spinner while the backend call is in
//! flight, renders the result (or the error with the raw backend text) and
//! offers a CSV export. Rendering only — no classification logic here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::style::Stylize;
use indicatif::ProgressBar;
use inquire::{Confirm, Text};

use crate::adapters::ui::export;
use crate::domain::{ClassificationResult, ClassifyError};
use crate::ports::InputPort;
use crate::usecases::ClassifyService;

/// TUI adapter. Inquire prompts around the classification service.
pub struct TuiInputPort {
    service: Arc<ClassifyService>,
    export_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(service: Arc<ClassifyService>, export_dir: PathBuf) -> Self {
        Self {
            service,
            export_dir,
        }
    }

    fn render_result(result: &ClassificationResult) {
        let rule = "─".repeat(46);
        println!("\n{}", rule.as_str().dark_grey());
        println!(
            "  {}  {}",
            "Level 1 (Category) ".dark_grey(),
            result.category.as_str().bold()
        );
        println!(
            "  {}  {}",
            "Level 2 (Sub-Cat)  ".dark_grey(),
            result.sub_category.as_str().bold()
        );
        println!(
            "  {}  {}",
            "Level 3 (Commodity)".dark_grey(),
            result.commodity.as_str().bold()
        );
        println!("{}", rule.as_str().dark_grey());

        if let Ok(json) = serde_json::to_string(result) {
            println!("  {}\n", json.as_str().dark_grey());
        }
    }

    fn render_error(error: &ClassifyError) {
        match error.raw_output() {
            Some(raw) => {
                println!(
                    "\n{}",
                    "Model returned an invalid classification:".red().bold()
                );
                println!("  {}", error.to_string().as_str().red());
                println!("{}", "Raw output:".dark_grey());
                println!("{}\n", raw.dark_grey());
            }
            None => {
                println!(
                    "\n{} {}\n",
                    "Classification failed:".red().bold(),
                    error.to_string().as_str().red()
                );
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> anyhow::Result<()> {
        loop {
            let description = Text::new("PO description:")
                .with_help_message("e.g. Annual subscription for cloud services")
                .prompt()?;
            let supplier = Text::new("Supplier (optional):")
                .with_help_message("e.g. Microsoft; leave blank to skip")
                .prompt()?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Analyzing taxonomy...");
            spinner.enable_steady_tick(Duration::from_millis(80));

            let outcome = self
                .service
                .classify(&description, Some(supplier.as_str()))
                .await;
            spinner.finish_and_clear();

            match outcome {
                Ok(result) => {
                    Self::render_result(&result);
                    let export_requested = Confirm::new("Export result as CSV?")
                        .with_default(false)
                        .prompt()?;
                    if export_requested {
                        let path = export::write_result_csv(&self.export_dir, &result)?;
                        println!("Saved {}", path.display());
                    }
                }
                Err(error) => Self::render_error(&error),
            }

            let again = Confirm::new("Classify another PO?")
                .with_default(true)
                .prompt()?;
            if !again {
                return Ok(());
            }
        }
    }
}

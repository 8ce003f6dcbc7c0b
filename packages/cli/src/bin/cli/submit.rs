use anyhow::Context;
use rockspace_brief::{SimulatedSubmitter, SubmissionController};
use rockspace_cli::render::{form_state_line, ticket_report};
use rockspace_cli::{submit_with_progress, Config};
use rockspace_core::{BudgetRange, QuoteRequest};

pub async fn run(
    name: String,
    email: String,
    company: Option<String>,
    budget: Option<BudgetRange>,
    message: String,
) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let controller = SubmissionController::new(SimulatedSubmitter::new(config.submit_delay));

    let lead = QuoteRequest {
        name,
        email,
        company: company.filter(|c| !c.trim().is_empty()),
        idea: message,
        budget_range: budget,
    };

    let ticket = submit_with_progress(controller, lead, |state| {
        println!("{}", form_state_line(state))
    })
    .await
    .context("Quote request was not sent")?;

    println!("\n{}", ticket_report(&ticket));
    Ok(())
}

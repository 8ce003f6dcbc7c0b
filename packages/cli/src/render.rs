// ABOUTME: Terminal rendering of analysis states, briefs, and tickets
// ABOUTME: Pure string builders so output can be asserted in tests

use colored::*;
use rockspace_brief::{AnalysisState, FormState};
use rockspace_core::{AIAnalysis, Ticket};

/// One-line label for a state transition
pub fn analysis_state_line(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Empty => format!("{} awaiting input", "○".dimmed()),
        AnalysisState::Analyzing => format!("{} scanning project parameters...", "◌".yellow()),
        AnalysisState::Ready(analysis) if analysis.is_fallback() => {
            format!("{} brief queued for manual review", "●".yellow())
        }
        AnalysisState::Ready(_) => format!("{} analysis complete", "●".green()),
    }
}

/// Results panel for a completed analysis
pub fn analysis_report(analysis: &AIAnalysis) -> String {
    let stack = if analysis.suggested_stack.is_empty() {
        "(none suggested)".dimmed().to_string()
    } else {
        analysis.suggested_stack.join(" · ")
    };

    format!(
        "{}\n{}\n\n{} {}\n{} {}",
        "Refined brief".bold().underline(),
        analysis.refined_brief,
        "Suggested stack:".bold(),
        stack.cyan(),
        "Estimated timeline:".bold(),
        analysis.estimated_timeline.cyan()
    )
}

pub fn form_state_line(state: &FormState) -> String {
    match state {
        FormState::Idle => format!("{} ready to submit", "○".dimmed()),
        FormState::Submitting => format!("{} transmitting...", "◌".yellow()),
        FormState::Success(ticket) => format!("{} transmission secured {}", "●".green(), ticket),
    }
}

/// Success screen for an accepted lead
pub fn ticket_report(ticket: &Ticket) -> String {
    format!(
        "{}\nTicket ID: {}\nOur agents will establish contact within 24 hours.",
        "Transmission Secured".green().bold(),
        ticket.to_string().bold()
    )
}

/// Error text for the terminal, including every cause in the chain
pub fn error_report(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

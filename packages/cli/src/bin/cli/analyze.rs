use std::time::Duration;

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use rockspace_ai::GeminiService;
use rockspace_brief::prompts::brief_schema;
use rockspace_brief::{AnalysisController, AnalysisState, BriefAnalyzer, TriggerOutcome};
use rockspace_cli::render::{analysis_report, analysis_state_line};
use rockspace_cli::Config;
use rockspace_core::{idea_length, MIN_IDEA_LENGTH};
use tokio::sync::watch;
use tracing::debug;

pub async fn run(idea: String, scan_delay_ms: Option<u64>, json: bool) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let scan_delay = scan_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.scan_delay);

    debug!(
        "Analyzing with model {} and scan delay {:?}",
        config.gemini.model, scan_delay
    );
    let service = GeminiService::new(config.gemini).context("Failed to build HTTP client")?;
    let controller = AnalysisController::with_min_delay(BriefAnalyzer::new(service), scan_delay);

    if !controller.can_trigger(&idea) {
        bail!(
            "Idea is too short to analyze: {} characters (minimum {})",
            idea_length(&idea),
            MIN_IDEA_LENGTH
        );
    }

    let states = controller.subscribe();
    let (outcome, _) = tokio::join!(
        controller.request_analysis(&idea),
        render_progress(states, !json)
    );

    let analysis = match outcome {
        TriggerOutcome::Completed(analysis) => analysis,
        TriggerOutcome::TooShort { length } => bail!(
            "Idea is too short to analyze: {} characters (minimum {})",
            length,
            MIN_IDEA_LENGTH
        ),
        TriggerOutcome::AlreadyAnalyzing => bail!("An analysis is already in progress"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("\n{}", analysis_report(&analysis));
    }
    Ok(())
}

/// Follow state transitions until the controller reports ready
async fn render_progress(mut states: watch::Receiver<AnalysisState>, show: bool) {
    let spinner = ProgressBar::new_spinner();
    if show {
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.yellow} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));
    } else {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let mut last = None;
    while states.changed().await.is_ok() {
        let state = states.borrow_and_update().clone();
        spinner.set_message(analysis_state_line(&state));
        if matches!(state, AnalysisState::Ready(_)) {
            last = Some(state);
            break;
        }
    }

    spinner.finish_and_clear();
    if let (true, Some(state)) = (show, last) {
        println!("{}", analysis_state_line(&state));
    }
}

pub fn print_schema() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&brief_schema().to_json())?);
    Ok(())
}

use clap::{Parser, Subcommand};
use rockspace_core::BudgetRange;
use std::process;

mod cli;

#[derive(Parser)]
#[command(name = "rockspace")]
#[command(about = "Rockspace CLI - turn rough project ideas into structured briefs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refine a free-text project idea into a brief (needs at least 10 characters)
    Analyze {
        /// The project idea, as the client wrote it
        idea: String,

        /// Minimum time the scanning state stays visible, in milliseconds
        #[arg(long)]
        scan_delay_ms: Option<u64>,

        /// Print the brief as JSON instead of a formatted panel
        #[arg(long)]
        json: bool,
    },
    /// Send a quote request through the (simulated) contact form
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        company: Option<String>,

        /// One of 10-25k, 25-50k, 50k-100k, 100k+
        #[arg(long, value_parser = parse_budget)]
        budget: Option<BudgetRange>,

        /// What the client wants built
        #[arg(long)]
        message: String,
    },
    /// Print the response schema sent to the model
    Schema,
}

fn parse_budget(value: &str) -> Result<BudgetRange, String> {
    value.parse()
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    rockspace_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{}", rockspace_cli::render::error_report(&e));
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            idea,
            scan_delay_ms,
            json,
        } => cli::analyze::run(idea, scan_delay_ms, json).await,
        Commands::Submit {
            name,
            email,
            company,
            budget,
            message,
        } => cli::submit::run(name, email, company, budget, message).await,
        Commands::Schema => cli::analyze::print_schema(),
    }
}

use crate::demo::{run_compliance, run_plan, run_policy_search, run_preferences, PlanArgs, PolicyArgs, TripArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use travel_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Travel Desk",
    about = "Plan, check, and book corporate trips from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build a ranked trip plan and optionally book one of its packages
    Plan(PlanArgs),
    /// Check a trip against the corporate travel policy
    Compliance(TripArgs),
    /// Show preferences learned from the travel history
    Preferences,
    /// Search the corporate travel policy document
    Policy(PolicyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan(args) => run_plan(args),
        Command::Compliance(args) => run_compliance(args),
        Command::Preferences => run_preferences(),
        Command::Policy(args) => run_policy_search(args),
    }
}

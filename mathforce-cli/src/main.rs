use anyhow::Result;
use clap::{Parser, Subcommand};
use mathforce_engine::Role;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "mathforce", about = "Timed math training with adaptive difficulty")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Role scope for stored history (student or teacher)
    #[arg(long, global = true)]
    role: Option<Role>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive timed session
    Train(commands::train::TrainArgs),
    /// Run the end-of-session pipeline on a recorded aggregate
    Complete(commands::complete::CompleteArgs),
    /// Show session history with trend and stability
    History(commands::history::HistoryArgs),
    /// Show recommendations for the latest session
    Report(commands::report::ReportArgs),
    /// Preview the question set for the next session
    Select(commands::select::SelectArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let role = cli.role;
    match cli.command {
        Commands::Train(args) => commands::train::run(args, role).await,
        Commands::Complete(args) => commands::complete::run(args, role).await,
        Commands::History(args) => commands::history::run(args, role).await,
        Commands::Report(args) => commands::report::run(args, role).await,
        Commands::Select(args) => commands::select::run(args, role).await,
        Commands::Config(args) => commands::config::run(args, role),
    }
}

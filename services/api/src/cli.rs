use crate::report::{run_budget, run_compare, run_convert, BudgetArgs, CompareArgs, ConvertArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use study_planner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Study Abroad Planner",
    about = "Compare study destinations, convert currencies, and plan budgets",
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
    /// Compare living costs across up to four cities
    Compare(CompareArgs),
    /// Convert an amount between currencies
    Convert(ConvertArgs),
    /// Summarise a monthly budget plan
    Budget(BudgetArgs),
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
        Command::Compare(args) => run_compare(args),
        Command::Convert(args) => run_convert(args),
        Command::Budget(args) => run_budget(args),
    }
}

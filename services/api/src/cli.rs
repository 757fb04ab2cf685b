use crate::demo::{run_caretakers, run_demo, run_rank, CaretakerArgs, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use slp_monitor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SLP Monitoring Console",
    about = "Rank livelihood project pairs and reconcile caretaker rosters from the command line",
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
    /// Rank project/association pairs and print the monitoring table
    Rank(RankArgs),
    /// Group the caretaker roster under canonical association headings
    Caretakers(CaretakerArgs),
    /// Run an end-to-end demo over the seeded records
    Demo(DemoArgs),
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
        Command::Rank(args) => run_rank(args),
        Command::Caretakers(args) => run_caretakers(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::demo::{run_demo, DemoArgs};
use crate::planning::{
    run_generate, run_issues, run_roster_import, GenerateArgs, IssuesArgs, RosterImportArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use summerjob::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "summerjob",
    about = "Check, staff and seat the daily plans of a SummerJob event",
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
    /// Evaluate a plan from an event snapshot and print its issues
    Issues(IssuesArgs),
    /// Propose worker assignments for a plan and report the result
    Generate(GenerateArgs),
    /// Work with worker rosters
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Evaluate a built-in two-day event
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Parse a semicolon-separated roster and list accepted and rejected lines
    Import(RosterImportArgs),
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
        Command::Issues(args) => run_issues(args),
        Command::Generate(args) => run_generate(args),
        Command::Roster {
            command: RosterCommand::Import(args),
        } => run_roster_import(args),
        Command::Demo(args) => run_demo(args),
    }
}

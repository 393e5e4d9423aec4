use crate::demo::{
    run_demo, run_lead_export, run_lead_inspect, run_lead_list, DemoArgs, LeadExportArgs,
    LeadInspectArgs, LeadListArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_prioritizer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Post-Acquisition AI Lead Prioritizer",
    about = "Score, filter, and export acquisition leads from the command line or over HTTP",
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
    /// Inspect and export the scored lead dataset
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
    /// Walk through scoring, the lead table, and a breakdown of the top lead
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Print the filtered lead table and distributions
    List(LeadListArgs),
    /// Show the scoring breakdown for one company
    Inspect(LeadInspectArgs),
    /// Write the filtered leads to a CSV or JSON file
    Export(LeadExportArgs),
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
        Command::Leads { command } => match command {
            LeadsCommand::List(args) => run_lead_list(args),
            LeadsCommand::Inspect(args) => run_lead_inspect(args),
            LeadsCommand::Export(args) => run_lead_export(args),
        },
        Command::Demo(args) => run_demo(args),
    }
}

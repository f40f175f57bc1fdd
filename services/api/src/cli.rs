use crate::demo::{run_demo, run_evaluation, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use robo_awards::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Robotics Award Eligibility",
    about = "Compute All-Around Champion and Excellence Award eligibility for divisions",
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
    /// Evaluate award eligibility for a division stored on disk
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
    /// Run the engine against a synthetic division and print the results
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum EligibilityCommand {
    /// Evaluate a JSON dataset or a directory of CSV exports
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON file of world skills standings to preload, keyed by grade
    #[arg(long)]
    pub(crate) world_skills: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Eligibility {
            command: EligibilityCommand::Evaluate(args),
        } => run_evaluation(args),
        Command::Demo(args) => run_demo(args),
    }
}

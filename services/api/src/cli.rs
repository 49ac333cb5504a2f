use crate::commands::{run_draw, run_validate, DrawArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use giveaway::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Giveaway Draw",
    about = "Validate giveaway entries and run verifiable seeded draws",
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
    /// Validate entries from a sheet export or comments dump and print the verdicts
    Validate(ValidateArgs),
    /// Validate entries, then draw a winner with a reproducible seed
    Draw(DrawArgs),
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
        Command::Validate(args) => run_validate(args),
        Command::Draw(args) => run_draw(args),
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rental_intake::error::AppError;

use crate::commands;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Rental Intake",
    about = "Serve the rental application intake form or drive it from the command line",
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
    /// Print every form label in the chosen language
    Labels(LabelsArgs),
    /// List address suggestions for partial input
    Search(SearchArgs),
    /// Resolve coordinates to the address the form would adopt
    Locate(LocateArgs),
    /// Validate and submit an application read from a JSON file
    Submit(SubmitArgs),
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

#[derive(Args, Debug)]
pub(crate) struct LabelsArgs {
    /// Language code (en, es, fr, de, zh, ar)
    #[arg(long, default_value = "en")]
    pub(crate) language: String,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Address text as typed into the form
    pub(crate) text: String,
}

#[derive(Args, Debug)]
pub(crate) struct LocateArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) longitude: f64,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// JSON document with the application fields
    #[arg(long)]
    pub(crate) file: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Labels(args) => commands::labels(args).await,
        Command::Search(args) => commands::search(args).await,
        Command::Locate(args) => commands::locate(args).await,
        Command::Submit(args) => commands::submit(args).await,
    }
}

use crate::report::{run_quote, run_recommend, QuoteArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use moving_quote::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Moving Quote",
    about = "Price moving jobs from the command line or serve the quoting API",
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
    /// Price a request file and print the itemized breakdown
    Quote(QuoteArgs),
    /// Print the aggregate load and vehicle recommendation for a request file
    Recommend(RecommendArgs),
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
        Command::Quote(args) => run_quote(args),
        Command::Recommend(args) => run_recommend(args),
    }
}

mod cli;
mod infra;
mod report;
mod routes;
mod server;

use moving_quote::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

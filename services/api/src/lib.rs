mod cli;
mod demo;
mod infra;
mod planning;
mod routes;
mod server;

use summerjob::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

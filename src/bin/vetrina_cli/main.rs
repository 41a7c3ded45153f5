mod args;
mod client;
mod handlers;

use clap::Parser;

use args::{Cli, Command};
use client::{CliError, Ctx};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let site = cli.site.as_deref().ok_or(CliError::MissingSite)?;
    let ctx = Ctx::new(site)?;

    match cli.command {
        Command::Compose(args) => handlers::compose(&ctx, args).await,
        Command::List(args) => handlers::list(&ctx, args).await,
        Command::Read(args) => handlers::read(&ctx, args).await,
    }
}

//! dockhand CLI - runs the demo services
//!
//! - `greeter`: "Hello Docker" responder on port 5000
//! - `serve`: Postgres-backed items service on port 8000
//!
//! A `.env` file in the working directory is loaded before arguments are
//! parsed, so every `env = ...` flag can come from it.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "dockhand",
    author,
    version,
    about = "Demo container services: a greeter and a Postgres-backed items API"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the greeter service
    Greeter(commands::greeter::GreeterArgs),
    /// Run the items service (bootstraps the database first)
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; the process environment still applies.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    match cli.command {
        Commands::Greeter(args) => commands::greeter::run(args).await,
        Commands::Serve(args) => commands::serve::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn greeter_flags_override_env() {
        let cli = Cli::try_parse_from(["dockhand", "greeter", "--app-env", "staging"]).unwrap();
        match cli.command {
            Commands::Greeter(args) => {
                assert_eq!(args.app_env, "staging");
                assert_eq!(args.bind.port(), 5000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

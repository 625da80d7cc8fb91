//! Items service command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Parser;
use dockhand_server::config::DEFAULT_DB_PORT;
use dockhand_server::{run_server, BootstrapPolicy, DatabaseConfig, ServerConfig};

use super::shutdown_signal;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Postgres host
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Postgres port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,

    /// Database holding the items table (created if absent)
    #[arg(long, env = "POSTGRES_DB")]
    pub db_name: Option<String>,

    /// Postgres user
    #[arg(long, env = "POSTGRES_USER")]
    pub db_user: Option<String>,

    /// Postgres password
    #[arg(long, env = "POSTGRES_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Startup bootstrap failure handling: best-effort or fail-fast
    #[arg(long, env = "BOOTSTRAP_POLICY", default_value_t = BootstrapPolicy::BestEffort)]
    pub bootstrap: BootstrapPolicy,

    /// Return 500 from /db-check when the database is unreachable
    ///
    /// The env value is read loosely: empty, `0`, `false`, `no`, `off` mean off.
    #[arg(long, env = "DB_CHECK_STRICT", value_parser = FalseyValueParser::new())]
    pub strict_db_check: bool,
}

impl ServeArgs {
    fn split(self) -> (DatabaseConfig, ServerConfig) {
        let database = DatabaseConfig {
            host: self.db_host,
            port: self.db_port,
            database: self.db_name,
            user: self.db_user,
            password: self.db_password,
        };
        let server = ServerConfig {
            bind_addr: self.bind,
            bootstrap: self.bootstrap,
            strict_db_check: self.strict_db_check,
        };
        (database, server)
    }
}

/// Run the items service (blocks until shutdown)
pub async fn run(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting items service on {}", args.bind);

    let (database, server) = args.split();
    run_server(database, server, shutdown_signal())
        .await
        .context("Server error")
}

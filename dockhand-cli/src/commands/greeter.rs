//! Greeter service command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use dockhand_greeter::{run_greeter, GreeterConfig, DEFAULT_APP_ENV};

use super::shutdown_signal;

/// Arguments for the greeter command
#[derive(Parser, Debug)]
pub struct GreeterArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Deployment environment shown in the greeting
    #[arg(long, env = "APP_ENV", default_value = DEFAULT_APP_ENV)]
    pub app_env: String,
}

impl From<GreeterArgs> for GreeterConfig {
    fn from(args: GreeterArgs) -> Self {
        Self {
            bind_addr: args.bind,
            app_env: args.app_env,
        }
    }
}

/// Run the greeter (blocks until shutdown)
pub async fn run(args: GreeterArgs) -> Result<()> {
    run_greeter(args.into(), shutdown_signal())
        .await
        .context("Greeter error")
}

//! # Picpay Entry Point
//!
//! 1. **Initialization**: installs the `tracing` subscriber and parses arguments with [`cli::Cli`].
//! 2. **Serving**: runs the selected variant through `picpay_core::server::run`.
//! 3. **Failure**: a startup or transport error is logged, printed to standard error, and the
//!    process exits with status 1.

mod cli;

use clap::Parser;
use cli::Cli;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "picpay=info,picpay_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    if let Err(err) = picpay_core::server::run(args.command.into(), &args.addr).await {
        tracing::error!(error = %err, "picpay stopped");
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

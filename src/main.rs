use std::path::PathBuf;

use clap::Parser;
use tower_lsp::LspService;
use tower_lsp::Server;
use tracing_subscriber::EnvFilter;

use enumswitch_lsp::Backend;

#[derive(Parser)]
#[command(
    name = "enumswitch_lsp",
    version,
    about = "Quick-fix server that generates the cases of a C++ switch over an enum"
)]
struct Cli {
    /// Communicate over stdin/stdout (the only transport; accepted for
    /// editors that always pass it).
    #[arg(long)]
    stdio: bool,

    /// Configuration file to use instead of the workspace / user file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`).
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        stdio = cli.stdio,
        "starting enumswitch_lsp"
    );

    let config_path = cli.config;
    let (service, socket) =
        LspService::new(move |client| Backend::with_config_path(client, config_path));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}

//! rocketcart - manage the storefront shopping cart from the terminal.
//!
//! Every invocation loads the cart from local storage, applies at most one
//! change validated against the storefront API, and prints the result.

mod commands;
mod display;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rocketcart_core::cart::CartPersistence;
use rocketcart_core::{ApiClient, CartManager, Config, FileStorage, Notifier};

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "rocketcart", version, about = "Manage the storefront shopping cart")]
struct Cli {
    /// Storefront API base URL (overrides config and ROCKETCART_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Shows cart errors on stderr
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("Erro: {}", message);
    }
}

/// Initialize the tracing subscriber for logging.
/// The returned guard must stay alive for file logs to be flushed.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match config.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "rocketcart.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = Some(url);
    }

    let _guard = init_tracing(&config);
    info!(api = config.api_base_url(), "rocketcart starting");

    let client = Arc::new(ApiClient::new(config.api_base_url())?);
    let storage = Arc::new(FileStorage::new(config.storage_dir()?)?);
    let persistence = CartPersistence::new(storage, config.storage_key());
    let cart = CartManager::with_persistence(persistence, client.clone(), client)
        .with_notifier(Arc::new(StderrNotifier));

    let outcome = commands::execute(&cart, cli.command).await;

    if let Ok(ref change) = outcome {
        if let Some(line) = display::describe_change(change) {
            println!("{}", line);
        }
    }
    print!("{}", display::render_cart(&cart.cart()));

    cart.dispose();
    Ok(ExitCode::from(commands::exit_status(&outcome)))
}

//! Vitrine CLI - Browse the catalog and build a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every product
//! vitrine catalog
//!
//! # List products on sale only
//! vitrine catalog --on-sale
//!
//! # Add product #0 in size M (x2) and product #3 in size P, then print the cart
//! vitrine cart --add 0:M:2 --add 3:P
//! ```
//!
//! # Commands
//!
//! - `catalog` - Fetch and print the product listing
//! - `cart` - Fetch the listing, add orders, print lines and total
//!
//! Configuration is read from the environment; see
//! [`vitrine_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]
// Printing to stdout is this binary's job
#![allow(clippy::print_stdout)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::error::Result;
use vitrine_storefront::state::AppState;

mod commands;

use commands::cart::AddOrder;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine catalog and cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the product listing
    Catalog {
        /// Only list products on sale
        #[arg(long)]
        on_sale: bool,

        /// Request every product image and report the ones that fail
        #[arg(long)]
        check_images: bool,
    },
    /// Add products to a cart and print it
    Cart {
        /// Pick products from the on-sale listing
        #[arg(long)]
        on_sale: bool,

        /// Order to add, as `<index>:<size>[:<quantity>]`
        #[arg(short, long = "add", value_name = "ORDER")]
        adds: Vec<AddOrder>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_storefront=info,vitrine=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    tracing::debug!(endpoint = %config.catalog.endpoint, "Configuration loaded");

    let state = AppState::new(config).expect("Failed to initialize application state");

    // Return, never exit: dropping the Sentry guard flushes queued events
    ExitCode::from(exit_status(&run(cli, &state).await))
}

/// Log a failed command and map the outcome to a process exit status.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            1
        }
    }
}

async fn run(cli: Cli, state: &AppState) -> Result<()> {
    match cli.command {
        Commands::Catalog {
            on_sale,
            check_images,
        } => commands::catalog::run(state, on_sale, check_images).await,
        Commands::Cart { on_sale, adds } => commands::cart::run(state, on_sale, &adds).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_storefront::error::AppError;

    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(
            exit_status(&Err(AppError::NotFound("product 9".to_string()))),
            1
        );
    }

    #[test]
    fn test_cli_parses_cart_orders() {
        let cli = Cli::try_parse_from(["vitrine", "cart", "--add", "0:M:2", "-a", "1:P"])
            .unwrap();
        let Commands::Cart { on_sale, adds } = cli.command else {
            panic!("expected cart command");
        };
        assert!(!on_sale);
        assert_eq!(adds.len(), 2);
    }
}

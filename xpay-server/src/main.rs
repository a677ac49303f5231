//! X-Pay companion server
//!
//! Receives signed X-Pay webhook deliveries and provides console commands
//! to check API connectivity.

mod api;
mod commands;
mod config;
mod server;
mod shutdown;
mod state;

use clap::{Parser, Subcommand};
use config::{ConfigLoader, Overrides};
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use xpay_sdk::{Environment, XPay};

/// X-Pay companion server - webhook receiver and API tooling
#[derive(Parser, Debug)]
#[command(name = "xpay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./xpay.toml", env = "XPAY_CONFIG")]
    config: PathBuf,

    /// X-Pay API key
    #[arg(long, env = "XPAY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Merchant ID from the X-Pay dashboard
    #[arg(long, env = "XPAY_MERCHANT_ID")]
    merchant_id: Option<String>,

    /// Pin the environment (sandbox or live) instead of deriving it from the API key
    #[arg(long, env = "XPAY_ENVIRONMENT")]
    environment: Option<Environment>,

    /// Override the API base URL
    #[arg(long, env = "XPAY_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "XPAY_TIMEOUT")]
    timeout: Option<u64>,

    /// Shared secret of the registered webhook endpoint
    #[arg(long, env = "XPAY_WEBHOOK_SECRET", hide_env_values = true)]
    webhook_secret: Option<String>,

    /// Whether incoming webhooks must carry a valid signature
    #[arg(long, env = "XPAY_WEBHOOK_VERIFY_SIGNATURE")]
    webhook_verify_signature: Option<bool>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the webhook receiver (default)
    Serve {
        /// Override the listen address (e.g., 0.0.0.0:3000)
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Test API connectivity and authentication
    Test,
    /// List payment methods available to the merchant
    PaymentMethods,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Serve { listen: None });
    let listen = match &command {
        Command::Serve { listen } => *listen,
        _ => None,
    };

    // Load configuration
    let overrides = Overrides {
        listen,
        api_key: args.api_key,
        merchant_id: args.merchant_id,
        environment: args.environment,
        base_url: args.base_url,
        timeout: args.timeout,
        webhook_secret: args.webhook_secret,
        webhook_verify_signature: args.webhook_verify_signature,
    };
    let loaded_config = ConfigLoader::new(&args.config, overrides)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let xpay = XPay::new(loaded_config.sdk.clone()).map_err(|e| {
        tracing::error!("Failed to create X-Pay client: {}", e);
        e
    })?;

    match command {
        Command::Test => Ok(commands::test_api(&xpay, &loaded_config).await),
        Command::PaymentMethods => Ok(commands::list_payment_methods(&xpay).await),
        Command::Serve { .. } => {
            tracing::info!("Starting xpay-server v{}", env!("CARGO_PKG_VERSION"));
            if loaded_config.webhook.secret.is_none() {
                tracing::warn!("No webhook secret configured; webhook deliveries will be rejected");
            }
            if !loaded_config.webhook.verify_signature {
                tracing::warn!("Webhook signature verification is disabled");
            }

            let listen_addr = loaded_config.listen;
            let state = AppState::new(xpay, loaded_config.webhook);
            let router = build_router(state);

            tracing::info!("Starting HTTP server on {}", listen_addr);
            run_server(router, listen_addr).await?;
            tracing::info!("Server shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

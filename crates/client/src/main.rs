//! `dukascan` command-line client.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use dukascan_client::flows::{self, Notice};
use dukascan_client::settings::CONFIG_DIR_ENV;
use dukascan_client::{ActionGate, FileSettingsStore, SettingsStore, SyncClient};
use dukascan_core::Product;

#[derive(Debug, Parser)]
#[command(name = "dukascan", version, about = "Barcode inventory entry")]
struct Cli {
    /// Directory holding settings.json
    #[arg(long, global = true, env = CONFIG_DIR_ENV)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the endpoint URL
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Save one product to the configured endpoint
    Save {
        #[arg(long)]
        barcode: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "1")]
        quantity: String,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    /// Print the stored URL
    Show,
    /// Validate and store a URL
    Set { url: String },
    /// Forget the stored URL
    Clear,
    /// Probe a URL (the stored one by default)
    Test { url: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dukascan_observability::init_cli();

    let cli = Cli::parse();
    let settings: Arc<dyn SettingsStore> = match &cli.config_dir {
        Some(dir) => Arc::new(FileSettingsStore::in_dir(dir)),
        None => Arc::new(
            FileSettingsStore::open_default().context("failed to locate settings directory")?,
        ),
    };
    let client = SyncClient::new();

    let notice = match cli.command {
        Command::Settings { action } => match action {
            SettingsAction::Show => {
                let url = flows::load_settings(settings.as_ref());
                if url.is_empty() {
                    println!("(not configured)");
                } else {
                    println!("{url}");
                }
                return Ok(ExitCode::SUCCESS);
            }
            SettingsAction::Set { url } => Some(flows::save_settings(settings.as_ref(), &url)),
            SettingsAction::Clear => {
                flows::clear_settings(settings.as_ref()).context("failed to clear settings")?;
                println!("Settings cleared.");
                return Ok(ExitCode::SUCCESS);
            }
            SettingsAction::Test { url } => {
                let url = url.unwrap_or_else(|| flows::load_settings(settings.as_ref()));
                run_gated(async move { flows::test_settings(&client, &url).await }).await
            }
        },
        Command::Save {
            barcode,
            name,
            price,
            description,
            quantity,
        } => {
            let product = Product::new(barcode, name, price)
                .with_description(description)
                .with_quantity(quantity);
            run_gated(async move {
                flows::submit_product(settings.as_ref(), &client, &product).await
            })
            .await
        }
    };

    let Some(notice) = notice else {
        eprintln!("Cancelled.");
        return Ok(ExitCode::FAILURE);
    };

    println!("{notice}");
    Ok(if notice.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run one request; ctrl-c aborts it.
async fn run_gated<F>(fut: F) -> Option<Notice>
where
    F: std::future::Future<Output = Notice> + Send + 'static,
{
    let gate = ActionGate::new();
    let pending = gate.spawn(fut)?;
    let abort = pending.abort_handle();

    tokio::select! {
        notice = pending.wait() => notice,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            None
        }
    }
}

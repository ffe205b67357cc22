//! MSB Quarterly Report Wizard
//!
//! Walks an operator through a quarterly filing in the terminal, submits
//! it, and keeps a backup copy of every submission.

mod cli;
mod screens;
mod sink;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use msb_core::delivery::NotificationSink;
use msb_core::storage::BackupStore;
use msb_core::wizard::{SystemClock, WizardController};
use msb_shared::{AppConfig, BackupConfig, EmailService};
use sink::HttpSubmissionSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "msb=debug"
    } else {
        "msb=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::load()?;
    if let Some(root) = cli.backup_dir {
        config.backup = BackupConfig::LocalFs { root };
    }
    let store = BackupStore::from_config(&config.backup)?;

    let sink: Box<dyn NotificationSink> = if cli.smtp {
        info!(smtp_host = %config.email.smtp_host, "Submitting by email");
        Box::new(EmailService::new(config.email.clone()))
    } else {
        info!(endpoint = %cli.endpoint, "Submitting to report server");
        Box::new(HttpSubmissionSink::new(cli.endpoint)?)
    };

    let mut wizard = WizardController::new(Arc::new(SystemClock));
    screens::run(&mut wizard, sink.as_ref(), &store).await
}

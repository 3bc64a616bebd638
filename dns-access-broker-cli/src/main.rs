//! DNS Access Broker entry point
//!
//! Assumes the DNS-account role, verifies Route53 access to the hosted zone and
//! reports the outcome. Configuration comes from the environment (see
//! [`config::CliConfig`]); logs go to stderr, the result to stdout.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use dns_access_broker_core::{AccessResult, AccessSetupService, CancellationToken};
use dns_access_broker_provider::AwsClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::CliConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    match run().await {
        Ok(result) if result.success => {
            if let Some(session) = &result.session {
                println!(
                    "Route53 access verified; session valid until {}",
                    session.expires_at().to_rfc3339()
                );
            }
            ExitCode::SUCCESS
        }
        Ok(result) => {
            println!("{}", result.diagnostic.unwrap_or_default());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run() -> Result<AccessResult> {
    let config = CliConfig::from_env()?;

    let client = AwsClient::builder(config.credentials)
        .endpoints(config.endpoints)
        .request_timeout(config.request_timeout)
        .build()
        .context("failed to build AWS client")?;
    let service = AccessSetupService::new(Arc::new(client), config.access)
        .context("invalid access configuration")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            ctrl_c.cancel();
        }
    });

    tracing::info!(
        "Setting up access to hosted zone {} via role {} in account {}",
        config.hosted_zone_id,
        config.dns_role_name,
        config.dns_account_id
    );
    Ok(service
        .setup_access_with_cancel(
            &config.dns_account_id,
            &config.dns_role_name,
            &config.external_id,
            &config.hosted_zone_id,
            &cancel,
        )
        .await)
}

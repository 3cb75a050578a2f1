use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use wanted_digest::core::ConfigManager;
use wanted_digest::digest::{LogMailer, SmtpMailer};
use wanted_digest::job_search::WantedClient;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_VAR: &str = "JOB_DIGEST_LOG_FILE";

fn init_logging() -> Result<()> {
    let json_layer = match std::env::var(LOG_FILE_VAR) {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path, e))?;

            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        Err(_) => None,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(json_layer)
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging()?;

    // Config and credential errors end the run here, before any network call.
    let config = ConfigManager::load()?;

    let source = WantedClient::new(&config.service.jobs_api_url)?;

    let report = if config.service.dry_run {
        wanted_digest::run(&config.digest, &source, &LogMailer).await?
    } else {
        let mailer = SmtpMailer::gmail(config.credentials.clone());
        wanted_digest::run(&config.digest, &source, &mailer).await?
    };

    info!(
        postings = report.postings,
        to = %report.recipient,
        "Digest run complete"
    );

    Ok(())
}

//! hello-producer - publishes one message to the hello queue.
//!
//! This binary:
//! 1. Connects to RabbitMQ and opens a channel
//! 2. Declares the queue (idempotent operation)
//! 3. Publishes a single text message, bounded by the publish timeout
//! 4. Closes the channel and connection
//!
//! Any failure prints the error and exits with status 1.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};

use hello_queue::util::logging;
use hello_queue::{Config, Message, Publisher};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    info!("producer_starting");

    match run(Config::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "producer_failed");
            println!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    info!(
        url = %config.redacted_url(),
        queue = %config.queue_name,
        publish_timeout_ms = config.publish_timeout.as_millis() as u64,
        "config_loaded"
    );

    let publisher = Publisher::connect(&config)
        .await
        .context("Failed to set up publisher")?;

    let message = Message::from_config(&config);

    let published = publisher.publish(&message).await;

    publisher.close().await;

    published.context("Failed to publish message")?;

    info!(body = %message.body_text(), " [x] Sent");
    info!("producer_done");

    Ok(())
}

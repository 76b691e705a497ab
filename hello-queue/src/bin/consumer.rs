//! hello-consumer - logs every message delivered on the hello queue.
//!
//! This binary:
//! 1. Connects to RabbitMQ and opens a channel
//! 2. Declares the queue (idempotent operation)
//! 3. Subscribes with automatic acknowledgment
//! 4. Logs one line per delivery until SIGINT/SIGTERM
//! 5. Closes the channel and connection, exiting with status 0
//!
//! Any connection, channel, declare, consume or signal-listener failure prints
//! the error and exits with status 1.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};

use hello_queue::util::{logging, wait_for_signal};
use hello_queue::{Config, Consumer};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    info!("consumer_starting");

    match run(Config::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "consumer_failed");
            println!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    info!(
        url = %config.redacted_url(),
        queue = %config.queue_name,
        "config_loaded"
    );

    let consumer = Consumer::subscribe(&config)
        .await
        .context("Failed to start consumer")?;

    let received = consumer
        .run(wait_for_signal())
        .await
        .context("Consumer stopped with an error")?;

    info!(received, "consumer_shutdown_complete");

    Ok(())
}

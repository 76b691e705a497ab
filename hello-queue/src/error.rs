//! Error type shared by the publisher, the consumer and the session.

use std::time::Duration;

use thiserror::Error;

/// Failures of a broker operation. Every variant is fatal to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to connect to broker")]
    Connect(#[source] lapin::Error),

    #[error("failed to open channel")]
    Channel(#[source] lapin::Error),

    #[error("failed to declare queue {queue}")]
    Declare {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("failed to publish message")]
    Publish(#[source] lapin::Error),

    #[error("publish not confirmed within {0:?}")]
    PublishTimeout(Duration),

    #[error("failed to start consumer on {queue}")]
    Consume {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("delivery stream failed")]
    Delivery(#[source] lapin::Error),

    #[error("failed to install signal handler")]
    Signal(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

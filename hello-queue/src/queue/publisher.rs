//! RabbitMQ publisher for the producer program.
//!
//! The publisher owns a single session. There is no reconnection: any broker
//! error ends the publisher's useful life and is returned to the caller.

use std::time::Duration;

use tokio::time::timeout;
use tracing::info;

use super::session::Session;
use super::types::{publish_options, Message, QueueSpec, DEFAULT_EXCHANGE};
use crate::config::Config;
use crate::error::{Error, Result};

pub struct Publisher {
    session: Session,
    queue: QueueSpec,
    publish_timeout: Duration,
}

impl Publisher {
    /// Connect to the broker and make sure the target queue exists.
    pub async fn connect(config: &Config) -> Result<Self> {
        let session = Session::open(&config.amqp_url).await?;
        let queue = QueueSpec::from_config(config);
        session.declare(&queue).await?;

        Ok(Self {
            session,
            queue,
            publish_timeout: config.publish_timeout,
        })
    }

    /// Publish through the default exchange, routed by queue name.
    ///
    /// The publish and the broker's confirmation together are bounded by the
    /// configured timeout.
    pub async fn publish(&self, message: &Message) -> Result<()> {
        let channel = self.session.channel();

        let send = async {
            channel
                .basic_publish(
                    DEFAULT_EXCHANGE,
                    self.queue.routing_key(),
                    publish_options(),
                    &message.body,
                    message.properties(),
                )
                .await
                .map_err(Error::Publish)?
                .await
                .map_err(Error::Publish)
        };

        timeout(self.publish_timeout, send)
            .await
            .map_err(|_| Error::PublishTimeout(self.publish_timeout))??;

        info!(
            queue = %self.queue.name,
            body = %message.body_text(),
            body_length = message.body.len(),
            "message_published"
        );

        Ok(())
    }

    /// Close the channel and connection.
    pub async fn close(self) {
        self.session.close().await;
        info!("rabbitmq_publisher_closed");
    }
}

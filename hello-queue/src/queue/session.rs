//! One broker connection with one channel.
//!
//! Both programs own their connection exclusively; nothing here is shared
//! across tasks.

use lapin::{Channel, Connection, ConnectionProperties, Queue};
use tracing::{info, warn};

use super::types::QueueSpec;
use crate::error::{Error, Result};

/// Reply code sent to the broker on a normal close.
const REPLY_SUCCESS: u16 = 200;

pub struct Session {
    connection: Connection,
    channel: Channel,
}

impl Session {
    /// Dial the broker and open a channel.
    pub async fn open(url: &str) -> Result<Self> {
        info!(url_length = url.len(), "rabbitmq_connecting");

        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(Error::Connect)?;

        info!("rabbitmq_connected");

        let channel = connection.create_channel().await.map_err(Error::Channel)?;

        info!(channel_id = channel.id(), "rabbitmq_channel_created");

        Ok(Self { connection, channel })
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Declare the queue if absent. Redeclaring with the same flags is a no-op
    /// on the broker side.
    pub async fn declare(&self, queue: &QueueSpec) -> Result<Queue> {
        let declared = self
            .channel
            .queue_declare(&queue.name, queue.declare_options(), queue.arguments())
            .await
            .map_err(|source| Error::Declare {
                queue: queue.name.clone(),
                source,
            })?;

        info!(
            queue = %declared.name(),
            message_count = declared.message_count(),
            consumer_count = declared.consumer_count(),
            "rabbitmq_queue_declared"
        );

        Ok(declared)
    }

    /// Close the channel, then the connection. Close failures are logged only.
    pub async fn close(self) {
        if let Err(e) = self.channel.close(REPLY_SUCCESS, "Normal shutdown").await {
            warn!(error = %e, "rabbitmq_channel_close_error");
        }

        if let Err(e) = self
            .connection
            .close(REPLY_SUCCESS, "Normal shutdown")
            .await
        {
            warn!(error = %e, "rabbitmq_connection_close_error");
        }

        info!("rabbitmq_session_closed");
    }
}

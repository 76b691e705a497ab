//! Queue and message definitions shared by the producer and the consumer.
//!
//! The declare, publish and consume flags are fixed here so both programs
//! always agree on the queue's properties.

use std::borrow::Cow;

use lapin::{
    message::Delivery,
    options::{BasicConsumeOptions, BasicPublishOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties,
};

use crate::config::{Config, DEFAULT_CONTENT_TYPE};

/// The default (unnamed) exchange, which routes by queue name.
pub const DEFAULT_EXCHANGE: &str = "";

/// A named, non-durable, non-exclusive queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: String,
}

impl QueueSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.queue_name.clone())
    }

    /// Declare flags: not durable, not auto-deleted, not exclusive, waits
    /// for the broker's reply.
    pub fn declare_options(&self) -> QueueDeclareOptions {
        QueueDeclareOptions {
            passive: false,
            durable: false,
            exclusive: false,
            auto_delete: false,
            nowait: false,
        }
    }

    pub fn arguments(&self) -> FieldTable {
        FieldTable::default()
    }

    /// Routing key that reaches this queue through the default exchange.
    pub fn routing_key(&self) -> &str {
        &self.name
    }
}

/// Publish flags: neither mandatory nor immediate.
pub fn publish_options() -> BasicPublishOptions {
    BasicPublishOptions {
        mandatory: false,
        immediate: false,
    }
}

/// Consume flags: the broker acknowledges on dispatch.
pub fn consume_options() -> BasicConsumeOptions {
    BasicConsumeOptions {
        no_local: false,
        no_ack: true,
        exclusive: false,
        nowait: false,
    }
}

/// An opaque payload plus its content type label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: Vec<u8>,
    pub content_type: String,
}

impl Message {
    pub fn new(body: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
        }
    }

    /// A `text/plain` message.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(body.into().into_bytes(), DEFAULT_CONTENT_TYPE)
    }

    /// The message the producer sends for a given configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.message_body.as_bytes(), config.content_type.as_str())
    }

    pub fn properties(&self) -> BasicProperties {
        BasicProperties::default().with_content_type(self.content_type.clone().into())
    }

    /// Body as text for logging; invalid UTF-8 is replaced, never rejected.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

impl From<&Delivery> for Message {
    fn from(delivery: &Delivery) -> Self {
        let content_type = delivery
            .properties
            .content_type()
            .as_ref()
            .map(|ct| ct.to_string())
            .unwrap_or_default();

        Self {
            body: delivery.data.clone(),
            content_type,
        }
    }
}

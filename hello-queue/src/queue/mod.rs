//! Queue module for RabbitMQ operations.
//!
//! This module provides:
//! - The queue and message definitions both programs agree on
//! - A session owning one connection and one channel
//! - The publisher used by the producer
//! - The auto-ack consumer used by the consumer
//!
//! ## Flow
//!
//! ```text
//! hello-producer → default exchange → "hello" queue → hello-consumer
//! ```

pub mod consumer;
pub mod publisher;
pub mod session;
pub mod types;

pub use consumer::{drain, Consumer, DrainEnd};
pub use publisher::Publisher;
pub use session::Session;
pub use types::{consume_options, publish_options, Message, QueueSpec, DEFAULT_EXCHANGE};

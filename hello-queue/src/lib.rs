//! hello-queue - minimal RabbitMQ producer and consumer.
//!
//! This library provides the shared modules for the two binaries:
//! - `hello-producer`: declares the queue and publishes one message
//! - `hello-consumer`: declares the queue and logs every delivery until shutdown
//!
//! ## Architecture
//!
//! ```text
//! hello-producer → "hello" queue → hello-consumer
//! ```

pub mod config;
pub mod error;
pub mod queue;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use queue::{Consumer, Message, Publisher, QueueSpec};

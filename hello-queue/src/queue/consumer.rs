//! RabbitMQ consumer for the consumer program.
//!
//! Deliveries are auto-acknowledged by the broker, so the loop only has to
//! log them. It runs until the shutdown future resolves or the broker ends
//! the subscription.

use std::future::Future;

use futures::{Stream, StreamExt};
use tracing::{info, warn};

use super::session::Session;
use super::types::{consume_options, Message, QueueSpec};
use crate::config::Config;
use crate::error::{Error, Result};

/// Why [`drain`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainEnd {
    /// The shutdown future resolved.
    Shutdown,
    /// The delivery stream ended.
    Closed,
}

/// Pass every message from `deliveries` to `handle`, in order, until
/// `shutdown` resolves or the stream ends. Returns how many messages were
/// handled. The first stream error, or an error from `shutdown`, is returned
/// as-is.
pub async fn drain<S, E, Sd, F>(
    deliveries: S,
    shutdown: Sd,
    mut handle: F,
) -> std::result::Result<(u64, DrainEnd), E>
where
    S: Stream<Item = std::result::Result<Message, E>>,
    Sd: Future<Output = std::result::Result<(), E>>,
    F: FnMut(&Message),
{
    tokio::pin!(deliveries);
    tokio::pin!(shutdown);

    let mut received = 0u64;

    loop {
        tokio::select! {
            biased;

            stop = &mut shutdown => return stop.map(|()| (received, DrainEnd::Shutdown)),
            delivery = deliveries.next() => match delivery {
                Some(Ok(message)) => {
                    received += 1;
                    handle(&message);
                }
                Some(Err(e)) => return Err(e),
                None => return Ok((received, DrainEnd::Closed)),
            },
        }
    }
}

pub struct Consumer {
    session: Session,
    queue: QueueSpec,
    inner: lapin::Consumer,
}

impl Consumer {
    /// Connect, declare the queue and start an auto-ack subscription.
    pub async fn subscribe(config: &Config) -> Result<Self> {
        let session = Session::open(&config.amqp_url).await?;
        let queue = QueueSpec::from_config(config);
        session.declare(&queue).await?;

        let inner = session
            .channel()
            .basic_consume(
                &queue.name,
                &config.consumer_tag,
                consume_options(),
                queue.arguments(),
            )
            .await
            .map_err(|source| Error::Consume {
                queue: queue.name.clone(),
                source,
            })?;

        info!(
            queue = %queue.name,
            consumer_tag = %inner.tag(),
            "rabbitmq_consumer_started"
        );

        Ok(Self {
            session,
            queue,
            inner,
        })
    }

    /// Log every delivery until `shutdown` resolves, then close the session.
    /// A failing `shutdown` future is returned as the run's error.
    pub async fn run<Sd>(self, shutdown: Sd) -> Result<u64>
    where
        Sd: Future<Output = Result<()>>,
    {
        let Self {
            session,
            queue,
            inner,
        } = self;

        info!(queue = %queue.name, "Waiting for messages. To exit press CTRL+C");

        let deliveries = inner.map(|delivery| {
            delivery
                .map(|d| Message::from(&d))
                .map_err(Error::Delivery)
        });

        let outcome = drain(deliveries, shutdown, |message| {
            info!(
                queue = %queue.name,
                body = %message.body_text(),
                content_type = %message.content_type,
                "message_received"
            );
        })
        .await;

        let received = match outcome {
            Ok((received, DrainEnd::Shutdown)) => {
                info!(received, "consumer_stopping");
                received
            }
            Ok((received, DrainEnd::Closed)) => {
                warn!(received, "rabbitmq_consumer_closed");
                received
            }
            Err(e) => {
                session.close().await;
                return Err(e);
            }
        };

        session.close().await;
        Ok(received)
    }
}

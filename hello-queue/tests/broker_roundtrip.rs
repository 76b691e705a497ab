// Round trips against a live broker.
// Run with a local RabbitMQ: `cargo test -- --ignored` (honors AMQP_URL).

use std::time::Duration;

use futures::StreamExt;
use lapin::options::QueueDeleteOptions;

use hello_queue::queue::{consume_options, drain, DrainEnd, Session};
use hello_queue::{Config, Message, Publisher, QueueSpec};

fn test_config(suffix: &str) -> Config {
    let defaults = Config::from_env();
    Config {
        queue_name: format!("hello-test-{}-{}", suffix, std::process::id()),
        ..defaults
    }
}

async fn give_up_after(limit: Duration) -> Result<(), lapin::Error> {
    tokio::time::sleep(limit).await;
    Ok(())
}

async fn delete_queue(config: &Config) {
    let session = Session::open(&config.amqp_url).await.unwrap();
    session
        .channel()
        .queue_delete(&config.queue_name, QueueDeleteOptions::default())
        .await
        .unwrap();
    session.close().await;
}

#[tokio::test]
#[ignore = "needs a running RabbitMQ broker"]
async fn test_published_bytes_arrive_unchanged() {
    let config = test_config("roundtrip");

    let publisher = Publisher::connect(&config).await.unwrap();
    publisher.publish(&Message::text("Hello World!")).await.unwrap();
    publisher.close().await;

    let session = Session::open(&config.amqp_url).await.unwrap();
    let queue = QueueSpec::from_config(&config);
    session.declare(&queue).await.unwrap();

    let consumer = session
        .channel()
        .basic_consume(&queue.name, "", consume_options(), queue.arguments())
        .await
        .unwrap();

    let mut received = Vec::new();
    let (count, end) = drain(
        consumer.map(|d| d.map(|d| Message::from(&d))).take(1),
        give_up_after(Duration::from_secs(5)),
        |m| received.push(m.clone()),
    )
    .await
    .unwrap();

    assert_eq!(end, DrainEnd::Closed);
    assert_eq!(count, 1);
    assert_eq!(received[0].body, b"Hello World!".to_vec());
    assert_eq!(received[0].content_type, "text/plain");

    session.close().await;
    delete_queue(&config).await;
}

#[tokio::test]
#[ignore = "needs a running RabbitMQ broker"]
async fn test_declare_is_idempotent() {
    let config = test_config("declare");
    let queue = QueueSpec::from_config(&config);

    let first = Session::open(&config.amqp_url).await.unwrap();
    let second = Session::open(&config.amqp_url).await.unwrap();

    first.declare(&queue).await.unwrap();
    first.declare(&queue).await.unwrap();
    let declared = second.declare(&queue).await.unwrap();

    assert_eq!(declared.name().as_str(), queue.name);

    first.close().await;
    second.close().await;
    delete_queue(&config).await;
}

#[tokio::test]
#[ignore = "needs a running RabbitMQ broker"]
async fn test_messages_arrive_in_publish_order() {
    let config = test_config("order");

    let publisher = Publisher::connect(&config).await.unwrap();
    for body in ["first", "second", "third"] {
        publisher.publish(&Message::text(body)).await.unwrap();
    }
    publisher.close().await;

    let session = Session::open(&config.amqp_url).await.unwrap();
    let queue = QueueSpec::from_config(&config);
    let consumer = session
        .channel()
        .basic_consume(&queue.name, "", consume_options(), queue.arguments())
        .await
        .unwrap();

    let mut bodies = Vec::new();
    let (count, _) = drain(
        consumer.map(|d| d.map(|d| Message::from(&d))).take(3),
        give_up_after(Duration::from_secs(5)),
        |m| bodies.push(m.body_text().into_owned()),
    )
    .await
    .unwrap();

    assert_eq!(count, 3);
    assert_eq!(bodies, vec!["first", "second", "third"]);

    session.close().await;
    delete_queue(&config).await;
}

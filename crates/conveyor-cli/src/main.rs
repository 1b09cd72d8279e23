//! Demo: dispatch tasks through in-memory backends and watch a toy
//! consumer drive them to completion while the handles poll.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;

use conveyor_core::impls::{InMemoryCache, InMemoryStream};
use conveyor_core::ports::PayloadCache;
use conveyor_core::{CorrelationKey, DataFrame, TaskProducer, TaskStatus, TaskType};

const TTL: Duration = Duration::from_secs(180);

/// Toy consumer: block on the stream, pretend to work, write status and
/// result directly into the cache the way a real worker would.
async fn consumer_loop(stream: Arc<InMemoryStream>, cache: Arc<InMemoryCache>, tasks: usize) {
    for offset in 0..tasks {
        let message = stream.wait_for(offset).await;
        let key = CorrelationKey::from_base(&message.redis_key);
        println!(
            "[consumer] picked up {} task for model {} (key {})",
            message.task_type, message.model_id, message.redis_key
        );

        cache
            .set(&key.status(), TaskStatus::InProgress.to_bytes(), TTL)
            .await
            .expect("in-memory cache write");

        // Pretend the work takes a moment.
        sleep(Duration::from_millis(50)).await;

        let result = json!({"model_id": message.model_id, "ok": true});
        cache
            .set(&key.result(), serde_json::to_vec(&result).unwrap(), TTL)
            .await
            .expect("in-memory cache write");
        cache
            .set(&key.status(), TaskStatus::Complete.to_bytes(), TTL)
            .await
            .expect("in-memory cache write");
        println!("[consumer] completed {}", message.redis_key);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cache = Arc::new(InMemoryCache::new());
    let stream = Arc::new(InMemoryStream::new());
    let producer = TaskProducer::new(cache.clone(), stream.clone());

    let consumer = tokio::spawn(consumer_loop(stream.clone(), cache.clone(), 2));

    let frame = DataFrame::new(
        vec!["sqft".to_string(), "price".to_string()],
        vec![
            vec![json!(1100), json!(235000)],
            vec![json!(1850), json!(410000)],
        ],
    );

    let predict = producer
        .dispatch(
            TaskType::Predict,
            Some("acme"),
            42,
            &json!({"rows": 2}),
            Some(&frame),
        )
        .await
        .expect("dispatch predict");
    println!("[producer] dispatched predict, handle key {}", predict.key());

    let finetune = producer
        .dispatch(TaskType::Finetune, None, 7, &json!({}), None)
        .await
        .expect("dispatch finetune");
    println!(
        "[producer] dispatched finetune, handle key {}",
        finetune.key()
    );

    // Poll the handles until both tasks reach a terminal status.
    for handle in [&predict, &finetune] {
        loop {
            match handle.get_status().await.expect("status read") {
                Some(status) if status.is_terminal() => {
                    let result = handle.get_result().await.expect("result read");
                    println!(
                        "[caller] {} finished with status {status}, result {:?}",
                        handle.key(),
                        result
                    );
                    break;
                }
                Some(status) => println!("[caller] {} is {status}", handle.key()),
                None => println!("[caller] {} has no status yet", handle.key()),
            }
            sleep(Duration::from_millis(20)).await;
        }
    }

    consumer.await.expect("consumer loop");
}

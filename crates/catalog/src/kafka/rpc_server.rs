use crate::{
    handler::{ProductRpcHandler, RpcPattern},
    kafka::reply::{CORRELATION_ID_HEADER, REPLY_TOPIC_HEADER, RpcReply, RpcRequest},
};
use anyhow::Result;
use opentelemetry::{
    Context,
    context::FutureExt,
    global,
};
use rdkafka::{
    Message,
    consumer::{Consumer, StreamConsumer},
    message::{BorrowedHeaders, BorrowedMessage, Headers},
};
use shared::{abstract_trait::DynKafka, errors::ServiceError, utils::KafkaHeaderExtractor};
use std::sync::Arc;
use tokio::{
    sync::broadcast,
    time::{Duration, sleep},
};
use tracing::{debug, error, info, warn};

const RECEIVE_ERROR_BACKOFF: Duration = Duration::from_secs(5);

pub struct KafkaRpcServer {
    consumer: StreamConsumer,
    handler: Arc<ProductRpcHandler>,
    publisher: DynKafka,
    topic_prefix: String,
}

impl KafkaRpcServer {
    pub fn new(
        consumer: StreamConsumer,
        handler: Arc<ProductRpcHandler>,
        publisher: DynKafka,
        topic_prefix: impl Into<String>,
    ) -> Self {
        Self {
            consumer,
            handler,
            publisher,
            topic_prefix: topic_prefix.into(),
        }
    }

    /// One request topic per pattern.
    pub fn topics(topic_prefix: &str) -> Vec<String> {
        RpcPattern::ALL
            .iter()
            .map(|pattern| format!("{topic_prefix}{pattern}"))
            .collect()
    }

    pub async fn start_with_shutdown(self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let topics = Self::topics(&self.topic_prefix);
        let topic_refs: Vec<&str> = topics.iter().map(String::as_str).collect();
        self.consumer.subscribe(&topic_refs)?;

        info!("✅ Kafka RPC server started, subscribed to {topics:?}");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("🛑 Kafka RPC server received shutdown signal");
                    break;
                }

                message_result = self.consumer.recv() => {
                    match message_result {
                        Err(e) => {
                            error!("Kafka receive error: {e}");
                            if shutdown_during(&mut shutdown_rx, RECEIVE_ERROR_BACKOFF).await {
                                info!("🛑 Kafka RPC server received shutdown signal");
                                break;
                            }
                            continue;
                        }
                        Ok(message) => {
                            let parent_cx = extract_trace_context(message.headers());
                            let request = to_request(&message, &self.topic_prefix);

                            debug!(
                                topic = %request.topic,
                                correlation_id = ?request.correlation_id,
                                payload_len = request.payload.len(),
                                "Request received"
                            );

                            let handler = self.handler.clone();
                            let publisher = self.publisher.clone();

                            tokio::spawn(
                                async move {
                                    let topic = request.topic.clone();
                                    if let Err(e) = process_request(&handler, &publisher, request).await {
                                        error!(topic = %topic, "Failed to reply to request: {e}");
                                    }
                                }
                                .with_context(parent_cx),
                            );
                        }
                    }
                }
            }
        }

        info!("✅ Kafka RPC server stopped gracefully");
        Ok(())
    }
}

/// Waits out `delay` unless shutdown is broadcast first. Returns true on shutdown.
async fn shutdown_during(shutdown_rx: &mut broadcast::Receiver<()>, delay: Duration) -> bool {
    tokio::select! {
        _ = shutdown_rx.recv() => true,
        _ = sleep(delay) => false,
    }
}

/// Runs one request through the handler and publishes the reply. Requests
/// without a correlation id are fire-and-forget and get no reply.
pub async fn process_request(
    handler: &ProductRpcHandler,
    publisher: &DynKafka,
    request: RpcRequest,
) -> Result<(), ServiceError> {
    let result = handler.handle(&request.pattern, &request.payload).await;

    let Some(correlation_id) = request.correlation_id.as_deref() else {
        warn!(topic = %request.topic, "Request has no correlation id, no reply sent");
        return Ok(());
    };

    let reply_topic = request.reply_topic();
    let reply = RpcReply::from_result(correlation_id, result);
    let body = serde_json::to_vec(&reply).map_err(|e| ServiceError::Internal(e.to_string()))?;

    publisher
        .publish(
            &reply_topic,
            request.key.as_deref().unwrap_or(correlation_id),
            &body,
            &[(CORRELATION_ID_HEADER, correlation_id)],
        )
        .await
}

fn to_request(message: &BorrowedMessage<'_>, topic_prefix: &str) -> RpcRequest {
    let topic = message.topic().to_string();
    let pattern = topic
        .strip_prefix(topic_prefix)
        .unwrap_or(&topic)
        .to_string();

    let key = message
        .key()
        .and_then(|k| std::str::from_utf8(k).ok())
        .map(|s| s.to_string());

    RpcRequest {
        pattern,
        key,
        correlation_id: header_value(message.headers(), CORRELATION_ID_HEADER),
        reply_topic: header_value(message.headers(), REPLY_TOPIC_HEADER),
        payload: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
        topic,
    }
}

fn header_value(headers: Option<&BorrowedHeaders>, name: &str) -> Option<String> {
    headers?
        .iter()
        .find(|header| header.key == name)
        .and_then(|header| header.value)
        .and_then(|value| std::str::from_utf8(value).ok())
        .map(str::to_string)
}

fn extract_trace_context(headers: Option<&BorrowedHeaders>) -> Context {
    match headers {
        Some(headers) => global::get_text_map_propagator(|propagator| {
            propagator.extract(&KafkaHeaderExtractor(headers))
        }),
        None => Context::current(),
    }
}

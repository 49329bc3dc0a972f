use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::StreamConsumer;
use rdkafka::error::KafkaResult;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use tokio::time::Duration;
use tracing::{error, info};

use crate::abstract_trait::KafkaTrait;
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct Kafka {
    producer: FutureProducer,
    brokers: String,
}

impl Kafka {
    pub fn new(brokers: &str) -> KafkaResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "6000")
            .set("allow.auto.create.topics", "true")
            .create()?;

        info!("Kafka producer connected successfully");

        Ok(Kafka {
            producer,
            brokers: brokers.to_string(),
        })
    }

    pub fn consumer(&self, group_id: &str) -> KafkaResult<StreamConsumer> {
        ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .set("group.id", group_id)
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "6000")
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "latest")
            .set("allow.auto.create.topics", "true")
            .create()
    }
}

#[async_trait]
impl KafkaTrait for Kafka {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        value: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<(), ServiceError> {
        let headers = headers
            .iter()
            .fold(OwnedHeaders::new(), |acc, (name, val)| {
                acc.insert(Header {
                    key: *name,
                    value: Some(*val),
                })
            });

        let record = FutureRecord::to(topic)
            .key(key)
            .payload(value)
            .headers(headers);

        match self
            .producer
            .send(record, Timeout::After(Duration::from_secs(5)))
            .await
        {
            Ok(_) => {
                info!(topic, "Message sent successfully");
                Ok(())
            }
            Err((err, _message)) => {
                error!(topic, "Failed to send message: {err}");
                Err(ServiceError::from(err))
            }
        }
    }
}

use opentelemetry::propagation::Extractor;
use rdkafka::message::{BorrowedHeaders, Headers};

/// Reads W3C trace context out of inbound Kafka message headers.
pub struct KafkaHeaderExtractor<'a>(pub &'a BorrowedHeaders);

impl Extractor for KafkaHeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|header| header.key == key)
            .and_then(|header| header.value)
            .and_then(|value| std::str::from_utf8(value).ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|header| header.key).collect()
    }
}

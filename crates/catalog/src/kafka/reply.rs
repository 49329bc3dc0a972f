use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::errors::ErrorResponse;

pub const CORRELATION_ID_HEADER: &str = "kafka_correlationId";
pub const REPLY_TOPIC_HEADER: &str = "kafka_replyTopic";

/// One inbound request, detached from the Kafka message it arrived in.
#[derive(Debug, Clone)]
pub struct RpcRequest {
    pub topic: String,
    pub pattern: String,
    pub key: Option<String>,
    pub correlation_id: Option<String>,
    pub reply_topic: Option<String>,
    pub payload: Vec<u8>,
}

impl RpcRequest {
    /// Where the reply goes: the caller's `kafka_replyTopic`, else `<topic>.reply`.
    pub fn reply_topic(&self) -> String {
        self.reply_topic
            .clone()
            .unwrap_or_else(|| format!("{}.reply", self.topic))
    }
}

/// Reply envelope published back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReply {
    pub id: String,
    pub response: Option<Value>,
    pub err: Option<ErrorResponse>,
    pub is_disposed: bool,
}

impl RpcReply {
    pub fn from_result(id: impl Into<String>, result: Result<Value, ErrorResponse>) -> Self {
        let (response, err) = match result {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err)),
        };

        Self {
            id: id.into(),
            response,
            err,
            is_disposed: true,
        }
    }
}

use bon::bon;
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

use super::header::{HeaderValue, Headers};

/// 信封元数据
///
/// - `message_id`：传输身份，每个信封独立生成；
/// - `correlation_id`：同一次业务会话中的全部消息共享；
/// - `causation_id`：直接触发本消息的消息 ID，会话中的首条消息为空；
/// - `message_type`/`name`：线上类型标识与可读名称；
/// - `created_unix_time` 在构造时由 `created` 推导，二者始终一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelopeMetadata {
    message_id: String,
    correlation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    causation_id: Option<String>,
    message_type: String,
    name: String,
    #[serde(default)]
    headers: Headers,
    created: Timestamp,
    #[serde(default)]
    created_unix_time: Option<i64>,
}

#[bon]
impl EventEnvelopeMetadata {
    #[builder]
    pub fn new(
        message_id: String,
        correlation_id: String,
        causation_id: Option<String>,
        message_type: String,
        name: String,
        #[builder(default)] headers: Headers,
        created: Timestamp,
    ) -> Self {
        Self {
            message_id,
            correlation_id,
            causation_id,
            message_type,
            name,
            headers,
            created,
            created_unix_time: Some(created.timestamp()),
        }
    }
}

impl EventEnvelopeMetadata {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&HeaderValue> {
        self.headers.get(key)
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn created_unix_time(&self) -> Option<i64> {
        self.created_unix_time
    }

    /// 是否为会话中的首条消息
    pub fn is_initiating(&self) -> bool {
        self.causation_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn unix_time_is_derived_from_created() {
        let created = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        let meta = EventEnvelopeMetadata::builder()
            .message_id("m-1".into())
            .correlation_id("c-1".into())
            .message_type("CustomerUpdated".into())
            .name("customer_updated".into())
            .created(created)
            .build();

        assert_eq!(meta.created_unix_time(), Some(created.timestamp()));
        assert!(meta.headers().is_empty());
        assert!(meta.is_initiating());
    }

    #[test]
    fn missing_optional_fields_decode_with_defaults() {
        let meta: EventEnvelopeMetadata = serde_json::from_value(json!({
            "messageId": "m-1",
            "correlationId": "c-1",
            "messageType": "CustomerUpdated",
            "name": "customer_updated",
            "created": "2024-01-01T00:00:00Z",
        }))
        .unwrap();

        assert_eq!(meta.causation_id(), None);
        assert!(meta.headers().is_empty());
        assert_eq!(meta.created_unix_time(), None);
    }

    #[test]
    fn absent_causation_is_omitted_on_the_wire() {
        let meta = EventEnvelopeMetadata::builder()
            .message_id("m-1".into())
            .correlation_id("c-1".into())
            .message_type("CustomerUpdated".into())
            .name("customer_updated".into())
            .created(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .build();

        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.get("causationId").is_none());
        assert_eq!(value["createdUnixTime"], json!(1_704_067_200));
        assert_eq!(value["headers"], json!({}));
    }
}

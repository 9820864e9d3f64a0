use bon::Builder;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::domain_event::{DomainEvent, SharedDomainEvent};
use crate::envelope::EventEnvelope;
use crate::error::{DomainError, DomainResult};

use super::finite::ensure_finite;
use super::message_serializer::MessageSerializer;
use super::registry::MessageTypeRegistry;

const ENVELOPE: &str = "EventEnvelope";

/// 基于 serde_json 的消息序列化器
#[derive(Builder, Debug, Clone, Default)]
pub struct JsonMessageSerializer {
    /// 类型注册表，按名称反序列化时使用
    #[builder(default)]
    registry: Arc<MessageTypeRegistry>,
    /// 是否输出带缩进的 JSON
    #[builder(default)]
    pretty: bool,
}

impl JsonMessageSerializer {
    pub fn new(registry: Arc<MessageTypeRegistry>) -> Self {
        Self {
            registry,
            pretty: false,
        }
    }

    pub fn registry(&self) -> &MessageTypeRegistry {
        &self.registry
    }

    fn to_text<T: Serialize + ?Sized>(&self, value: &T, type_name: &str) -> DomainResult<String> {
        ensure_finite(value).map_err(|e| DomainError::encoding(type_name, e))?;
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| DomainError::encoding(type_name, e))
    }
}

impl MessageSerializer for JsonMessageSerializer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn serialize_envelope<P>(&self, envelope: &EventEnvelope<P>) -> DomainResult<String>
    where
        P: Serialize,
    {
        self.to_text(envelope, envelope.metadata().message_type())
    }

    fn serialize<M: DomainEvent>(&self, message: &M) -> DomainResult<String> {
        self.to_text(message, M::EVENT_TYPE)
    }

    fn deserialize<M: DomainEvent>(&self, text: &str) -> DomainResult<M> {
        serde_json::from_str(text).map_err(|e| DomainError::deserialization(M::EVENT_TYPE, e))
    }

    fn deserialize_by_name(
        &self,
        text: &str,
        type_name: &str,
    ) -> DomainResult<SharedDomainEvent> {
        // 先确认类型已注册，未知类型优先于格式错误
        if !self.registry.contains(type_name) {
            warn!(message_type = type_name, "unknown message type");
            return Err(DomainError::unknown_type(type_name));
        }
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::deserialization(type_name, e))?;
        self.registry.decode(type_name, value)
    }

    fn deserialize_envelope(&self, text: &str) -> DomainResult<EventEnvelope<Value>> {
        serde_json::from_str(text).map_err(|e| DomainError::deserialization(ENVELOPE, e))
    }

    fn resolve_envelope(&self, text: &str) -> DomainResult<EventEnvelope<SharedDomainEvent>> {
        let (metadata, payload) = self.deserialize_envelope(text)?.into_parts();
        let event = self.registry.decode(metadata.message_type(), payload)?;
        Ok(EventEnvelope::new(metadata, event))
    }

    fn deserialize_typed_envelope<E: DomainEvent>(
        &self,
        text: &str,
    ) -> DomainResult<EventEnvelope<E>> {
        let envelope: EventEnvelope<E> =
            serde_json::from_str(text).map_err(|e| DomainError::deserialization(E::EVENT_TYPE, e))?;
        if envelope.metadata().message_type() != E::EVENT_TYPE {
            return Err(DomainError::deserialization(
                E::EVENT_TYPE,
                format!(
                    "message type mismatch: found={}",
                    envelope.metadata().message_type()
                ),
            ));
        }
        Ok(envelope)
    }
}

use crate::error::AppResult;
use async_trait::async_trait;
use delivery_domain::clock::Timestamp;
use delivery_domain::domain_event::SharedDomainEvent;
use delivery_domain::envelope::EventEnvelope;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// 待投递的出站消息：已编码的信封文本及其路由信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxMessage {
    pub message_id: String,
    pub correlation_id: String,
    pub message_type: String,
    pub content_type: String,
    pub body: String,
    pub created: Timestamp,
}

impl OutboxMessage {
    pub fn from_envelope(
        envelope: &EventEnvelope<SharedDomainEvent>,
        content_type: &str,
        body: String,
    ) -> Self {
        let metadata = envelope.metadata();
        Self {
            message_id: metadata.message_id().to_string(),
            correlation_id: metadata.correlation_id().to_string(),
            message_type: metadata.message_type().to_string(),
            content_type: content_type.to_string(),
            body,
            created: metadata.created(),
        }
    }
}

/// Outbox：保证同一工作单元产生的消息至少投递一次
#[async_trait]
pub trait Outbox: Send + Sync {
    /// 按顺序保存一批消息
    async fn save(&self, messages: Vec<OutboxMessage>) -> AppResult<()>;

    /// 读取尚未投递的消息（按保存顺序）
    async fn pending(&self) -> AppResult<Vec<OutboxMessage>>;
}

/// 基于内存的 Outbox，用于测试与本地演示
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    messages: Mutex<Vec<OutboxMessage>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出全部消息，模拟投递完成
    pub fn drain(&self) -> Vec<OutboxMessage> {
        std::mem::take(&mut *self.messages.lock())
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

#[async_trait]
impl Outbox for InMemoryOutbox {
    async fn save(&self, messages: Vec<OutboxMessage>) -> AppResult<()> {
        self.messages.lock().extend(messages);
        Ok(())
    }

    async fn pending(&self) -> AppResult<Vec<OutboxMessage>> {
        Ok(self.messages.lock().clone())
    }
}

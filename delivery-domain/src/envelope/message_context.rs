use bon::Builder;

use super::header::{HeaderValue, Headers};
use super::metadata::EventEnvelopeMetadata;

/// 封装信封时使用的消息上下文
///
/// - `correlation_id`：为空时由信封工厂生成；
/// - `causation_id`：触发本次操作的消息 ID（例如入站命令 ID），首条消息为空；
/// - `headers`：复制到每个信封的传输头。
#[derive(Builder, Default, Debug, Clone, PartialEq)]
pub struct MessageContext {
    /// 关联ID
    correlation_id: Option<String>,
    /// 因果ID
    causation_id: Option<String>,
    #[builder(default)]
    headers: Headers,
}

impl MessageContext {
    /// 由父消息派生后续消息的上下文：沿用关联 ID，因果 ID 指向父消息
    pub fn caused_by(parent: &EventEnvelopeMetadata) -> Self {
        Self {
            correlation_id: Some(parent.correlation_id().to_string()),
            causation_id: Some(parent.message_id().to_string()),
            headers: Headers::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

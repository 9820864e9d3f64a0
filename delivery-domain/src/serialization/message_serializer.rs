use serde::Serialize;
use serde_json::Value;

use crate::domain_event::{DomainEvent, SharedDomainEvent};
use crate::envelope::EventEnvelope;
use crate::error::{DomainError, DomainResult};

/// 消息序列化器
///
/// 两类能力：
/// - 泛型的类型化往返（`serialize`/`deserialize`/`deserialize_typed_envelope`）；
/// - 基于类型名的动态反序列化（`deserialize_by_name`/`deserialize_bytes`/`resolve_envelope`）。
///
/// 该 trait 带有泛型方法，通常以具体实现类型注入使用。
pub trait MessageSerializer: Send + Sync {
    /// 编码结果的内容类型（如 `application/json`）
    fn content_type(&self) -> &'static str;

    /// 编码完整信封（元数据 + 载荷）
    fn serialize_envelope<P>(&self, envelope: &EventEnvelope<P>) -> DomainResult<String>
    where
        P: Serialize;

    /// 仅编码消息载荷
    fn serialize<M: DomainEvent>(&self, message: &M) -> DomainResult<String>;

    /// 按编译期给定的类型解码载荷
    fn deserialize<M: DomainEvent>(&self, text: &str) -> DomainResult<M>;

    /// 按注册表中的类型名解码载荷
    fn deserialize_by_name(&self, text: &str, type_name: &str)
    -> DomainResult<SharedDomainEvent>;

    /// 解码信封，载荷保持为松散的 JSON 值（例如路由之前尚不知道具体类型）
    fn deserialize_envelope(&self, text: &str) -> DomainResult<EventEnvelope<Value>>;

    /// 解码信封，并按元数据中的 `messageType` 经注册表解析载荷
    fn resolve_envelope(&self, text: &str) -> DomainResult<EventEnvelope<SharedDomainEvent>>;

    /// 解码为具体载荷类型的信封；`messageType` 与目标类型不符时报错
    fn deserialize_typed_envelope<E: DomainEvent>(
        &self,
        text: &str,
    ) -> DomainResult<EventEnvelope<E>>;

    /// 字节版本：先按 UTF-8 解码为文本，再按类型名解码
    fn deserialize_bytes(&self, bytes: &[u8], type_name: &str) -> DomainResult<SharedDomainEvent> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| DomainError::deserialization(type_name, e))?;
        self.deserialize_by_name(text, type_name)
    }
}

use crate::clock::Timestamp;
use crate::error::{DomainError, DomainResult};
use crate::serialization::finite::ensure_finite;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 事件身份：唯一标识与发生时间
pub trait EventIdentity {
    /// 事件唯一标识（领域身份，区别于信封的消息 ID）
    fn event_id(&self) -> &str;

    /// 事件发生时间（UTC）
    fn occurred_at(&self) -> Timestamp;
}

/// 领域事件载荷需要满足的通用能力边界
///
/// `EVENT_TYPE` 是线上类型标识，反序列化时据此在注册表中查找具体类型；
/// 一经发布即不可更改，重命名属于破坏性变更。
pub trait DomainEvent:
    EventIdentity + Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 稳定的线上类型名（如 `CustomerUpdated`）
    const EVENT_TYPE: &'static str;

    /// 可读的事件名称（如 `customer_updated`）
    const EVENT_NAME: &'static str;
}

/// 类型擦除后的领域事件，便于在一个工作单元内跨聚合收集
pub trait AnyDomainEvent: EventIdentity + fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    fn event_name(&self) -> &'static str;

    /// 将载荷编码为 JSON 值；含非有限浮点数时返回 `Encoding` 错误
    fn to_value(&self) -> DomainResult<serde_json::Value>;

    fn as_any(&self) -> &dyn Any;

    fn eq_dyn(&self, other: &dyn AnyDomainEvent) -> bool;
}

/// 共享的类型擦除事件
pub type SharedDomainEvent = Arc<dyn AnyDomainEvent>;

impl<E> AnyDomainEvent for E
where
    E: DomainEvent,
{
    fn event_type(&self) -> &'static str {
        E::EVENT_TYPE
    }

    fn event_name(&self) -> &'static str {
        E::EVENT_NAME
    }

    fn to_value(&self) -> DomainResult<serde_json::Value> {
        ensure_finite(self)
            .and_then(|_| serde_json::to_value(self))
            .map_err(|e| DomainError::encoding(E::EVENT_TYPE, e))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn AnyDomainEvent) -> bool {
        other
            .as_any()
            .downcast_ref::<E>()
            .is_some_and(|other| other == self)
    }
}

impl dyn AnyDomainEvent {
    /// 还原为具体事件类型
    pub fn downcast_ref<E: DomainEvent>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    pub fn is<E: DomainEvent>(&self) -> bool {
        self.as_any().is::<E>()
    }
}

impl PartialEq for dyn AnyDomainEvent {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}

impl Serialize for dyn AnyDomainEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.to_value().map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

/// 将具体事件装箱为共享的擦除事件
pub fn share<E: DomainEvent>(event: E) -> SharedDomainEvent {
    Arc::new(event)
}

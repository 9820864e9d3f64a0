use serde::{Deserialize, Serialize};

use crate::domain_event::{DomainEvent, SharedDomainEvent, share};

use super::metadata::EventEnvelopeMetadata;

/// 事件信封：一个事件载荷与一份传输元数据，构造后不可变
///
/// 线上形态为元数据字段平铺，载荷位于 `payload` 字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<P> {
    #[serde(flatten)]
    metadata: EventEnvelopeMetadata,
    payload: P,
}

impl<P> EventEnvelope<P> {
    pub fn new(metadata: EventEnvelopeMetadata, payload: P) -> Self {
        Self { metadata, payload }
    }

    pub fn metadata(&self) -> &EventEnvelopeMetadata {
        &self.metadata
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn into_parts(self) -> (EventEnvelopeMetadata, P) {
        (self.metadata, self.payload)
    }

    /// 保留元数据，转换载荷
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> EventEnvelope<Q> {
        EventEnvelope {
            metadata: self.metadata,
            payload: f(self.payload),
        }
    }
}

impl<E> EventEnvelope<E>
where
    E: DomainEvent,
{
    /// 擦除载荷类型，便于与其它事件放在同一集合中
    pub fn into_shared(self) -> EventEnvelope<SharedDomainEvent> {
        self.map_payload(share)
    }
}

impl EventEnvelope<SharedDomainEvent> {
    /// 还原为具体载荷类型，类型不符时返回 `None`
    pub fn downcast<E: DomainEvent>(&self) -> Option<EventEnvelope<E>> {
        let payload = self.payload.downcast_ref::<E>()?.clone();
        Some(EventEnvelope {
            metadata: self.metadata.clone(),
            payload,
        })
    }
}

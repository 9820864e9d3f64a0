use tracing::trace;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain_event::{DomainEvent, SharedDomainEvent};

use super::event_envelope::EventEnvelope;
use super::message_context::MessageContext;
use super::metadata::EventEnvelopeMetadata;

/// 生成新的消息 ID
pub fn next_message_id() -> String {
    Uuid::new_v4().to_string()
}

fn correlation_for(context: &MessageContext, message_id: &str) -> String {
    context.correlation_id().unwrap_or(message_id).to_string()
}

/// 信封工厂：为事件生成传输元数据并封装
///
/// - 消息 ID 每次新生成，与事件自身的领域 ID 无关；
/// - 上下文未提供关联 ID 时，使用信封自身的消息 ID；批量封装时整批共享第一个信封的消息 ID；
/// - 创建时间取自注入的时钟（UTC），记录的是封装时刻。
#[derive(Debug, Clone, Default)]
pub struct EnvelopeFactory<C = SystemClock> {
    clock: C,
}

impl<C> EnvelopeFactory<C>
where
    C: Clock,
{
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// 封装一个具体类型的事件
    pub fn wrap<E: DomainEvent>(&self, event: E, context: &MessageContext) -> EventEnvelope<E> {
        let message_id = next_message_id();
        let correlation_id = correlation_for(context, &message_id);
        let metadata = self.metadata(
            message_id,
            correlation_id,
            E::EVENT_TYPE,
            E::EVENT_NAME,
            context,
        );
        EventEnvelope::new(metadata, event)
    }

    /// 封装一个类型擦除的事件
    pub fn wrap_shared(
        &self,
        event: SharedDomainEvent,
        context: &MessageContext,
    ) -> EventEnvelope<SharedDomainEvent> {
        let message_id = next_message_id();
        let correlation_id = correlation_for(context, &message_id);
        let metadata = self.metadata(
            message_id,
            correlation_id,
            event.event_type(),
            event.event_name(),
            context,
        );
        EventEnvelope::new(metadata, event)
    }

    /// 按顺序封装一批事件，整批共享同一个关联 ID
    pub fn wrap_all(
        &self,
        events: &[SharedDomainEvent],
        context: &MessageContext,
    ) -> Vec<EventEnvelope<SharedDomainEvent>> {
        let mut correlation_id = context.correlation_id().map(str::to_string);

        events
            .iter()
            .map(|event| {
                let message_id = next_message_id();
                let correlation_id = correlation_id
                    .get_or_insert_with(|| message_id.clone())
                    .clone();
                let metadata = self.metadata(
                    message_id,
                    correlation_id,
                    event.event_type(),
                    event.event_name(),
                    context,
                );
                EventEnvelope::new(metadata, event.clone())
            })
            .collect()
    }

    fn metadata(
        &self,
        message_id: String,
        correlation_id: String,
        message_type: &str,
        name: &str,
        context: &MessageContext,
    ) -> EventEnvelopeMetadata {
        trace!(%message_id, %correlation_id, message_type, "wrapping event");
        EventEnvelopeMetadata::builder()
            .message_id(message_id)
            .correlation_id(correlation_id)
            .maybe_causation_id(context.causation_id().map(str::to_string))
            .message_type(message_type.to_string())
            .name(name.to_string())
            .headers(context.headers().clone())
            .created(self.clock.now())
            .build()
    }
}

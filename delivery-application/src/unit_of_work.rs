use crate::context::AppContext;
use crate::error::AppResult;
use crate::outbox::{Outbox, OutboxMessage};
use bon::Builder;
use delivery_domain::clock::Clock;
use delivery_domain::envelope::EnvelopeFactory;
use delivery_domain::serialization::MessageSerializer;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 工作单元提交器
///
/// 把 `AppContext` 中收割到的事件封装为信封、编码并写入 Outbox。
/// 整批共享同一关联 ID；因果 ID 取自上下文。
#[derive(Builder)]
pub struct UnitOfWork<S, C> {
    serializer: S,
    factory: EnvelopeFactory<C>,
    outbox: Arc<dyn Outbox>,
}

impl<S, C> UnitOfWork<S, C>
where
    S: MessageSerializer,
    C: Clock,
{
    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    pub fn outbox(&self) -> &Arc<dyn Outbox> {
        &self.outbox
    }

    /// 提交：取出存储中的全部事件并写入 Outbox，返回写入的消息
    ///
    /// 编码或保存失败时事件按原顺序放回存储最前面，可重试提交。
    pub async fn commit(&self, ctx: &AppContext) -> AppResult<Vec<OutboxMessage>> {
        let events = ctx.events.take_all();
        if events.is_empty() {
            debug!("nothing to commit");
            return Ok(Vec::new());
        }

        let envelopes = self.factory.wrap_all(&events, &ctx.message);
        let mut messages = Vec::with_capacity(envelopes.len());
        for envelope in &envelopes {
            let body = match self.serializer.serialize_envelope(envelope) {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        error = %e,
                        message_type = envelope.metadata().message_type(),
                        "encoding failed"
                    );
                    ctx.events.restore(events);
                    return Err(e.into());
                }
            };
            messages.push(OutboxMessage::from_envelope(
                envelope,
                self.serializer.content_type(),
                body,
            ));
        }

        if let Err(e) = self.outbox.save(messages.clone()).await {
            warn!(error = %e, count = messages.len(), "outbox save failed");
            ctx.events.restore(events);
            return Err(e);
        }

        info!(
            count = messages.len(),
            correlation_id = messages.first().map(|m| m.correlation_id.as_str()),
            "unit of work committed"
        );
        Ok(messages)
    }
}

use delivery_domain::domain_event::EventsRequestStore;
use delivery_domain::envelope::MessageContext;
use std::sync::Arc;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（一个工作单元）所需的横切信息：
/// - 消息上下文（`MessageContext`）：关联 `correlation_id`、因果 `causation_id` 与传输头；
/// - 事件请求存储（`EventsRequestStore`）：处理器从聚合收割的事件，提交时统一封装投递；
/// - 幂等键（`idempotency_key`）：用于在基础设施层实现请求幂等。
///
/// 典型用法：
/// ```rust
/// use delivery_application::context::AppContext;
/// use delivery_domain::envelope::MessageContext;
///
/// let ctx = AppContext::new(
///     MessageContext::builder()
///         .correlation_id("corr-1".to_string())
///         .causation_id("cmd-9".to_string())
///         .build(),
/// )
/// .with_idempotency_key("idem-xyz");
///
/// assert_eq!(ctx.message.correlation_id(), Some("corr-1"));
/// assert!(ctx.events.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    /// 消息上下文（链路追踪、因果链、传输头）
    pub message: MessageContext,
    /// 本工作单元的事件请求存储
    pub events: Arc<EventsRequestStore>,
    /// 幂等键（可选）：为空则由上层或基础设施决定是否参与幂等
    pub idempotency_key: Option<String>,
}

impl AppContext {
    pub fn new(message: MessageContext) -> Self {
        Self {
            message,
            ..Default::default()
        }
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

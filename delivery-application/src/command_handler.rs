use crate::{command::Command, context::AppContext, error::AppError};
use async_trait::async_trait;

/// 命令处理器：加载聚合、执行行为、保存，并把聚合事件收割到 `ctx.events`
///
/// 约定：
/// - 先校验命令，再加载聚合；找不到时返回 `AppError::AggregateNotFound`
/// - 保存成功后才调用 `ctx.events.add_events_from_aggregate`，返回错误时不收割任何事件
/// - 处理器不提交，事件由调用方通过 `UnitOfWork::commit` 统一封装并写入 outbox
/// - 同一个 `AppContext` 可串行分发多条命令，事件按收割顺序累积
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>;
}

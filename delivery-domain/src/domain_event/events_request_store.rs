use parking_lot::Mutex;
use tracing::debug;

use super::aggregate_events::HasAggregateEvents;
use super::domain_event_trait::SharedDomainEvent;

/// 一个工作单元（一次请求/一次命令处理）内收集到的全部未提交事件
///
/// - 从聚合收割事件时保持聚合内的产生顺序，跨聚合时保持收割调用的顺序；
/// - 读取不会清空，何时重置由调用方决定（`clear`/`take_all`）；
/// - 追加操作互斥，实例可以放在 `Arc` 中共享。
#[derive(Debug, Default)]
pub struct EventsRequestStore {
    events: Mutex<Vec<SharedDomainEvent>>,
}

impl EventsRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出聚合的待提交事件并追加到存储中，仅返回本次从该聚合取出的事件
    pub fn add_events_from_aggregate<A>(&self, aggregate: &mut A) -> Vec<SharedDomainEvent>
    where
        A: HasAggregateEvents + ?Sized,
    {
        let drained = aggregate.dequeue_uncommitted_events();
        if !drained.is_empty() {
            self.events.lock().extend(drained.iter().cloned());
        }
        debug!(count = drained.len(), "harvested aggregate events");
        drained
    }

    /// 追加外部产生的事件，保持调用方给定的顺序
    pub fn add_events<I>(&self, events: I)
    where
        I: IntoIterator<Item = SharedDomainEvent>,
    {
        // 先收集再加锁：调用方的迭代器可能读取本存储
        let events: Vec<SharedDomainEvent> = events.into_iter().collect();
        debug!(count = events.len(), "added external events");
        self.events.lock().extend(events);
    }

    /// 把之前取出的事件放回存储最前面，保持它们先于之后收割的事件
    pub fn restore(&self, events: Vec<SharedDomainEvent>) {
        if events.is_empty() {
            return;
        }
        debug!(count = events.len(), "restored events");
        let mut guard = self.events.lock();
        guard.splice(0..0, events);
    }

    /// 自创建或上次重置以来累积的全部事件（不清空）
    pub fn get_all_uncommitted_events(&self) -> Vec<SharedDomainEvent> {
        self.events.lock().clone()
    }

    /// 取出全部事件并重置
    pub fn take_all(&self) -> Vec<SharedDomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

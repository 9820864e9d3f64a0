use std::ops::Deref;
use std::slice::Iter;

use crate::clock::Timestamp;

use super::domain_event_trait::{DomainEvent, SharedDomainEvent, share};

/// 聚合内待提交事件的缓冲区，按业务规则执行顺序追加
#[derive(Debug, Default, Clone)]
pub struct AggregateEvents {
    events: Vec<SharedDomainEvent>,
}

impl AggregateEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个事件（仅追加，不做校验）
    pub fn record<E: DomainEvent>(&mut self, event: E) {
        self.events.push(share(event));
    }

    pub fn record_shared(&mut self, event: SharedDomainEvent) {
        self.events.push(event);
    }

    /// 取出全部事件并清空缓冲区
    pub fn drain(&mut self) -> Vec<SharedDomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// 获取事件列表的不可变引用
    pub fn events(&self) -> &[SharedDomainEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, SharedDomainEvent> {
        self.events.iter()
    }

    /// 第一个待提交事件的发生时间
    pub fn first_occurred_at(&self) -> Option<Timestamp> {
        self.events.first().map(|e| e.occurred_at())
    }

    /// 最后一个待提交事件的发生时间
    pub fn last_occurred_at(&self) -> Option<Timestamp> {
        self.events.last().map(|e| e.occurred_at())
    }
}

impl<'a> IntoIterator for &'a AggregateEvents {
    type Item = &'a SharedDomainEvent;
    type IntoIter = Iter<'a, SharedDomainEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Deref for AggregateEvents {
    type Target = [SharedDomainEvent];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}

/// 具备“聚合事件”能力的实体
///
/// 聚合通过组合一个 [`AggregateEvents`] 字段获得该能力（`#[aggregate]` 宏会自动注入）。
pub trait HasAggregateEvents {
    fn aggregate_events(&self) -> &AggregateEvents;

    fn aggregate_events_mut(&mut self) -> &mut AggregateEvents;

    /// 记录一次状态变更产生的领域事件
    fn add_domain_event<E>(&mut self, event: E)
    where
        E: DomainEvent,
        Self: Sized,
    {
        self.aggregate_events_mut().record(event);
    }

    fn uncommitted_events(&self) -> &[SharedDomainEvent] {
        self.aggregate_events().events()
    }

    fn has_uncommitted_events(&self) -> bool {
        !self.aggregate_events().is_empty()
    }

    /// 按产生顺序取出全部待提交事件并清空；紧接着再次调用返回空列表
    fn dequeue_uncommitted_events(&mut self) -> Vec<SharedDomainEvent> {
        self.aggregate_events_mut().drain()
    }
}

//! 领域事件（Domain Event）与事件收集
//!
//! 定义事件载荷需要实现的接口（`DomainEvent` 及其类型擦除视图 `AnyDomainEvent`）、
//! 聚合内的事件缓冲区 `AggregateEvents` 与能力接口 `HasAggregateEvents`，
//! 以及按工作单元收集事件的 `EventsRequestStore`。

mod aggregate_events;
mod domain_event_trait;
mod events_request_store;

pub use aggregate_events::{AggregateEvents, HasAggregateEvents};
pub use domain_event_trait::{
    AnyDomainEvent, DomainEvent, EventIdentity, SharedDomainEvent, share,
};
pub use events_request_store::EventsRequestStore;

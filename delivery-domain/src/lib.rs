//! 外卖平台领域层基础库（delivery-domain）
//!
//! 各服务（Customers、Identity、Catalogs 等）共用的领域事件核心：
//! - 聚合（`aggregate`）与实体（`entity`）建模，聚合通过事件缓冲区记录领域事件；
//! - 领域事件（`domain_event`）与按工作单元收集事件的 `EventsRequestStore`；
//! - 事件信封（`envelope`）：消息 ID、关联/因果链、类型名、传输头与创建时间；
//! - 消息序列化（`serialization`）：基于类型名注册表的 JSON 编解码；
//! - 时钟（`clock`）与统一错误（`error`）。
//!
//! 本 crate 只负责把事件整理成可投递的信封与文本，不做任何网络或磁盘 I/O，
//! Outbox 与消息总线由上层提供实现。
//!
//! 典型流程：
//! 1. 聚合行为方法校验不变量后调用 `add_domain_event` 记录事件；
//! 2. 提交时由 `EventsRequestStore::add_events_from_aggregate` 收割事件；
//! 3. 使用 `EnvelopeFactory` 按 `MessageContext` 封装为 `EventEnvelope`；
//! 4. 使用 `JsonMessageSerializer` 编码后交给 Outbox。
//!
pub mod aggregate;
pub mod clock;
pub mod domain_event;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod serialization;

// 允许在本 crate 内部通过 ::delivery_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::delivery_domain 路径。
extern crate self as delivery_domain;

//! 外卖平台应用层基础库（delivery-application）
//!
//! - 命令管线：`Command` / `CommandHandler` / `CommandBus` 与进程内实现 `InMemoryCommandBus`；
//! - `AppContext`：一次工作单元的消息上下文与事件请求存储；
//! - `UnitOfWork`：把收割到的领域事件封装、编码并写入 `Outbox`。
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod context;
pub mod error;
pub mod inmemory_command_bus;
pub mod outbox;
pub mod unit_of_work;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use outbox::{InMemoryOutbox, Outbox, OutboxMessage};
pub use unit_of_work::UnitOfWork;

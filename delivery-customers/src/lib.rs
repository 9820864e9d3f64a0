//! 顾客服务（Customers）
//!
//! - `Customer` 聚合及其领域事件 `CustomerCreated` / `CustomerUpdated`；
//! - `UpdateCustomer` 命令与处理器：加载、更新、保存，并把事件收割到工作单元；
//! - `CustomerRepository` 存储抽象与进程内实现。
//!
pub mod customers;

pub use customers::register_message_types;

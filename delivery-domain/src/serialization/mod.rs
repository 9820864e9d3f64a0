//! 消息序列化（serialization）
//!
//! - `MessageTypeRegistry`：线上类型名到解码函数的注册表；
//! - `MessageSerializer`：信封/消息的编解码协议；
//! - `JsonMessageSerializer`：基于 serde_json 的默认实现（`application/json`）。
//!
pub(crate) mod finite;
mod json;
mod message_serializer;
mod registry;

pub use json::JsonMessageSerializer;
pub use message_serializer::MessageSerializer;
pub use registry::MessageTypeRegistry;

//! 领域层统一错误定义
//!
//! 聚焦消息编解码（类型解析、反序列化、编码）与领域规则校验的最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 消息编解码 ---
    #[error("unknown message type: {type_name}")]
    UnknownType { type_name: String },
    #[error("deserialization failed: type={type_name}, reason={reason}")]
    Deserialization { type_name: String, reason: String },
    #[error("encoding failed: type={type_name}, reason={reason}")]
    Encoding { type_name: String, reason: String },
    #[error("message type already registered: {type_name}")]
    AlreadyRegistered { type_name: String },

    // --- 领域规则 ---
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        DomainError::UnknownType {
            type_name: type_name.into(),
        }
    }

    pub fn deserialization(type_name: impl Into<String>, reason: impl ToString) -> Self {
        DomainError::Deserialization {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encoding(type_name: impl Into<String>, reason: impl ToString) -> Self {
        DomainError::Encoding {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }

    /// 是否为“无法路由”的消息（类型未注册）
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, DomainError::UnknownType { .. })
    }
}

// 未携带类型信息的 serde_json 错误，默认视为反序列化失败
impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Deserialization {
            type_name: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<std::str::Utf8Error> for DomainError {
    fn from(err: std::str::Utf8Error) -> Self {
        DomainError::Deserialization {
            type_name: "utf-8".to_string(),
            reason: err.to_string(),
        }
    }
}

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use std::any::type_name;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain_event::{DomainEvent, SharedDomainEvent};
use crate::error::{DomainError, DomainResult};

type DecodeFn = fn(Value) -> Result<SharedDomainEvent, serde_json::Error>;

#[derive(Debug, Clone, Copy)]
struct Registration {
    rust_type: &'static str,
    decode: DecodeFn,
}

fn decode_as<E: DomainEvent>(value: Value) -> Result<SharedDomainEvent, serde_json::Error> {
    let event: E = serde_json::from_value(value)?;
    Ok(Arc::new(event))
}

/// 消息类型注册表：线上类型名 → 解码函数
///
/// 通常在进程启动时集中注册；按名称反序列化时每次都会查询该表，
/// 名称未注册（`UnknownType`）与载荷格式错误（`Deserialization`）是两类不同的错误。
#[derive(Debug, Default)]
pub struct MessageTypeRegistry {
    decoders: DashMap<String, Registration>,
}

impl MessageTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册事件类型；同一类型重复注册是幂等的，不同类型占用同一名称则报错
    pub fn register<E: DomainEvent>(&self) -> DomainResult<()> {
        let rust_type = type_name::<E>();

        match self.decoders.entry(E::EVENT_TYPE.to_string()) {
            Entry::Occupied(existing) if existing.get().rust_type == rust_type => Ok(()),
            Entry::Occupied(existing) => Err(DomainError::AlreadyRegistered {
                type_name: existing.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Registration {
                    rust_type,
                    decode: decode_as::<E>,
                });
                debug!(message_type = E::EVENT_TYPE, rust_type, "registered message type");
                Ok(())
            }
        }
    }

    /// 链式注册，便于启动时组装
    pub fn with<E: DomainEvent>(self) -> DomainResult<Self> {
        self.register::<E>()?;
        Ok(self)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.decoders.contains_key(type_name)
    }

    /// 已注册的类型名（有序）
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.decoders.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// 按类型名解码：先解析类型，再解码载荷
    pub fn decode(&self, type_name: &str, value: Value) -> DomainResult<SharedDomainEvent> {
        let decode = self.resolve(type_name)?;
        decode(value).map_err(|e| {
            warn!(message_type = type_name, error = %e, "failed to decode payload");
            DomainError::deserialization(type_name, e)
        })
    }

    fn resolve(&self, type_name: &str) -> DomainResult<DecodeFn> {
        match self.decoders.get(type_name) {
            Some(registration) => Ok(registration.decode),
            None => {
                warn!(message_type = type_name, "unknown message type");
                Err(DomainError::unknown_type(type_name))
            }
        }
    }
}

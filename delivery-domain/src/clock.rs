//! 时钟抽象
//!
//! 信封的 `created` 时间统一由注入的时钟给出，并固定为 UTC，便于测试中获得确定的时间戳。
//!
use chrono::{DateTime, Utc};

/// 统一时间戳类型（UTC）
pub type Timestamp = DateTime<Utc>;

/// 系统时间的抽象
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// 生产环境时钟，直接读取系统时间
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// 固定时钟：总是返回同一时刻
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C> Clock for std::sync::Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

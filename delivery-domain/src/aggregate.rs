//! 聚合（Aggregate）抽象
//!
//! 聚合是一致性边界：行为方法负责校验业务不变量，并把状态变更的结果
//! 以领域事件的形式记录到自身的事件缓冲区（`HasAggregateEvents`），
//! 在工作单元结束时由 `EventsRequestStore` 统一收割。
//!
use crate::domain_event::HasAggregateEvents;
use crate::entity::Entity;

/// 聚合根接口
pub trait Aggregate: Entity + HasAggregateEvents {
    /// 聚合类型名（用于日志与追踪）
    const TYPE: &'static str;
}

#[cfg(test)]
mod tests {
    use super::Aggregate;
    use crate::domain_event::{EventIdentity, EventsRequestStore, HasAggregateEvents};
    use crate::entity::Entity;
    use crate::error::DomainError;
    use chrono::Utc;
    use delivery_macros::{aggregate, domain_event};

    #[domain_event]
    struct CounterIncreased {
        amount: i32,
    }

    #[domain_event]
    struct CounterReset {}

    #[aggregate(aggregate_type = "counter")]
    struct Counter {
        value: i32,
    }

    impl Counter {
        fn open(id: &str) -> Self {
            Self {
                id: id.to_string(),
                version: 0,
                domain_events: Default::default(),
                value: 0,
            }
        }

        fn increase(&mut self, amount: i32) -> Result<(), DomainError> {
            if amount <= 0 {
                return Err(DomainError::InvalidCommand {
                    reason: "amount must be > 0".into(),
                });
            }
            self.value += amount;
            self.version += 1;
            self.add_domain_event(CounterIncreased {
                event_id: format!("{}-{}", self.id, self.version),
                occurred_at: Utc::now(),
                amount,
            });
            Ok(())
        }

        fn reset(&mut self) {
            self.value = 0;
            self.version += 1;
            self.add_domain_event(CounterReset {
                event_id: format!("{}-{}", self.id, self.version),
                occurred_at: Utc::now(),
            });
        }
    }

    #[test]
    fn aggregate_records_events_in_rule_order() {
        let mut counter = Counter::open("c-1");
        assert_eq!(Counter::TYPE, "counter");
        assert_eq!(counter.id(), "c-1");

        counter.increase(3).unwrap();
        counter.reset();
        counter.increase(2).unwrap();
        assert_eq!(counter.version(), 3);
        assert_eq!(counter.value, 2);

        let types: Vec<&str> = counter
            .uncommitted_events()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(types, vec!["CounterIncreased", "CounterReset", "CounterIncreased"]);

        let store = EventsRequestStore::new();
        let harvested = store.add_events_from_aggregate(&mut counter);
        let ids: Vec<&str> = harvested.iter().map(|e| e.event_id()).collect();
        assert_eq!(ids, vec!["c-1-1", "c-1-2", "c-1-3"]);
        assert!(!counter.has_uncommitted_events());
    }

    #[test]
    fn rejected_behavior_records_nothing() {
        let mut counter = Counter::open("c-2");
        let err = counter.increase(0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCommand { .. }));
        assert!(counter.dequeue_uncommitted_events().is_empty());
        assert_eq!(counter.version(), 0);
    }
}

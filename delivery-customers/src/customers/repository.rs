use async_trait::async_trait;
use dashmap::DashMap;
use delivery_application::error::AppResult;
use delivery_domain::domain_event::HasAggregateEvents;
use delivery_domain::entity::Entity;
use tracing::debug;

use super::customer::{Customer, CustomerId};

/// 顾客存储
///
/// 存储只保存状态，不保存事件缓冲；事件由处理器收割到工作单元。
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find(&self, id: &CustomerId) -> AppResult<Option<Customer>>;

    async fn save(&self, customer: &Customer) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: DashMap<CustomerId, Customer>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find(&self, id: &CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.customers.get(id).map(|c| c.value().clone()))
    }

    async fn save(&self, customer: &Customer) -> AppResult<()> {
        let mut stored = customer.clone();
        stored.dequeue_uncommitted_events();
        debug!(customer_id = %customer.id(), version = customer.version(), "customer saved");
        self.customers.insert(customer.id().clone(), stored);
        Ok(())
    }
}

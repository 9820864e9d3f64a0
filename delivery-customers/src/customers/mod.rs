mod customer;
mod events;
mod repository;
mod update_customer;

pub use customer::{Customer, CustomerDetails, CustomerId};
pub use events::{CustomerCreated, CustomerUpdated};
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use update_customer::{UpdateCustomer, UpdateCustomerHandler};

use delivery_domain::error::DomainResult;
use delivery_domain::serialization::MessageTypeRegistry;

/// 注册顾客服务发布的全部消息类型
pub fn register_message_types(registry: &MessageTypeRegistry) -> DomainResult<()> {
    registry.register::<CustomerCreated>()?;
    registry.register::<CustomerUpdated>()?;
    Ok(())
}

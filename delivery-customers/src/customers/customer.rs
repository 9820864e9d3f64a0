use delivery_domain::clock::Timestamp;
use delivery_domain::domain_event::HasAggregateEvents;
use delivery_domain::error::{DomainError, DomainResult};
use delivery_macros::{aggregate, entity_id};
use uuid::Uuid;

use super::events::{CustomerCreated, CustomerUpdated};

#[entity_id]
pub struct CustomerId(i64);

/// 顾客的可变资料
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: Option<Timestamp>,
    pub nationality: Option<String>,
    pub detail_address: Option<String>,
}

impl CustomerDetails {
    /// 姓名非空、邮箱形如 `local@domain.tld`、电话 7 到 15 个字符
    pub fn validate(&self) -> DomainResult<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(invalid("first name and last name are required"));
        }
        if !is_email(&self.email) {
            return Err(invalid("Email address is invalid."));
        }
        let phone_len = self.phone_number.chars().count();
        if phone_len < 7 {
            return Err(invalid("PhoneNumber must not be less than 7 characters."));
        }
        if phone_len > 15 {
            return Err(invalid("PhoneNumber must not exceed 15 characters."));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> DomainError {
    DomainError::InvalidCommand {
        reason: reason.to_string(),
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[aggregate(id = CustomerId, aggregate_type = "customer")]
pub struct Customer {
    details: CustomerDetails,
    created: Timestamp,
}

impl Customer {
    /// 创建顾客并记录 `CustomerCreated`
    pub fn create(id: CustomerId, details: CustomerDetails, now: Timestamp) -> DomainResult<Self> {
        details.validate()?;

        let mut customer = Self {
            id,
            version: 0,
            domain_events: Default::default(),
            details,
            created: now,
        };
        customer.add_domain_event(CustomerCreated {
            event_id: Uuid::new_v4().to_string(),
            occurred_at: now,
            customer_id: *customer.id.value(),
            first_name: customer.details.first_name.clone(),
            last_name: customer.details.last_name.clone(),
            email: customer.details.email.clone(),
            phone_number: customer.details.phone_number.clone(),
        });
        Ok(customer)
    }

    /// 更新资料并记录 `CustomerUpdated`；校验失败时状态与事件缓冲均不变
    pub fn update(&mut self, details: CustomerDetails, now: Timestamp) -> DomainResult<()> {
        details.validate()?;

        self.details = details;
        self.version += 1;
        self.add_domain_event(CustomerUpdated {
            event_id: Uuid::new_v4().to_string(),
            occurred_at: now,
            customer_id: *self.id.value(),
            first_name: self.details.first_name.clone(),
            last_name: self.details.last_name.clone(),
            email: self.details.email.clone(),
            phone_number: self.details.phone_number.clone(),
            birth_date: self.details.birth_date,
            nationality: self.details.nationality.clone(),
            detail_address: self.details.detail_address.clone(),
        });
        Ok(())
    }

    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }
}

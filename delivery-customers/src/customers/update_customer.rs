use async_trait::async_trait;
use delivery_application::command::Command;
use delivery_application::command_handler::CommandHandler;
use delivery_application::context::AppContext;
use delivery_application::error::{AppError, AppResult};
use delivery_domain::aggregate::Aggregate;
use delivery_domain::clock::{Clock, Timestamp};
use std::sync::Arc;
use tracing::info;

use super::customer::{Customer, CustomerDetails, CustomerId};
use super::repository::CustomerRepository;

/// 更新顾客资料
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCustomer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: Option<Timestamp>,
    pub detail_address: Option<String>,
    pub nationality: Option<String>,
}

impl Command for UpdateCustomer {
    const NAME: &'static str = "customers.update_customer";
}

impl UpdateCustomer {
    /// 构造并校验命令，失败返回 `AppError::Validation`
    #[allow(clippy::too_many_arguments)]
    pub fn of(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        birth_date: Option<Timestamp>,
        detail_address: Option<String>,
        nationality: Option<String>,
    ) -> AppResult<Self> {
        let cmd = Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            birth_date,
            detail_address,
            nationality,
        };
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.id <= 0 {
            return Err(AppError::Validation("customer id is required".into()));
        }
        self.details()
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    fn details(&self) -> CustomerDetails {
        CustomerDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            birth_date: self.birth_date,
            nationality: self.nationality.clone(),
            detail_address: self.detail_address.clone(),
        }
    }
}

pub struct UpdateCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl CommandHandler<UpdateCustomer> for UpdateCustomerHandler {
    async fn handle(&self, ctx: &AppContext, cmd: UpdateCustomer) -> Result<(), AppError> {
        info!("Updating customer");
        cmd.validate()?;

        let id = CustomerId::new(cmd.id);
        let Some(mut customer) = self.repository.find(&id).await? else {
            return Err(AppError::AggregateNotFound {
                aggregate_type: Customer::TYPE,
                id: id.to_string(),
            });
        };

        customer.update(cmd.details(), self.clock.now())?;
        self.repository.save(&customer).await?;
        ctx.events.add_events_from_aggregate(&mut customer);

        info!(customer_id = %id, "Customer with Id: '{}' updated", id);
        Ok(())
    }
}

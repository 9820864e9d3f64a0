//! 端到端演示：更新顾客 -> 收割事件 -> 封装信封 -> 写入 Outbox
//!
//! 运行：`RUST_LOG=debug cargo run -p delivery-customers --example update_customer_outbox`
use chrono::Utc;
use delivery_application::command_bus::CommandBus;
use delivery_application::context::AppContext;
use delivery_application::{InMemoryCommandBus, InMemoryOutbox, UnitOfWork};
use delivery_customers::customers::{
    Customer, CustomerDetails, CustomerId, CustomerRepository, InMemoryCustomerRepository,
    UpdateCustomer, UpdateCustomerHandler,
};
use delivery_customers::register_message_types;
use delivery_domain::clock::SystemClock;
use delivery_domain::envelope::{EnvelopeFactory, MessageContext};
use delivery_domain::serialization::{JsonMessageSerializer, MessageTypeRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let registry = MessageTypeRegistry::new();
    register_message_types(&registry)?;

    let repository = Arc::new(InMemoryCustomerRepository::new());
    let mut customer = Customer::create(
        CustomerId::new(1),
        CustomerDetails {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone_number: "+44123456789".into(),
            birth_date: None,
            nationality: Some("GB".into()),
            detail_address: None,
        },
        Utc::now(),
    )?;
    repository.save(&customer).await?;

    let bus = InMemoryCommandBus::new();
    bus.register::<UpdateCustomer, _>(Arc::new(UpdateCustomerHandler::new(
        repository.clone(),
        Arc::new(SystemClock),
    )))?;

    let outbox = Arc::new(InMemoryOutbox::new());
    let uow = UnitOfWork::builder()
        .serializer(
            JsonMessageSerializer::builder()
                .registry(Arc::new(registry))
                .pretty(true)
                .build(),
        )
        .factory(EnvelopeFactory::new(SystemClock))
        .outbox(outbox.clone())
        .build();

    // 创建事件与更新事件在同一工作单元内提交
    let ctx = AppContext::new(
        MessageContext::builder()
            .causation_id("cmd-demo".to_string())
            .build(),
    );
    ctx.events.add_events_from_aggregate(&mut customer);
    let cmd = UpdateCustomer::of(
        1,
        "Ada",
        "King",
        "countess@example.org",
        "+44987654321",
        None,
        Some("12 St James's Square, London".to_string()),
        Some("GB".to_string()),
    )?;
    bus.dispatch(&ctx, cmd).await?;

    let committed = uow.commit(&ctx).await?;
    for message in &committed {
        println!("--- {} ({})", message.message_type, message.message_id);
        println!("{}", message.body);
    }
    println!("outbox holds {} message(s)", outbox.len());
    Ok(())
}

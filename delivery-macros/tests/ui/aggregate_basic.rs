use delivery_domain::aggregate::Aggregate;
use delivery_domain::domain_event::{AggregateEvents, HasAggregateEvents};
use delivery_domain::entity::Entity;
use delivery_macros::aggregate;

#[aggregate(id = u64, aggregate_type = "account")]
#[derive(Default)]
struct Account {
    name: String,
}

fn main() {
    let account = Account {
        id: 42,
        version: 3,
        domain_events: AggregateEvents::new(),
        name: "ops".to_string(),
    };

    assert_eq!(*account.id(), 42);
    assert_eq!(account.version(), 3);
    assert_eq!(Account::TYPE, "account");
    assert!(!account.has_uncommitted_events());
    assert_eq!(account.clone().name, "ops");
    let _ = format!("{account:?}");
}

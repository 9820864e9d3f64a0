use delivery_domain::domain_event::{DomainEvent, EventIdentity};
use delivery_macros::domain_event;

#[domain_event]
struct CustomerUpdated {
    customer_id: i64,
    email: String,
}

fn main() {
    let event = CustomerUpdated {
        event_id: "evt-1".to_string(),
        occurred_at: chrono::Utc::now(),
        customer_id: 7,
        email: "ada@example.com".to_string(),
    };

    assert_eq!(event.event_id(), "evt-1");
    assert_eq!(CustomerUpdated::EVENT_TYPE, "CustomerUpdated");
    assert_eq!(CustomerUpdated::EVENT_NAME, "customer_updated");
    assert_eq!(event.clone(), event);
    assert_eq!(event.email, "ada@example.com");
}

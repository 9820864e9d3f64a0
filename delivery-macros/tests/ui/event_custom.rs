use delivery_domain::domain_event::{DomainEvent, EventIdentity};
use delivery_macros::domain_event;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EventId(String);

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[domain_event(id = EventId, event_type = "orders.placed", name = "order placed")]
#[serde(rename_all = "camelCase")]
struct OrderPlaced {
    order_total: u32,
}

fn main() {
    let event = OrderPlaced {
        event_id: EventId("evt-9".to_string()),
        occurred_at: chrono::Utc::now(),
        order_total: 1250,
    };

    assert_eq!(event.event_id(), "evt-9");
    assert_eq!(OrderPlaced::EVENT_TYPE, "orders.placed");
    assert_eq!(OrderPlaced::EVENT_NAME, "order placed");
    assert_eq!(event.order_total, 1250);
}

use chrono::{TimeZone, Utc};
use delivery_domain::clock::FixedClock;
use delivery_domain::domain_event::{
    AggregateEvents, EventIdentity, EventsRequestStore, HasAggregateEvents,
};
use delivery_domain::envelope::{EnvelopeFactory, MessageContext};
use delivery_domain::error::DomainError;
use delivery_domain::serialization::{
    JsonMessageSerializer, MessageSerializer, MessageTypeRegistry,
};
use delivery_macros::domain_event;
use std::sync::Arc;
use std::thread;

#[domain_event(event_type = "orders.placed")]
struct OrderPlaced {
    order_id: u64,
    restaurant: String,
}

#[domain_event(event_type = "couriers.assigned")]
struct CourierAssigned {
    order_id: u64,
    courier: String,
}

#[derive(Default)]
struct Order {
    domain_events: AggregateEvents,
}

impl HasAggregateEvents for Order {
    fn aggregate_events(&self) -> &AggregateEvents {
        &self.domain_events
    }

    fn aggregate_events_mut(&mut self) -> &mut AggregateEvents {
        &mut self.domain_events
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn place(order: &mut Order, order_id: u64) {
    order.add_domain_event(OrderPlaced {
        event_id: format!("placed-{order_id}"),
        occurred_at: Utc::now(),
        order_id,
        restaurant: "Trattoria".into(),
    });
    order.add_domain_event(CourierAssigned {
        event_id: format!("assigned-{order_id}"),
        occurred_at: Utc::now(),
        order_id,
        courier: "Lin".into(),
    });
}

#[test]
fn harvested_events_travel_to_text_and_back() -> anyhow::Result<()> {
    init_tracing();

    let store = EventsRequestStore::new();
    let mut first = Order::default();
    let mut second = Order::default();
    place(&mut first, 1);
    place(&mut second, 2);

    store.add_events_from_aggregate(&mut first);
    store.add_events_from_aggregate(&mut second);
    assert!(!first.has_uncommitted_events());
    assert!(!second.has_uncommitted_events());

    let registry = MessageTypeRegistry::new()
        .with::<OrderPlaced>()?
        .with::<CourierAssigned>()?;
    let serializer = JsonMessageSerializer::new(Arc::new(registry));
    let factory = EnvelopeFactory::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 3, 9, 18, 45, 0).unwrap(),
    ));
    let ctx = MessageContext::builder()
        .correlation_id("checkout-17".to_string())
        .build();

    let envelopes = factory.wrap_all(&store.take_all(), &ctx);
    assert!(store.is_empty());

    let mut decoded_ids = Vec::new();
    for envelope in &envelopes {
        let text = serializer.serialize_envelope(envelope)?;
        let back = serializer.resolve_envelope(&text)?;
        assert_eq!(back.metadata(), envelope.metadata());
        assert_eq!(back.metadata().correlation_id(), "checkout-17");
        decoded_ids.push(back.payload().event_id().to_string());
    }
    assert_eq!(
        decoded_ids,
        vec!["placed-1", "assigned-1", "placed-2", "assigned-2"]
    );
    Ok(())
}

#[test]
fn shared_store_collects_from_parallel_handlers() {
    init_tracing();

    let store = Arc::new(EventsRequestStore::new());
    let handles: Vec<_> = (0..4u64)
        .map(|order_id| {
            let store = store.clone();
            thread::spawn(move || {
                let mut order = Order::default();
                place(&mut order, order_id);
                store.add_events_from_aggregate(&mut order).len()
            })
        })
        .collect();

    let harvested: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(harvested, 8);
    assert_eq!(store.len(), 8);

    // 同一聚合的事件在存储中保持记录顺序
    let events = store.get_all_uncommitted_events();
    for order_id in 0..4u64 {
        let ids: Vec<&str> = events
            .iter()
            .map(|e| e.event_id())
            .filter(|id| id.ends_with(&format!("-{order_id}")))
            .collect();
        assert_eq!(
            ids,
            vec![
                format!("placed-{order_id}"),
                format!("assigned-{order_id}")
            ]
        );
    }
}

#[test]
fn unregistered_inbound_type_is_reported_by_name() {
    let serializer = JsonMessageSerializer::default();
    let err = serializer
        .deserialize_by_name(r#"{"orderId":1}"#, "orders.cancelled")
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::UnknownType { ref type_name } if type_name == "orders.cancelled"
    ));
}

//! 事件信封（Event Envelope）
//!
//! 将领域事件与传输元数据（消息 ID、关联/因果链、类型名、传输头、创建时间）封装在一起，
//! 供序列化后交给 Outbox 或消息总线。
//!
mod event_envelope;
mod factory;
mod header;
mod message_context;
mod metadata;

pub use event_envelope::EventEnvelope;
pub use factory::{EnvelopeFactory, next_message_id};
pub use header::{HeaderValue, Headers};
pub use message_context::MessageContext;
pub use metadata::EventEnvelopeMetadata;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain_event::{EventIdentity, SharedDomainEvent, share};
    use chrono::{TimeZone, Utc};
    use delivery_macros::domain_event;

    #[domain_event]
    #[serde(rename_all = "camelCase")]
    struct CustomerUpdated {
        id: i64,
        email: String,
    }

    #[domain_event]
    struct WelcomeEmailQueued {
        customer_id: i64,
    }

    fn factory() -> EnvelopeFactory<FixedClock> {
        EnvelopeFactory::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        ))
    }

    fn customer_updated() -> CustomerUpdated {
        CustomerUpdated {
            event_id: "evt-42".into(),
            occurred_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 59, 59).unwrap(),
            id: 42,
            email: "a@b.com".into(),
        }
    }

    #[test]
    fn initiating_message_carries_given_correlation() {
        let context = MessageContext::builder()
            .correlation_id("corr-1".into())
            .build();
        let envelope = factory().wrap(customer_updated(), &context);
        let meta = envelope.metadata();

        assert_ne!(meta.message_id(), EventIdentity::event_id(envelope.payload()));
        assert_ne!(meta.message_id(), "42");
        assert!(!meta.message_id().is_empty());
        assert_eq!(meta.correlation_id(), "corr-1");
        assert_eq!(meta.causation_id(), None);
        assert_eq!(meta.message_type(), "CustomerUpdated");
        assert_eq!(meta.name(), "customer_updated");
        assert_eq!(meta.created(), Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
        assert_eq!(meta.created_unix_time(), Some(meta.created().timestamp()));
    }

    #[test]
    fn reaction_is_causally_chained() {
        let factory = factory();
        let first = factory.wrap(
            customer_updated(),
            &MessageContext::builder()
                .correlation_id("corr-1".into())
                .build(),
        );

        let reaction = WelcomeEmailQueued {
            event_id: "evt-43".into(),
            occurred_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 1).unwrap(),
            customer_id: first.payload().id,
        };
        let second = factory.wrap(reaction, &MessageContext::caused_by(first.metadata()));

        assert_eq!(second.metadata().correlation_id(), "corr-1");
        assert_eq!(
            second.metadata().causation_id(),
            Some(first.metadata().message_id())
        );
        assert_ne!(second.metadata().message_id(), first.metadata().message_id());
        assert_eq!(second.metadata().message_type(), "WelcomeEmailQueued");
    }

    #[test]
    fn message_ids_are_fresh_per_envelope() {
        let factory = factory();
        let context = MessageContext::default();
        let a = factory.wrap(customer_updated(), &context);
        let b = factory.wrap(customer_updated(), &context);
        assert_ne!(a.metadata().message_id(), b.metadata().message_id());
        // 无关联 ID 时退化为自身消息 ID
        assert_eq!(a.metadata().correlation_id(), a.metadata().message_id());
    }

    #[test]
    fn batch_without_correlation_shares_first_message_id() {
        let events: Vec<SharedDomainEvent> = vec![
            share(customer_updated()),
            share(WelcomeEmailQueued {
                event_id: "evt-2".into(),
                occurred_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
                customer_id: 42,
            }),
        ];
        let context = MessageContext::builder()
            .causation_id("cmd-7".into())
            .build()
            .with_header("tenant", "eu-1");

        let envelopes = factory().wrap_all(&events, &context);
        assert_eq!(envelopes.len(), 2);

        let first_id = envelopes[0].metadata().message_id().to_string();
        for envelope in &envelopes {
            assert_eq!(envelope.metadata().correlation_id(), first_id);
            assert_eq!(envelope.metadata().causation_id(), Some("cmd-7"));
            assert_eq!(
                envelope.metadata().header("tenant"),
                Some(&HeaderValue::from("eu-1"))
            );
        }
        assert_eq!(envelopes[0].metadata().message_type(), "CustomerUpdated");
        assert_eq!(envelopes[1].metadata().message_type(), "WelcomeEmailQueued");
        assert_eq!(envelopes[1].payload(), &events[1]);
    }

    #[test]
    fn shared_envelope_downcasts_back() {
        let envelope = factory()
            .wrap(customer_updated(), &MessageContext::default())
            .into_shared();
        let typed = envelope.downcast::<CustomerUpdated>().unwrap();
        assert_eq!(typed.payload(), &customer_updated());
        assert_eq!(typed.metadata(), envelope.metadata());
        assert!(envelope.downcast::<WelcomeEmailQueued>().is_none());
    }
}

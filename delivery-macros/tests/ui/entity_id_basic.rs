use delivery_macros::entity_id;

#[entity_id]
struct CustomerId(i64);

fn main() {
    let id: CustomerId = "17".parse().expect("numeric id");
    assert_eq!(*id.value(), 17);
    assert_eq!(id.to_string(), "17");
    assert_eq!(CustomerId::from(17), id);
    assert_eq!(i64::from(id.clone()), 17);
    assert_eq!(id.clone().into_inner(), 17);

    let json = serde_json::to_string(&id).expect("serialize");
    assert_eq!(json, "17");
    let back: CustomerId = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, CustomerId::new(17));
}

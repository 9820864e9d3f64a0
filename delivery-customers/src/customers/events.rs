use delivery_domain::clock::Timestamp;
use delivery_macros::domain_event;

#[domain_event]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreated {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

#[domain_event]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdated {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub birth_date: Option<Timestamp>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub detail_address: Option<String>,
}

//! 外卖领域构件的过程宏
//!
//! - `#[domain_event]`：为事件结构体补齐 `event_id`/`occurred_at` 并实现 `DomainEvent`
//! - `#[aggregate]`：为聚合补齐 `id`/`version`/`domain_events` 并实现 `Aggregate`
//! - `#[entity_id]`：为单字段 tuple struct 生成强类型 ID
use proc_macro::TokenStream;

mod aggregate;
mod domain_event;
mod entity_id;
mod utils;

#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}

#[proc_macro_attribute]
pub fn aggregate(attr: TokenStream, item: TokenStream) -> TokenStream {
    aggregate::expand(attr, item)
}

#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

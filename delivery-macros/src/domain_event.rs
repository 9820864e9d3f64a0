use crate::utils::{apply_derives, ensure_required_fields, set_once, snake_case};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Ident, Item, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream};

/// #[domain_event] 宏实现
/// - 仅支持具名字段结构体：`struct X { .. }`
/// - 确保具备字段：`event_id: IdType`, `occurred_at: Timestamp`（缺失时追加到最前）
/// - 合并默认派生：Debug, Clone, PartialEq, Serialize, Deserialize
/// - 生成 `EventIdentity` 与 `DomainEvent` 实现
/// - 支持：`#[domain_event(id = IdType, event_type = "...", name = "...")]`
///   - `event_type` 默认为结构体名，`name` 默认为结构体名的 snake_case
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = syn::parse_macro_input!(attr as EventAttrConfig);
    let mut input = syn::parse_macro_input!(item as Item);

    let st = match &mut input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(
                other.span(),
                "#[domain_event] can only be used on struct types",
            )
            .to_compile_error()
            .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        other => {
            return syn::Error::new(
                other.span(),
                "#[domain_event] supports only named-field structs, e.g., struct X { a: T }",
            )
            .to_compile_error()
            .into();
        }
    };

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });
    let ts_type: Type = syn::parse_quote! { ::delivery_domain::clock::Timestamp };
    ensure_required_fields(
        fields_named,
        &[("event_id", &id_type), ("occurred_at", &ts_type)],
        &syn::parse_quote!(pub),
        /*reposition_existing*/ false,
    );

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut st.attrs, required);

    let ident = st.ident.clone();
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let event_type = cfg
        .event_type
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let event_name = cfg
        .name
        .unwrap_or_else(|| LitStr::new(&snake_case(&ident.to_string()), ident.span()));

    let out = quote! {
        #input

        impl #impl_generics ::delivery_domain::domain_event::EventIdentity for #ident #ty_generics #where_clause {
            fn event_id(&self) -> &str {
                ::core::convert::AsRef::<str>::as_ref(&self.event_id)
            }

            fn occurred_at(&self) -> ::delivery_domain::clock::Timestamp {
                self.occurred_at
            }
        }

        impl #impl_generics ::delivery_domain::domain_event::DomainEvent for #ident #ty_generics #where_clause {
            const EVENT_TYPE: &'static str = #event_type;
            const EVENT_NAME: &'static str = #event_name;
        }
    };

    TokenStream::from(out)
}

// 解析 domain_event 宏键值参数：id = <Type>、event_type = "<str>"、name = "<str>"
struct EventAttrConfig {
    id_ty: Option<Type>,
    event_type: Option<LitStr>,
    name: Option<LitStr>,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            id_ty: None,
            event_type: None,
            name: None,
        };

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "id" => set_once(&mut cfg.id_ty, input.parse()?, &key)?,
                "event_type" => set_once(&mut cfg.event_type, input.parse()?, &key)?,
                "name" => set_once(&mut cfg.name, input.parse()?, &key)?,
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "unknown key; expected 'id' | 'event_type' | 'name'",
                    ));
                }
            }
            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(cfg)
    }
}

use crate::utils::{apply_derives, ensure_required_fields, set_once};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Ident, Item, LitBool, LitStr, Result, Token, Type, Visibility, parse::Parse, parse::ParseStream,
};

/// #[aggregate] 宏实现
/// - 若缺失则追加字段：`id: IdType`, `version: usize`, `domain_events: AggregateEvents`，并置于字段最前
/// - 自动实现 `Entity`（id/version）、`HasAggregateEvents` 与 `Aggregate`
/// - 支持参数：`#[aggregate(id = IdType, aggregate_type = "...", debug = true|false)]`；
///   - `id` 默认 `String`
///   - `aggregate_type` 默认为结构体名
///   - `debug` 默认 `true`（派生 Debug）。当为 `false` 时不派生 Debug，便于用户自定义实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = syn::parse_macro_input!(attr as AggregateAttrConfig);
    let input = syn::parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[aggregate] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });
    let usize_ty: Type = syn::parse_quote! { usize };
    let events_ty: Type = syn::parse_quote! { ::delivery_domain::domain_event::AggregateEvents };
    ensure_required_fields(
        fields_named,
        &[
            ("id", &id_type),
            ("version", &usize_ty),
            ("domain_events", &events_ty),
        ],
        &Visibility::Inherited,
        /*reposition_existing*/ true,
    );

    let mut required: Vec<syn::Path> = vec![syn::parse_quote!(Clone)];
    if cfg.derive_debug.map(|b| b.value).unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let aggregate_type = cfg
        .aggregate_type
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::delivery_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn version(&self) -> usize {
                self.version
            }
        }

        impl #impl_generics ::delivery_domain::domain_event::HasAggregateEvents for #ident #ty_generics #where_clause {
            fn aggregate_events(&self) -> &::delivery_domain::domain_event::AggregateEvents {
                &self.domain_events
            }

            fn aggregate_events_mut(&mut self) -> &mut ::delivery_domain::domain_event::AggregateEvents {
                &mut self.domain_events
            }
        }

        impl #impl_generics ::delivery_domain::aggregate::Aggregate for #ident #ty_generics #where_clause {
            const TYPE: &'static str = #aggregate_type;
        }
    };

    TokenStream::from(expanded)
}

// 解析 aggregate 宏键值参数：id = <Type>、aggregate_type = "<str>"、debug = <bool>
struct AggregateAttrConfig {
    id_ty: Option<Type>,
    aggregate_type: Option<LitStr>,
    derive_debug: Option<LitBool>,
}

impl Parse for AggregateAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            id_ty: None,
            aggregate_type: None,
            derive_debug: None,
        };

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "id" => set_once(&mut cfg.id_ty, input.parse()?, &key)?,
                "aggregate_type" => set_once(&mut cfg.aggregate_type, input.parse()?, &key)?,
                "debug" => set_once(&mut cfg.derive_debug, input.parse()?, &key)?,
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "unknown key in attribute; expected 'id' | 'aggregate_type' | 'debug'",
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

use crate::derive_utils::apply_derives;
use crate::options::{parse_bool, parse_key_values, unknown_key};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, LitStr, Result, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[domain_event] 宏实现
/// - 支持结构体（具名/tuple/unit）与枚举；枚举的所有变体共享同一个事件名称
/// - 合并/追加派生：(Debug 可控), Clone, PartialEq, Serialize, Deserialize
/// - 生成 `::mediator_domain::domain_event::DomainEvent` 实现（`NAME`）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug {
        required.insert(0, syn::parse_quote!(Debug));
    }

    let (ident, generics) = match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            (st.ident.clone(), st.generics.clone())
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            (en.ident.clone(), en.generics.clone())
        }
        other => {
            return syn::Error::new(
                other.span(),
                "#[domain_event] can only be used on struct or enum types",
            )
            .to_compile_error()
            .into();
        }
    };

    // 默认使用类型名作为事件名称
    let name = cfg
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    if name.value().trim().is_empty() {
        return syn::Error::new(name.span(), "event name cannot be empty")
            .to_compile_error()
            .into();
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        #input

        impl #impl_generics ::mediator_domain::domain_event::DomainEvent for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(out)
}

struct EventAttrConfig {
    name: Option<LitStr>,
    derive_debug: bool,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut derive_debug = true;

        parse_key_values(input, |key, value| {
            if key == "name" {
                name = Some(value.parse()?);
            } else if key == "debug" {
                derive_debug = parse_bool(value)?;
            } else {
                return Err(unknown_key(key, "'name' or 'debug'"));
            }
            Ok(())
        })?;

        Ok(Self { name, derive_debug })
    }
}

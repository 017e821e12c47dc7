use crate::derive_utils::apply_derives;
use crate::field_utils::prepend_required_fields;
use crate::options::{parse_bool, parse_key_values, unknown_key};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Field, Item, Result, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[entity] 宏实现
/// - 若缺失则追加字段：`id: IdType`, `events: PendingEvents`，并置于字段最前
/// - `events` 字段标注 `#[serde(skip)]`：待发布事件只存在于一次调用内
/// - 自动实现 `::mediator_domain::entity::Entity`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg
        .id_ty
        .unwrap_or_else(|| syn::parse_quote! { ::std::string::String });

    let id_field: Field = syn::parse_quote! { id: #id_type };
    let mut events_field: Field =
        syn::parse_quote! { events: ::mediator_domain::entity::PendingEvents };
    events_field.attrs.push(syn::parse_quote!(#[serde(skip)]));

    prepend_required_fields(fields_named, vec![id_field, events_field]);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::mediator_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn new(id: Self::Id) -> Self {
                Self { id, ..::core::default::Default::default() }
            }

            fn id(&self) -> &Self::Id { &self.id }

            fn pending_events(&self) -> &::mediator_domain::entity::PendingEvents {
                &self.events
            }

            fn pending_events_mut(&mut self) -> &mut ::mediator_domain::entity::PendingEvents {
                &mut self.events
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    id_ty: Option<Type>,
    derive_debug: bool,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut id_ty: Option<Type> = None;
        let mut derive_debug = true;

        parse_key_values(input, |key, value| {
            if key == "id" {
                id_ty = Some(value.parse()?);
            } else if key == "debug" {
                derive_debug = parse_bool(value)?;
            } else {
                return Err(unknown_key(key, "'id' or 'debug'"));
            }
            Ok(())
        })?;

        Ok(Self {
            id_ty,
            derive_debug,
        })
    }
}

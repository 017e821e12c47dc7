use crate::derive_utils::apply_derives;
use crate::options::{parse_bool, parse_key_values, unknown_key};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Result, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[entity_id] 宏实现
/// 仅支持单字段 tuple struct，为包装类型：
/// - 合并/追加派生：Default, Clone, (Debug 可控), Serialize, Deserialize, PartialEq, Eq, Hash
/// - 提供 new(value)、as_inner()、Display、FromStr、AsRef 与双向 From
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityIdAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let inner_ty = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        other => {
            return syn::Error::new(
                other.span(),
                "#[entity_id] requires a tuple struct with exactly one field, e.g., struct X(String);",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(Hash),
    ];
    if cfg.derive_debug {
        required.insert(2, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let mut parse_generics = st.generics.clone();
    parse_generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote!(#inner_ty: ::std::str::FromStr));
    let parse_where = &parse_generics.where_clause;

    let mut display_generics = st.generics.clone();
    display_generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote!(#inner_ty: ::std::fmt::Display));
    let display_where = &display_generics.where_clause;

    let out = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new(value: #inner_ty) -> Self { Self(value) }

            pub fn as_inner(&self) -> &#inner_ty { &self.0 }
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #parse_where {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                s.parse::<#inner_ty>().map(Self)
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #display_where {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::core::convert::AsRef<#inner_ty> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner_ty { &self.0 }
        }

        impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
            fn from(value: #inner_ty) -> Self { Self(value) }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: #ident #ty_generics) -> Self { value.0 }
        }
    };

    TokenStream::from(out)
}

struct EntityIdAttrConfig {
    derive_debug: bool,
}

impl Parse for EntityIdAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut derive_debug = true;

        parse_key_values(input, |key, value| {
            if key == "debug" {
                derive_debug = parse_bool(value)?;
                Ok(())
            } else {
                Err(unknown_key(key, "'debug'"))
            }
        })?;

        Ok(Self { derive_debug })
    }
}

use std::collections::HashSet;
use syn::parse::ParseStream;
use syn::{Ident, LitBool, Result, Token};

/// 解析形如 `key = value, ...` 的宏参数；value 由回调按 key 自行解析
pub(crate) fn parse_key_values(
    input: ParseStream,
    mut on_key: impl FnMut(&Ident, ParseStream) -> Result<()>,
) -> Result<()> {
    let mut seen = HashSet::new();

    while !input.is_empty() {
        let key: Ident = input.parse()?;
        if !seen.insert(key.to_string()) {
            return Err(syn::Error::new(
                key.span(),
                format!("duplicate key '{key}' in attribute"),
            ));
        }
        input.parse::<Token![=]>()?;
        on_key(&key, input)?;

        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }

    Ok(())
}

pub(crate) fn parse_bool(input: ParseStream) -> Result<bool> {
    let lit: LitBool = input.parse()?;
    Ok(lit.value)
}

pub(crate) fn unknown_key(key: &Ident, expected: &str) -> syn::Error {
    syn::Error::new(key.span(), format!("unknown key '{key}'; expected {expected}"))
}

use quote::ToTokens;
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token};

// 归一化 derive 的 key，避免 Serialize/serde::Serialize 重复
fn derive_key(p: &Path) -> String {
    match p.segments.last() {
        Some(last) => last.ident.to_string(),
        None => p.to_token_stream().to_string(),
    }
}

/// 将 required 与用户已写的 derive 合并为单个 `#[derive(..)]`（去重，required 在前）
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let mut retained = Vec::with_capacity(attrs.len());
    let mut existing = Vec::new();

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            retained.push(attr);
            continue;
        }
        match attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
            Ok(list) => existing.extend(list),
            Err(_) => retained.push(attr),
        }
    }

    let mut seen = HashSet::new();
    let merged: Vec<Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    attrs.push(syn::parse_quote!(#[derive(#(#merged),*)]));
    attrs.extend(retained);
}

use syn::{Field, FieldsNamed, Token, punctuated::Punctuated};

fn field_name_is(field: &Field, name: &str) -> bool {
    field.ident.as_ref().map(|i| i == name).unwrap_or(false)
}

/// 确保具名字段结构体包含 required 中的字段，并按给定顺序置于最前
/// - 用户已定义的同名字段优先保留（仅调整位置）
/// - 其余字段保持原始相对顺序
pub(crate) fn prepend_required_fields(fields_named: &mut FieldsNamed, required: Vec<Field>) {
    let old_named = std::mem::take(&mut fields_named.named);
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    let required_names: Vec<String> = required
        .iter()
        .filter_map(|f| f.ident.as_ref().map(|i| i.to_string()))
        .collect();

    for field in required {
        let Some(name) = field.ident.as_ref().map(|i| i.to_string()) else {
            continue;
        };
        match old_named.iter().find(|f| field_name_is(f, &name)) {
            Some(existing) => new_named.push(existing.clone()),
            None => new_named.push(field),
        }
    }

    for field in old_named {
        let is_required = required_names.iter().any(|n| field_name_is(&field, n));
        if !is_required {
            new_named.push(field);
        }
    }

    fields_named.named = new_named;
}

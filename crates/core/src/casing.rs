//! Field-name casing translation between the client and the wire.
//!
//! Form fields are addressed in camelCase (`vendorName`); the REST backend
//! speaks snake_case (`vendor_name`).

/// `vendorName` → `vendor_name`, `taxID` → `tax_id`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                Some(_) => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// `vendor_name` → `vendorName`. Leading/duplicate underscores are dropped.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for segment in name.split('_').filter(|s| !s.is_empty()) {
        if out.is_empty() {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

//! Composite keys.
//!
//! A key is `\0<object>\0<attr>\0<attr>\0...`. Every attribute is terminated
//! by the separator, so the prefix for `["ab"]` never matches `["abc"]`.

use crate::error::{LedgerError, Result};

const SEPARATOR: char = '\u{0}';

pub const BALANCE_OBJECT: &str = "balance";
pub const TOKEN_OBJECT: &str = "token";

pub fn composite_key(object_type: &str, attributes: &[&str]) -> Result<String> {
    if object_type.is_empty() || object_type.contains(SEPARATOR) {
        return Err(LedgerError::ValidationError(format!(
            "invalid key object type {:?}",
            object_type
        )));
    }
    let mut key = String::new();
    key.push(SEPARATOR);
    key.push_str(object_type);
    key.push(SEPARATOR);
    for attr in attributes {
        if attr.contains(SEPARATOR) {
            return Err(LedgerError::ValidationError(format!(
                "key attribute {:?} contains a reserved character",
                attr
            )));
        }
        key.push_str(attr);
        key.push(SEPARATOR);
    }
    Ok(key)
}

/// Split a key into its object type and attributes.
pub fn split_composite_key(key: &str) -> Result<(&str, Vec<&str>)> {
    let body = key
        .strip_prefix(SEPARATOR)
        .and_then(|k| k.strip_suffix(SEPARATOR))
        .ok_or_else(|| LedgerError::StoreFault(format!("malformed composite key {:?}", key)))?;
    let mut parts = body.split(SEPARATOR);
    let object = parts.next().unwrap_or_default();
    Ok((object, parts.collect()))
}

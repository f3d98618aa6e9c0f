//! Literal codec.
//!
//! Converts host values into literal expression nodes and merges host
//! collections into existing array literals.

use sculptor_core::{Key, Value};
use sculptor_parser::{ArrayExpr, ArrayItem, Expr};

/// Encode a host value as a literal expression.
///
/// Lists become positional arrays. Maps keep string keys as string-literal
/// keys; integer keys stay positional. Non-finite floats have no literal
/// spelling and encode as `null`.
pub fn encode(value: &Value) -> Expr {
    match value {
        Value::Null => Expr::null(),
        Value::Bool(true) => Expr::constant("true"),
        Value::Bool(false) => Expr::constant("false"),
        Value::Int(i) => Expr::int(*i),
        Value::Float(f) if f.is_finite() => Expr::float(*f),
        Value::Float(_) => Expr::null(),
        Value::String(s) => Expr::string(s.clone()),
        Value::List(items) => Expr::Array(ArrayExpr::new(
            items.iter().map(|v| ArrayItem::positional(encode(v))).collect(),
        )),
        Value::Map(entries) => Expr::Array(ArrayExpr::new(
            entries.iter().map(|(k, v)| encode_entry(k, v)).collect(),
        )),
    }
}

fn encode_entry(key: &Key, value: &Value) -> ArrayItem {
    match key {
        Key::String(k) => ArrayItem::keyed(Expr::string(k.clone()), encode(value)),
        Key::Int(_) => ArrayItem::positional(encode(value)),
    }
}

/// Merge host collection entries into an array literal.
///
/// A positional string already present as a positional entry is skipped;
/// other positional additions are appended. A string-keyed addition
/// replaces the value of the entry with the same key in place, or is
/// appended. Returns the number of entries changed or added.
pub fn merge(array: &mut ArrayExpr, additions: &Value) -> usize {
    let mut changed = 0;
    for (key, value) in additions.entries() {
        match key {
            Key::Int(_) => {
                if let Some(s) = value.as_str() {
                    if has_positional_string(array, s) {
                        continue;
                    }
                }
                array.items.push(ArrayItem::positional(encode(value)));
                changed += 1;
            }
            Key::String(k) => {
                let existing = array
                    .items
                    .iter_mut()
                    .find(|item| item.key.as_ref().and_then(Expr::as_str) == Some(k.as_str()));
                match existing {
                    Some(item) => item.value = encode(value),
                    None => array
                        .items
                        .push(ArrayItem::keyed(Expr::string(k.clone()), encode(value))),
                }
                changed += 1;
            }
        }
    }
    changed
}

fn has_positional_string(array: &ArrayExpr, s: &str) -> bool {
    array
        .items
        .iter()
        .any(|item| item.key.is_none() && !item.spread && item.value.as_str() == Some(s))
}

//! Display rendering of CloudFormation intrinsic functions.
//!
//! Policy documents in a template are full of `Ref` and `Fn::*` objects.
//! Before statements are parsed these are rewritten into readable text,
//! e.g. `{"Ref": "Role"}` becomes `${Role}` and
//! `{"Fn::GetAtt": ["Bucket", "Arn"]}` becomes `${Bucket.Arn}`. Intrinsics
//! with no shorthand are kept as their compact JSON text.

use itertools::Itertools;
use serde_json::{Map, Value, json};

const NO_VALUE: &str = "AWS::NoValue";

/// Rewrite every intrinsic function in `value` into display text.
pub fn render_intrinsics(value: &Value) -> Value {
    render_value(value, false)
}

/// With `as_text`, object entries holding `AWS::NoValue` are dropped
/// instead of becoming null, as they are when written out as JSON text.
fn render_value(value: &Value, as_text: bool) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !is_no_value(item))
                .map(|item| render_value(item, as_text))
                .collect(),
        ),
        Value::Object(map) => match intrinsic(map) {
            Some(("Ref", Value::String(name))) if name == NO_VALUE => Value::Null,
            Some((name, args)) => render_intrinsic(name, args),
            None => Value::Object(
                map.iter()
                    .filter(|(_, v)| !(as_text && is_no_value(v)))
                    .map(|(k, v)| (k.clone(), render_value(v, as_text)))
                    .collect(),
            ),
        },
        other => other.clone(),
    }
}

fn render_list(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter(|item| !is_no_value(item))
        .map(render_intrinsics)
        .collect()
}

fn render_intrinsic(name: &str, args: &Value) -> Value {
    match (name, args) {
        ("Ref", _) => Value::String(format!("${{{}}}", display_text(args))),
        ("Fn::GetAtt", Value::Array(parts)) if parts.len() >= 2 => Value::String(format!(
            "${{{}.{}}}",
            display_text(&parts[0]),
            display_text(&parts[1])
        )),
        ("Fn::Join", Value::Array(parts)) if parts.len() == 2 => {
            let separator = display_text(&parts[0]);
            match &parts[1] {
                Value::Array(items) => Value::String(
                    render_list(items)
                        .iter()
                        .map(display_text)
                        .join(&separator),
                ),
                _ => stringify(name, args),
            }
        }
        _ => stringify(name, args),
    }
}

/// `{"Ref": ...}` or `{"Fn::...": ...}` with exactly one key.
fn intrinsic(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    let (key, args) = map.iter().next()?;
    (key == "Ref" || key.starts_with("Fn::")).then_some((key.as_str(), args))
}

fn is_no_value(value: &Value) -> bool {
    matches!(
        value.as_object().and_then(intrinsic),
        Some(("Ref", Value::String(name))) if name == NO_VALUE
    )
}

fn stringify(name: &str, args: &Value) -> Value {
    Value::String(json!({ name: render_value(args, true) }).to_string())
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

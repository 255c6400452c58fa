//! Conversion of DynamoDB attribute values into JSON.
//!
//! DynamoDB hands numbers back as decimal strings. Integral values that fit
//! an `i64`/`u64` are written out as JSON integers, everything else as floats.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Number, Value};

pub type Item = HashMap<String, AttributeValue>;

pub fn item_to_json(item: &Item) -> Value {
    let object: Map<String, Value> = item
        .iter()
        .map(|(key, value)| (key.clone(), attribute_to_json(value)))
        .collect();

    Value::Object(object)
}

pub fn items_to_json(items: &[Item]) -> Value {
    Value::Array(items.iter().map(item_to_json).collect())
}

pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(general_purpose::STANDARD.encode(blob.as_ref())),
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => item_to_json(map),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(general_purpose::STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn number_to_json(n: &str) -> Value {
    let n = n.trim();
    if let Ok(int) = n.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(uint) = n.parse::<u64>() {
        return Value::Number(uint.into());
    }

    let Some(float) = n.parse::<f64>().ok().filter(|f| f.is_finite()) else {
        return Value::String(n.to_string());
    };
    // "1.0" and "1E+2" are integral too.
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        return Value::Number((float as i64).into());
    }

    Number::from_f64(float)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

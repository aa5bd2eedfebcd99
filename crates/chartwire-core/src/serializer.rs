//! Frontend serialization.
//!
//! Models serialize with their Rust field names. [`to_frontend`] walks the
//! resulting tree depth-first and rewrites every object key to camelCase,
//! dropping null members on the way. Keys come out sorted and arrays keep
//! their order, so one model graph always yields the same bytes.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::SerializationError;

/// Convert a snake_case key to camelCase.
///
/// Splits on `_` and drops empty segments, so repeated, leading and trailing
/// underscores collapse. The first segment is kept as is and every later
/// segment gets an upper-cased first character. A key made only of
/// underscores is returned unchanged.
pub fn snake_to_camel(key: &str) -> String {
    let mut segments = key.split('_').filter(|segment| !segment.is_empty());
    let Some(first) = segments.next() else {
        return key.to_owned();
    };

    let mut camel = String::with_capacity(key.len());
    camel.push_str(first);
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(head) = chars.next() {
            camel.extend(head.to_uppercase());
            camel.push_str(chars.as_str());
        }
    }
    camel
}

/// Serialize any model into the camelCase tree the frontend consumes.
pub fn to_frontend<T>(model: &T) -> Result<Value, SerializationError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_value(model)?;
    let mut path = String::from("$");
    camelize(raw, &mut path)
}

/// [`to_frontend`] rendered as JSON text.
pub fn to_json_string<T>(model: &T, pretty: bool) -> Result<String, SerializationError>
where
    T: Serialize + ?Sized,
{
    let value = to_frontend(model)?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    tracing::debug!(bytes = text.len(), pretty, "serialized frontend payload");
    Ok(text)
}

/// [`to_frontend`] written to `writer`.
pub fn to_writer<W, T>(writer: W, model: &T, pretty: bool) -> Result<(), SerializationError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let value = to_frontend(model)?;
    if pretty {
        serde_json::to_writer_pretty(writer, &value)?;
    } else {
        serde_json::to_writer(writer, &value)?;
    }
    Ok(())
}

/// `path` is a JSONPath-like locator used in collision errors.
fn camelize(value: Value, path: &mut String) -> Result<Value, SerializationError> {
    match value {
        Value::Object(members) => {
            let mut converted = Map::new();
            for (key, member) in members {
                if member.is_null() {
                    continue;
                }

                let camel = snake_to_camel(&key);
                if converted.contains_key(&camel) {
                    return Err(SerializationError::KeyCollision {
                        key: camel,
                        path: path.clone(),
                    });
                }

                let mark = path.len();
                path.push('.');
                path.push_str(&camel);
                let member = camelize(member, path)?;
                path.truncate(mark);

                converted.insert(camel, member);
            }
            Ok(Value::Object(converted))
        }
        Value::Array(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let mark = path.len();
                path.push_str(&format!("[{index}]"));
                converted.push(camelize(item, path)?);
                path.truncate(mark);
            }
            Ok(Value::Array(converted))
        }
        scalar => Ok(scalar),
    }
}

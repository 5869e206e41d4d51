// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{DiscogsError, Result};

/// Query string parameters. Keys are kept sorted so the encoded query is
/// identical for identical inputs.
pub type QueryParams = BTreeMap<String, String>;

/// Flatten an option struct into query parameters.
///
/// The struct must serialize to a flat JSON object of scalars; `null`
/// fields are dropped.
pub fn to_query<T: Serialize>(options: &T) -> Result<QueryParams> {
    let value = serde_json::to_value(options).map_err(|e| DiscogsError::EncodeQuery(e.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        Value::Null => return Ok(QueryParams::new()),
        other => {
            return Err(DiscogsError::EncodeQuery(format!(
                "expected an object, got {other}"
            )))
        }
    };

    let mut params = QueryParams::new();
    for (key, value) in object {
        let encoded = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(DiscogsError::EncodeQuery(format!(
                    "parameter `{key}` is not a scalar"
                )))
            }
        };
        params.insert(key, encoded);
    }
    Ok(params)
}

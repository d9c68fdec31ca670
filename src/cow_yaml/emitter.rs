// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use anyhow::{anyhow, Error};
use serde_yaml::{Mapping, Number, Value};

use super::{Yaml, MERGE_KEY};

/// Writes `docs` as block-style YAML.
///
/// A single document is written without a `---` marker. Further documents are each preceded by one.
pub fn yaml_emit_to_string(docs: &[Yaml]) -> Result<String, Error> {
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        let value = to_value(doc)?;
        out.push_str(&serde_yaml::to_string(&value)?);
    }
    Ok(out)
}

fn to_value(yaml: &Yaml) -> Result<Value, Error> {
    let value = match yaml {
        // Written in float notation, so `!!float 1` comes out as `1.0`.
        Yaml::Real(text) => {
            let float = saphyr::Yaml::Real(text.to_string())
                .as_f64()
                .ok_or_else(|| anyhow!("{:?} is not a valid float", text))?;
            Value::Number(Number::from(float))
        }
        Yaml::Integer(int) => Value::Number(Number::from(*int)),
        Yaml::String(string) => Value::String(string.to_string()),
        Yaml::Boolean(value) => Value::Bool(*value),
        Yaml::Null => Value::Null,
        Yaml::Array(values) => Value::Sequence(values.iter().map(to_value).collect::<Result<Vec<_>, _>>()?),
        Yaml::Hash(map) => {
            let mut mapping = Mapping::new();
            for (key, value) in map.iter() {
                mapping.insert(to_key(key)?, to_value(value)?);
            }
            Value::Mapping(mapping)
        }
    };
    Ok(value)
}

fn to_key(key: &Yaml) -> Result<Value, Error> {
    match key {
        Yaml::Array(_) | Yaml::Hash(_) => Err(anyhow!("{} mapping keys cannot be emitted", key.type_name())),
        // Written plain, it would be read back as a merge key.
        Yaml::String(string) if string.as_str() == MERGE_KEY => {
            Err(anyhow!("mapping key {:?} cannot be emitted without turning into a merge key", MERGE_KEY))
        }
        _ => to_value(key),
    }
}

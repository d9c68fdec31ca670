// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, path::Path, rc::Rc};

use anyhow::{anyhow, Context, Error};
use hashlink::LinkedHashMap;

use crate::cow_yaml::{parse_yaml_str, Yaml};

/// Rewrites every mapping key as a string.
///
/// Numbers and booleans keep their text and null becomes the empty string. Keys that are
/// sequences or mappings have no string form and are rejected. When two keys collapse to the
/// same string, the first position and the last value are kept.
pub fn stringify_keys(yaml: &Yaml) -> Result<Yaml, Error> {
    match yaml {
        Yaml::Array(values) => {
            let values = values.iter().map(stringify_keys).collect::<Result<Vec<_>, _>>()?;
            Ok(Yaml::Array(Rc::new(values)))
        }
        Yaml::Hash(map) => {
            let mut entries = LinkedHashMap::new();
            for (key, value) in map.iter() {
                let key = match key {
                    Yaml::String(_) => key.clone(),
                    _ => match key.scalar_text() {
                        Some(text) => Yaml::String(Rc::new(text)),
                        None => return Err(anyhow!("{} mapping keys cannot be converted to strings", key.type_name())),
                    },
                };
                let value = stringify_keys(value)?;

                match entries.get_mut(&key) {
                    Some(existing) => *existing = value,
                    None => {
                        entries.insert(key, value);
                    }
                }
            }
            Ok(Yaml::Hash(Rc::new(entries)))
        }
        _ => Ok(yaml.clone()),
    }
}

pub fn yaml_load_from_file(filename: &Path) -> Result<Vec<Yaml>, Error> {
    let input = fs::read_to_string(filename).with_context(|| format!("failed to read {}", filename.display()))?;
    let docs = parse_yaml_str(&input).with_context(|| format!("failed to parse {}", filename.display()))?;
    Ok(docs)
}

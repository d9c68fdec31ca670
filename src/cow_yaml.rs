// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Provides copy-on-write variant of a YAML object.

mod emitter;
mod loader;

use std::rc::Rc;

use hashlink::LinkedHashMap;

pub use emitter::yaml_emit_to_string;
pub use loader::parse_yaml_str;

#[derive(Clone, PartialEq, Debug, Eq, Hash)]
pub enum Yaml {
    // Numbers that don't fit in an i64 (e.g. floating point).
    Real(Rc<String>),
    Integer(i64),
    String(Rc<String>),
    Boolean(bool),
    Array(Rc<Vec<Yaml>>),
    Hash(Rc<LinkedHashMap<Yaml, Yaml>>),
    Null,
}

impl Yaml {
    pub fn string(value: &str) -> Yaml {
        Yaml::String(Rc::new(value.to_string()))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Yaml::Real(_) => "float",
            Yaml::Integer(_) => "integer",
            Yaml::String(_) => "string",
            Yaml::Boolean(_) => "boolean",
            Yaml::Array(_) => "sequence",
            Yaml::Hash(_) => "mapping",
            Yaml::Null => "null",
        }
    }

    /// Textual form of a scalar, or `None` for sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Yaml::Real(value) | Yaml::String(value) => Some(value.to_string()),
            Yaml::Integer(value) => Some(value.to_string()),
            Yaml::Boolean(value) => Some(value.to_string()),
            Yaml::Null => Some(String::new()),
            Yaml::Array(_) | Yaml::Hash(_) => None,
        }
    }
}

const MERGE_KEY: &str = "<<";

/// Resolves an untagged plain scalar to a null, boolean, integer, float or string.
pub fn resolve_plain(value: &str) -> Yaml {
    match saphyr::Yaml::from_str(value) {
        saphyr::Yaml::Real(value) => Yaml::Real(Rc::new(value)),
        saphyr::Yaml::Integer(value) => Yaml::Integer(value),
        saphyr::Yaml::Boolean(value) => Yaml::Boolean(value),
        saphyr::Yaml::Null => Yaml::Null,
        saphyr::Yaml::String(value) => Yaml::String(Rc::new(value)),
        _ => Yaml::string(value),
    }
}

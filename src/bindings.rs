// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::rc::Rc;

use anyhow::{anyhow, Error};
use hashlink::LinkedHashMap;

use crate::cow_yaml::Yaml;

pub const GINKGO_SKIP_VARIABLE: &str = "ginkgo_skip";

/// Tests excluded from the upstream e2e run.
pub const DEFAULT_GINKGO_SKIP: &str = r"--ginkgo.skip=Networking\sIPerf\sIPv[46]|\[Feature:PerformanceDNS\]|\[Feature:IPv6DualStackAlphaFeature\]|NetworkPolicy\sbetween\sserver\sand\sclient.+(ingress\saccess|multiple\segress\spolicies|allow\segress\saccess)|\[Feature:NoSNAT\]|Services.+(ESIPP|cleanup\sfinalizer|session\saffinity)|\[Feature:Networking-IPv6\]|\[Feature:Federation\]|configMap\snameserver|ClusterDns\s\[Feature:Example\]|(Namespace|Pod)Selector\s\[Feature:NetworkPolicy\]|kube-proxy|should\sset\sTCP\sCLOSE_WAIT\stimeout";

/// The variables a template may reference, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    values: LinkedHashMap<String, Rc<String>>,
}

impl Bindings {
    pub fn with_defaults() -> Bindings {
        let mut values = LinkedHashMap::new();
        values.insert(GINKGO_SKIP_VARIABLE.to_string(), Rc::new(DEFAULT_GINKGO_SKIP.to_string()));
        Bindings { values }
    }

    /// Adds a binding, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), Error> {
        if !is_valid_name(name) {
            return Err(anyhow!("invalid variable name {:?}", name));
        }

        match self.values.get_mut(name) {
            Some(existing) => *existing = Rc::new(value.to_string()),
            None => {
                self.values.insert(name.to_string(), Rc::new(value.to_string()));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rc<String>> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Adds every entry of a YAML mapping. Scalar values are bound by their text; null binds the
    /// empty string.
    pub fn extend_from_yaml(&mut self, yaml: &Yaml) -> Result<(), Error> {
        let map = match yaml {
            Yaml::Hash(map) => map,
            Yaml::Null => return Ok(()),
            _ => return Err(anyhow!("variables must be a mapping, found {}", yaml.type_name())),
        };

        for (key, value) in map.iter() {
            let Some(name) = key.scalar_text() else {
                return Err(anyhow!("variable names must be scalars, found {}", key.type_name()));
            };
            let Some(text) = value.scalar_text() else {
                return Err(anyhow!("variable {:?} must be a scalar, found {}", name, value.type_name()));
            };
            self.insert(&name, &text)?;
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

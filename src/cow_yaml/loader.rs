// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{collections::HashMap, rc::Rc};

use anyhow::{anyhow, Error};
use hashlink::LinkedHashMap;
use saphyr_parser::{Event, MarkedEventReceiver, Marker, Parser as YamlParser, TScalarStyle, Tag};

use super::{resolve_plain, Yaml, MERGE_KEY};

/// Parses every document in `input`.
///
/// Aliases are replaced by the node their anchor names, so the returned trees never share structure
/// through YAML references. Merge keys (`<<`) are applied to the enclosing mapping.
pub fn parse_yaml_str(input: &str) -> Result<Vec<Yaml>, Error> {
    let mut loader = Loader::default();
    let mut yaml_parser = YamlParser::new(input.chars());
    yaml_parser.load(&mut loader, true)?;

    if let Some(err) = loader.error {
        return Err(err);
    }
    Ok(loader.docs)
}

#[derive(Default)]
struct Loader {
    docs: Vec<Yaml>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Yaml>,
    error: Option<Error>,
}

enum Frame {
    Sequence {
        anchor_id: usize,
        values: Vec<Yaml>,
    },
    Mapping {
        anchor_id: usize,
        entries: LinkedHashMap<Yaml, Yaml>,
        key: Option<MapKey>,
    },
}

enum MapKey {
    Value(Yaml),
    Merge,
}

// A completed node on its way to its parent.
struct Node {
    value: Yaml,
    merge_key: bool,
}

impl MarkedEventReceiver for Loader {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = self.handle_event(event) {
            self.error = Some(anyhow!("line {}, column {}: {}", mark.line(), mark.col() + 1, err));
        }
    }
}

impl Loader {
    fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::SequenceStart(anchor_id, tag) => {
                Self::check_collection_tag(tag.as_ref(), "seq")?;
                self.stack.push(Frame::Sequence {
                    anchor_id,
                    values: Vec::new(),
                });
            }
            Event::MappingStart(anchor_id, tag) => {
                Self::check_collection_tag(tag.as_ref(), "map")?;
                self.stack.push(Frame::Mapping {
                    anchor_id,
                    entries: LinkedHashMap::new(),
                    key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (anchor_id, value) = match self.stack.pop() {
                    Some(Frame::Sequence { anchor_id, values }) => (anchor_id, Yaml::Array(Rc::new(values))),
                    Some(Frame::Mapping { anchor_id, entries, .. }) => (anchor_id, Yaml::Hash(Rc::new(entries))),
                    None => return Err(anyhow!("unbalanced collection end")),
                };
                self.register_anchor(anchor_id, &value);
                self.push_node(Node {
                    value,
                    merge_key: false,
                })?;
            }
            Event::Scalar(value, style, anchor_id, tag) => {
                let merge_key = matches!(style, TScalarStyle::Plain) && tag.is_none() && value == MERGE_KEY;
                let value = Self::parse_scalar(value, style, tag.as_ref())?;
                self.register_anchor(anchor_id, &value);
                self.push_node(Node { value, merge_key })?;
            }
            Event::Alias(anchor_id) => {
                let Some(value) = self.anchors.get(&anchor_id).cloned() else {
                    return Err(anyhow!("alias refers to an anchor that is undefined or still being defined"));
                };
                self.push_node(Node {
                    value,
                    merge_key: false,
                })?;
            }
            // Stream and document boundaries. Anchors are scoped to a single document.
            Event::DocumentEnd => self.anchors.clear(),
            _ => {}
        }
        Ok(())
    }

    fn register_anchor(&mut self, anchor_id: usize, value: &Yaml) {
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, value.clone());
        }
    }

    fn push_node(&mut self, node: Node) -> Result<(), Error> {
        match self.stack.last_mut() {
            None => self.docs.push(node.value),
            Some(Frame::Sequence { values, .. }) => values.push(node.value),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None if node.merge_key => *key = Some(MapKey::Merge),
                None => *key = Some(MapKey::Value(node.value)),
                Some(MapKey::Value(entry_key)) => {
                    // Duplicate keys keep their first position and take the last value.
                    match entries.get_mut(&entry_key) {
                        Some(entry_value) => *entry_value = node.value,
                        None => {
                            entries.insert(entry_key, node.value);
                        }
                    }
                }
                Some(MapKey::Merge) => merge_into(entries, &node.value)?,
            },
        }
        Ok(())
    }

    fn parse_scalar(value: String, style: TScalarStyle, tag: Option<&Tag>) -> Result<Yaml, Error> {
        let Some(tag) = tag else {
            if matches!(style, TScalarStyle::Plain) {
                return Ok(resolve_plain(&value));
            }
            return Ok(Yaml::String(Rc::new(value)));
        };

        let suffix = core_tag_suffix(tag).ok_or_else(|| anyhow!("yaml tag {}{} is not supported", tag.handle, tag.suffix))?;
        let yaml = match suffix {
            "str" => Yaml::String(Rc::new(value)),
            "null" => match resolve_plain(&value) {
                Yaml::Null => Yaml::Null,
                _ if value.is_empty() => Yaml::Null,
                _ => return Err(anyhow!("{:?} is not a valid !!null value", value)),
            },
            "bool" => match resolve_plain(&value) {
                Yaml::Boolean(value) => Yaml::Boolean(value),
                _ => return Err(anyhow!("{:?} is not a valid !!bool value", value)),
            },
            "int" => match resolve_plain(&value) {
                Yaml::Integer(value) => Yaml::Integer(value),
                _ => return Err(anyhow!("{:?} is not a valid !!int value", value)),
            },
            "float" => match resolve_plain(&value) {
                Yaml::Integer(_) | Yaml::Real(_) => Yaml::Real(Rc::new(value)),
                _ => return Err(anyhow!("{:?} is not a valid !!float value", value)),
            },
            _ => return Err(anyhow!("yaml tag !!{} is not supported on scalars", suffix)),
        };
        Ok(yaml)
    }

    fn check_collection_tag(tag: Option<&Tag>, expected: &str) -> Result<(), Error> {
        let Some(tag) = tag else {
            return Ok(());
        };
        match core_tag_suffix(tag) {
            Some(suffix) if suffix == expected => Ok(()),
            _ => Err(anyhow!("yaml tag {}{} is not supported here", tag.handle, tag.suffix)),
        }
    }
}

fn core_tag_suffix(tag: &Tag) -> Option<&str> {
    match tag.handle.as_str() {
        "tag:yaml.org,2002:" | "!!" => Some(tag.suffix.as_str()),
        _ => None,
    }
}

// Explicit keys win over merged ones, and earlier merge sources win over later ones.
fn merge_into(entries: &mut LinkedHashMap<Yaml, Yaml>, source: &Yaml) -> Result<(), Error> {
    match source {
        Yaml::Hash(map) => {
            for (key, value) in map.iter() {
                if !entries.contains_key(key) {
                    entries.insert(key.clone(), value.clone());
                }
            }
            Ok(())
        }
        Yaml::Array(sources) => {
            for source in sources.iter() {
                let Yaml::Hash(_) = source else {
                    return Err(anyhow!("merge key sequence may only contain mappings, found {}", source.type_name()));
                };
                merge_into(entries, source)?;
            }
            Ok(())
        }
        _ => Err(anyhow!("merge key value must be a mapping or a sequence of mappings, found {}", source.type_name())),
    }
}

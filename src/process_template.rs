// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use tracing::debug;

use crate::{
    bindings::Bindings,
    config::HEADER,
    cow_yaml::{parse_yaml_str, yaml_emit_to_string, Yaml},
    error::GenerateError,
    interpreter::interpret,
    parser::Parser,
    yaml_utils::stringify_keys,
};

/// Renders, loads, normalizes and emits a template, returning the full generated file text.
pub fn process_yaml_template_str(filename: &str, template_string: &str, bindings: &Bindings) -> Result<String, GenerateError> {
    let docs = process_yaml_template(filename, template_string, bindings)?;
    let docs = normalize_docs(&docs)?;
    generated_file_text(&docs)
}

/// Renders a template and loads the result. Aliases and merge keys are already resolved in the
/// returned documents.
pub fn process_yaml_template(filename: &str, template_string: &str, bindings: &Bindings) -> Result<Vec<Yaml>, GenerateError> {
    let rendered = render_template(filename, template_string, bindings)?;
    let docs = parse_yaml_str(&rendered).map_err(|err| GenerateError::Parse(err.to_string()))?;
    debug!("{} rendered into {} yaml document(s)", filename, docs.len());
    Ok(docs)
}

pub fn render_template(filename: &str, template_string: &str, bindings: &Bindings) -> Result<String, GenerateError> {
    let parser = Parser::new();
    let template = parser
        .parse(filename, template_string)
        .map_err(|err| GenerateError::TemplateSyntax(err.to_string()))?;

    let rendered = interpret(&template, bindings).map_err(|err| GenerateError::TemplateEvaluation(err.to_string()))?;
    Ok(rendered)
}

pub fn normalize_docs(docs: &[Yaml]) -> Result<Vec<Yaml>, GenerateError> {
    docs.iter()
        .map(|doc| stringify_keys(doc).map_err(|err| GenerateError::Serialization(err.to_string())))
        .collect()
}

pub fn emit_docs(docs: &[Yaml]) -> Result<String, GenerateError> {
    yaml_emit_to_string(docs).map_err(|err| GenerateError::Serialization(err.to_string()))
}

pub fn generated_file_text(docs: &[Yaml]) -> Result<String, GenerateError> {
    let body = emit_docs(docs)?;
    Ok(format!("{}{}", HEADER, body))
}

// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// `--var NAME=VALUE` command line arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableArg {
    pub name: String,
    pub value: String,
}

/// Splits on the first `=`, so values may themselves contain `=`.
pub fn parse_variable_arg(arg: &str) -> Result<VariableArg, String> {
    let Some((name, value)) = arg.split_once('=') else {
        return Err(format!("expected NAME=VALUE, found {:?}", arg));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in {:?}", arg));
    }

    Ok(VariableArg {
        name: name.to_string(),
        value: value.to_string(),
    })
}

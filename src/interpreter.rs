// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod interpreter_run;

use anyhow::Error;

use crate::{ast::FileTemplate, bindings::Bindings};

use interpreter_run::InterpreterRun;

/// Renders `file_templ` to text. Expressions can only see the names in `bindings`.
pub fn interpret(file_templ: &FileTemplate, bindings: &Bindings) -> Result<String, Error> {
    let mut interpreter_run = InterpreterRun::new(bindings);
    interpreter_run.interpret_file(file_templ)
}

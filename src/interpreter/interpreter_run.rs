// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::rc::Rc;

use anyhow::{anyhow, Error};
use tracing::trace;

use crate::{
    ast::{Expr, ExprConcat, ExprIdent, FileTemplate, OutputTemplate, Segment, SourceLocationSpan},
    bindings::Bindings,
};

pub struct InterpreterRun<'a> {
    bindings: &'a Bindings,
    out: String,
}

macro_rules! errwithloc {
    ($loc:expr, $fmt:expr $(, $($arg:tt)*)?) => {
        anyhow!(concat!("{} ", $fmt), $loc, $($($arg)*)?)
    };
}

impl<'a> InterpreterRun<'a> {
    pub fn new(bindings: &'a Bindings) -> InterpreterRun<'a> {
        InterpreterRun {
            bindings,
            out: String::new(),
        }
    }

    pub fn interpret_file(&mut self, file_templ: &FileTemplate) -> Result<String, Error> {
        for segment in &file_templ.segments {
            match segment {
                Segment::Text(text) => self.out.push_str(text),
                Segment::Output(output) => self.interpret_output(output)?,
            }
        }

        Ok(std::mem::take(&mut self.out))
    }

    fn interpret_output(&mut self, output: &OutputTemplate) -> Result<(), Error> {
        let value = self.interpret_expr(&output.expr, &output.src_loc)?;
        trace!("{} rendered {} bytes", output.src_loc, value.len());

        // Values are inserted verbatim. Quoting, if any, is up to the template.
        self.out.push_str(&value);
        Ok(())
    }

    fn interpret_expr(&self, expr: &Expr, src_loc: &SourceLocationSpan) -> Result<Rc<String>, Error> {
        match expr {
            Expr::String(string) => Ok(string.value.clone()),
            Expr::Variable(ident) => self.interpret_variable(ident, src_loc),
            Expr::Concat(concat) => self.interpret_concat(concat, src_loc),
        }
    }

    fn interpret_variable(&self, ident: &ExprIdent, src_loc: &SourceLocationSpan) -> Result<Rc<String>, Error> {
        match self.bindings.get(&ident.name) {
            Some(value) => Ok(value.clone()),
            None => Err(errwithloc!(src_loc, "undefined variable `{}`", ident.name)),
        }
    }

    fn interpret_concat(&self, concat: &ExprConcat, src_loc: &SourceLocationSpan) -> Result<Rc<String>, Error> {
        let left = self.interpret_expr(&concat.left, src_loc)?;
        let right = self.interpret_expr(&concat.right, src_loc)?;

        let mut value = String::with_capacity(left.len() + right.len());
        value.push_str(&left);
        value.push_str(&right);
        Ok(Rc::new(value))
    }
}

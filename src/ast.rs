// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct FileTemplate {
    pub src_loc: SourceLocationSpan,
    pub segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    // Literal template text, including the text produced by `<%%` escapes.
    Text(String),
    Output(OutputTemplate),
}

/// An `<%= ... %>` tag.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputTemplate {
    pub src_loc: SourceLocationSpan,
    pub expr: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    String(ExprString),
    Variable(ExprIdent),
    Concat(ExprConcat),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprString {
    pub value: Rc<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprIdent {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprConcat {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceLocationSpan {
    pub filename: Rc<String>,
    pub start: SourceLocation,
    pub end: SourceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceLocation {
    pub index: usize,
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for SourceLocationSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.start.line, self.start.col)
    }
}

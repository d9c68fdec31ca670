// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

mod template_expr;

use std::rc::Rc;

use anyhow::{anyhow, Error};

use crate::ast::{FileTemplate, OutputTemplate, Segment, SourceLocation, SourceLocationSpan};

use template_expr::TemplateExprParser;

/// Splits ERB-style template text into literal text and `<%= %>` output tags.
///
/// Supported tags are `<%= expr %>`, `<%# comment %>` and the `<%%` escape. A tag closed with
/// `-%>` swallows the line break that follows it. Code tags (`<% ... %>`) are rejected.
pub struct Parser {
    expr_parser: TemplateExprParser,
}

enum TagKind {
    Output,
    Comment,
}

impl Parser {
    pub fn new() -> Parser {
        let expr_parser = TemplateExprParser::new();
        Parser { expr_parser }
    }

    pub fn parse(&self, filename: &str, input: &str) -> Result<FileTemplate, Error> {
        let run = ParserRun::new(self, filename, input);
        run.parse()
    }
}

struct ParserRun<'a> {
    expr_parser: &'a TemplateExprParser,
    filename: Rc<String>,
    input: &'a str,
    line_starts: Vec<usize>,
}

impl ParserRun<'_> {
    fn new<'a>(parser: &'a Parser, filename: &str, input: &'a str) -> ParserRun<'a> {
        let line_starts = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(index, _)| index + 1))
            .collect();

        ParserRun {
            expr_parser: &parser.expr_parser,
            filename: Rc::new(filename.to_string()),
            input,
            line_starts,
        }
    }

    fn parse(&self) -> Result<FileTemplate, Error> {
        let input = self.input;

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut curr_index = 0;
        loop {
            // Find next tag.
            let Some(offset) = input[curr_index..].find("<%") else {
                break;
            };
            let tag_start = curr_index + offset;
            text.push_str(&input[curr_index..tag_start]);

            let after_open = &input[tag_start + 2..];
            if after_open.starts_with('%') {
                text.push_str("<%");
                curr_index = tag_start + 3;
                continue;
            }

            let kind = match after_open.chars().next() {
                Some('=') => TagKind::Output,
                Some('#') => TagKind::Comment,
                _ => {
                    let src_loc = self.to_source_location_span(tag_start, tag_start + 2);
                    return Err(anyhow!("{} code tags are not supported, use <%= %> or <%# %>", src_loc));
                }
            };

            let content_start = tag_start + 3;
            let close = match kind {
                TagKind::Output => find_tag_close(input, content_start),
                TagKind::Comment => input[content_start..].find("%>").map(|index| content_start + index),
            };
            let Some(close) = close else {
                let src_loc = self.to_source_location_span(tag_start, input.len());
                return Err(anyhow!("{} unterminated template tag", src_loc));
            };

            let trim = input[content_start..close].ends_with('-');
            let content_end = if trim { close - 1 } else { close };

            let mut tag_end = close + 2;
            let src_loc = self.to_source_location_span(tag_start, tag_end);
            if trim {
                if input[tag_end..].starts_with("\r\n") {
                    tag_end += 2;
                } else if input[tag_end..].starts_with('\n') {
                    tag_end += 1;
                }
            }

            if let TagKind::Output = kind {
                let expr = self
                    .expr_parser
                    .parse(&input[content_start..content_end])
                    .map_err(|err| anyhow!("{} {}", src_loc, err))?;

                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Output(OutputTemplate { src_loc, expr }));
            }

            curr_index = tag_end;
        }

        // Add trailing text.
        text.push_str(&input[curr_index..]);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        let src_loc = self.to_source_location_span(0, input.len());
        let file = FileTemplate { src_loc, segments };
        Ok(file)
    }

    fn to_source_location_span(&self, start: usize, end: usize) -> SourceLocationSpan {
        SourceLocationSpan {
            filename: self.filename.clone(),
            start: self.to_source_location(start),
            end: self.to_source_location(end),
        }
    }

    fn to_source_location(&self, index: usize) -> SourceLocation {
        let line = self.line_starts.partition_point(|&line_start| line_start <= index);
        let line_start = self.line_starts[line - 1];
        SourceLocation {
            index,
            line,
            col: self.input[line_start..index].chars().count() + 1,
        }
    }
}

// Finds the `%>` closing an output tag, skipping over quoted strings in the expression.
fn find_tag_close(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut quote = None;
    let mut index = start;
    while index < bytes.len() {
        let byte = bytes[index];
        match quote {
            Some(_) if byte == b'\\' => index += 1,
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'%' if bytes.get(index + 1) == Some(&b'>') => return Some(index),
                _ => {}
            },
        }
        index += 1;
    }
    None
}

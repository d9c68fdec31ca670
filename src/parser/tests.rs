use crate::ast::{Expr, ExprIdent};

use super::*;

fn parse(input: &str) -> Result<FileTemplate, Error> {
    Parser::new().parse("test.yml.erb", input)
}

fn variable(name: &str) -> Expr {
    Expr::Variable(ExprIdent { name: name.to_string() })
}

fn texts_and_exprs(file: &FileTemplate) -> Vec<String> {
    file.segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => format!("text {:?}", text),
            Segment::Output(output) => format!("expr {:?}", output.expr),
        })
        .collect()
}

#[test]
fn plain_text_is_a_single_segment() {
    let file = parse("jobs:\n  test: {}\n").unwrap();
    assert_eq!(file.segments, vec![Segment::Text("jobs:\n  test: {}\n".to_string())]);
}

#[test]
fn output_tag_splits_text() {
    let file = parse("skip: <%= ginkgo_skip %>\n").unwrap();
    assert_eq!(file.segments.len(), 3);
    assert_eq!(file.segments[0], Segment::Text("skip: ".to_string()));
    let Segment::Output(output) = &file.segments[1] else {
        panic!("expected output tag");
    };
    assert_eq!(output.expr, variable("ginkgo_skip"));
    assert_eq!(output.src_loc.start.line, 1);
    assert_eq!(output.src_loc.start.col, 7);
    assert_eq!(file.segments[2], Segment::Text("\n".to_string()));
}

#[test]
fn tag_location_counts_lines_and_chars() {
    let file = parse("a: 1\nbé: <%= x %>\n").unwrap();
    let Segment::Output(output) = &file.segments[1] else {
        panic!("expected output tag");
    };
    assert_eq!(output.src_loc.start.line, 2);
    assert_eq!(output.src_loc.start.col, 5);
    assert_eq!(output.src_loc.to_string(), "test.yml.erb:2:5");
}

#[test]
fn comments_produce_nothing() {
    let file = parse("a: 1\n<%# generated below %>b: 2\n").unwrap();
    assert_eq!(file.segments, vec![Segment::Text("a: 1\nb: 2\n".to_string())]);
}

#[test]
fn percent_escape_is_literal() {
    let file = parse("a: <%%= not a tag %>\n").unwrap();
    assert_eq!(file.segments, vec![Segment::Text("a: <%= not a tag %>\n".to_string())]);
}

#[test]
fn dash_close_trims_following_newline() {
    let file = parse("<%# header -%>\na: <%= x -%>\nb: 2\n").unwrap();
    assert_eq!(
        texts_and_exprs(&file),
        vec![
            "text \"a: \"".to_string(),
            format!("expr {:?}", variable("x")),
            "text \"b: 2\\n\"".to_string(),
        ]
    );
}

#[test]
fn close_marker_inside_string_does_not_end_tag() {
    let file = parse("a: <%= \"%>\" + x %>\n").unwrap();
    let Segment::Output(output) = &file.segments[1] else {
        panic!("expected output tag");
    };
    assert!(matches!(output.expr, Expr::Concat(_)));
}

#[test]
fn code_tags_are_rejected() {
    let err = parse("a: 1\n<% if x %>\n").unwrap_err();
    assert_eq!(err.to_string(), "test.yml.erb:2:1 code tags are not supported, use <%= %> or <%# %>");
}

#[test]
fn unterminated_tag_is_rejected() {
    let err = parse("a: <%= x\n").unwrap_err();
    assert_eq!(err.to_string(), "test.yml.erb:1:4 unterminated template tag");
}

#[test]
fn invalid_expression_reports_location() {
    let err = parse("a: <%= x + %>\n").unwrap_err();
    assert_eq!(err.to_string(), "test.yml.erb:1:4 invalid template expression \"x +\"");
}

#[test]
fn whitespace_only_output_tag_is_empty() {
    let err = parse("a: <%=  %>\n").unwrap_err();
    assert_eq!(err.to_string(), "test.yml.erb:1:4 empty template expression");

    let err = parse("a: <%=%>\n").unwrap_err();
    assert_eq!(err.to_string(), "test.yml.erb:1:4 empty template expression");
}

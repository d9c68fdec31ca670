// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::ops::Range;

use chumsky::{
    error::Simple,
    primitive::{end, filter, just, one_of},
    text::{self, TextParser},
    Parser,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    String(String),
    Ident(String),
    Plus,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::String(value) => write!(f, "{:?}", value),
            Token::Ident(name) => f.write_str(name),
            Token::Plus => f.write_str("+"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

pub fn gen_lexer() -> impl Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>> {
    let escape = just('\\').ignore_then(
        just('\\')
            .or(just('/'))
            .or(just('"'))
            .or(just('b').to('\x08'))
            .or(just('f').to('\x0C'))
            .or(just('n').to('\n'))
            .or(just('r').to('\r'))
            .or(just('t').to('\t'))
            .or(just('u').ignore_then(
                filter(|c: &char| c.is_ascii_hexdigit())
                    .repeated()
                    .exactly(4)
                    .collect::<String>()
                    .validate(|digits, span, emit| {
                        u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32).unwrap_or_else(|| {
                            emit(Simple::custom(span, "invalid unicode character"));
                            '\u{FFFD}' // unicode replacement character
                        })
                    }),
            )),
    );

    let double_quoted = just('"')
        .ignore_then(filter(|c| *c != '\\' && *c != '"').or(escape).repeated())
        .then_ignore(just('"'))
        .collect::<String>()
        .map(Token::String)
        .labelled("string");

    // Single-quoted strings only unescape `\\` and `\'`. Any other backslash is kept, so regex
    // patterns such as '\s' pass through untouched.
    let single_escape = just('\\').ignore_then(one_of("\\'"));

    let single_quoted = just('\'')
        .ignore_then(
            filter(|c| *c != '\\' && *c != '\'')
                .or(single_escape)
                .or(just('\\'))
                .repeated(),
        )
        .then_ignore(just('\''))
        .collect::<String>()
        .map(Token::String)
        .labelled("string");

    let ident = text::ident().map(Token::Ident).labelled("identifier");

    let ctrl = one_of("+()").map(|c| match c {
        '+' => Token::Plus,
        '(' => Token::LParen,
        ')' => Token::RParen,
        _ => unreachable!(),
    });

    let token = double_quoted.or(single_quoted).or(ident).or(ctrl);

    token
        .map_with_span(|tok, span| (tok, span))
        .padded()
        .repeated()
        .then_ignore(end())
}

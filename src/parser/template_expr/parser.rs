// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{ops::Range, rc::Rc};

use anyhow::{anyhow, Error};
use chumsky::{prelude::*, Stream};
use tracing::debug;

use crate::ast::{Expr, ExprConcat, ExprIdent, ExprString};

use super::lexer::{gen_lexer, Token};

pub struct TemplateExprParser {
    lexer: Box<dyn Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>>>,
    parser: Box<dyn Parser<Token, Expr, Error = Simple<Token>>>,
}

impl TemplateExprParser {
    pub fn new() -> TemplateExprParser {
        let lexer = gen_lexer();
        let parser = gen_template_expression_parser();
        TemplateExprParser {
            lexer: Box::new(lexer),
            parser: Box::new(parser),
        }
    }

    /// Parses the text between `<%=` and `%>`.
    pub fn parse(&self, expr_str: &str) -> Result<Expr, Error> {
        if expr_str.trim().is_empty() {
            return Err(anyhow!("empty template expression"));
        }

        let tokens = match self.lexer.parse(expr_str) {
            Ok(tokens) => tokens,
            Err(errs) => {
                for err in &errs {
                    debug!("expression lex error: {}", err);
                }
                return Err(anyhow!("invalid template expression {:?}", expr_str.trim()));
            }
        };

        let expr_str_len = expr_str.chars().count();
        let eoi = expr_str_len..expr_str_len + 1;

        match self.parser.parse(Stream::from_iter(eoi, tokens.into_iter())) {
            Ok(expr) => Ok(expr),
            Err(errs) => {
                for err in &errs {
                    debug!("expression parse error: {}", err);
                }
                Err(anyhow!("invalid template expression {:?}", expr_str.trim()))
            }
        }
    }
}

fn gen_template_expression_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> {
    let expr = recursive(|expr| {
        let value = select! {
            Token::String(value) => Expr::String(ExprString { value: Rc::new(value) }),
            Token::Ident(name) => Expr::Variable(ExprIdent { name }),
        }
        .labelled("value");

        let group = expr.delimited_by(just(Token::LParen), just(Token::RParen));

        let atom = value.or(group);

        atom.clone()
            .then(just(Token::Plus).ignore_then(atom).repeated())
            .foldl(|left, right| {
                Expr::Concat(ExprConcat {
                    left: Box::new(left),
                    right: Box::new(right),
                })
            })
    });

    expr.then_ignore(end())
}

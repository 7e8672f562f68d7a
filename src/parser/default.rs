use crate::ast::{Condition, Pipeline, Stage};
use crate::lexer::{Token, TokenKind};
use crate::parser::{ParseError, Parser};

pub struct DefaultParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> DefaultParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn end_pos(&self) -> usize {
        self.tokens.last().map(|t| t.span.1).unwrap_or(0)
    }

    // Filename after `<` or `>`
    fn expect_target(&mut self, op: &Token) -> Result<String, ParseError> {
        match self.next() {
            Some(t) if t.kind == TokenKind::Word => Ok(t.lexeme.clone()),
            Some(t) => Err(ParseError::UnexpectedToken {
                found: t.lexeme.clone(),
                pos: t.span.0,
            }),
            None => Err(ParseError::MissingRedirectTarget {
                op: op.lexeme.clone(),
                pos: op.span.0,
            }),
        }
    }

    fn parse_condition(&mut self) -> Condition {
        let condition = match self.peek() {
            Some(t) if t.kind == TokenKind::Word && t.lexeme == "and" => Condition::IfSuccess,
            Some(t) if t.kind == TokenKind::Word && t.lexeme == "or" => Condition::IfFailure,
            _ => return Condition::Always,
        };
        self.pos += 1;
        condition
    }
}

impl<'a> Parser for DefaultParser<'a> {
    fn parse(&mut self) -> Result<Pipeline, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut pipeline = Pipeline {
            condition: self.parse_condition(),
            ..Pipeline::default()
        };
        if self.peek().is_none() {
            return Err(ParseError::MissingCommand {
                keyword: self.tokens[0].lexeme.clone(),
            });
        }

        let mut args: Vec<String> = Vec::new();
        while let Some(tok) = self.next() {
            match tok.kind {
                TokenKind::Word => args.push(tok.lexeme.clone()),
                TokenKind::RedirectIn => pipeline.input = Some(self.expect_target(tok)?),
                TokenKind::RedirectOut => pipeline.output = Some(self.expect_target(tok)?),
                TokenKind::Pipe => {
                    if args.is_empty() {
                        return Err(ParseError::EmptyStage { pos: tok.span.0 });
                    }
                    pipeline.stages.push(Stage { args: std::mem::take(&mut args) });
                }
            }
        }

        if args.is_empty() {
            return Err(ParseError::EmptyStage { pos: self.end_pos() });
        }
        pipeline.stages.push(Stage { args });

        Ok(pipeline)
    }
}

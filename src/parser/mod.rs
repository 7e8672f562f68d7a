pub mod default;

use log::debug;
use thiserror::Error;

use crate::ast::Pipeline;
use crate::lexer::Lexer;
use default::DefaultParser;

pub trait Parser {
    fn parse(&mut self) -> Result<Pipeline, ParseError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Input is empty")]
    EmptyInput,
    #[error("Expected a command after '{keyword}'")]
    MissingCommand { keyword: String },
    #[error("Missing filename after '{op}' at position {pos}")]
    MissingRedirectTarget { op: String, pos: usize },
    #[error("Unexpected token '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("Empty command at position {pos}")]
    EmptyStage { pos: usize },
}

impl ParseError {
    /// Blank, whitespace-only and comment-only lines: nothing to run, nothing to report.
    pub fn is_blank(&self) -> bool {
        matches!(self, ParseError::EmptyInput)
    }
}

/// Drops everything from the first `#` onward, even inside a word.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parses one command line into a [`Pipeline`].
pub fn parse(line: &str) -> Result<Pipeline, ParseError> {
    let tokens = Lexer::tokenize(strip_comment(line));
    let result = DefaultParser::new(&tokens).parse();
    debug!("parse {:?} -> {:?}", line, result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Condition, Stage};

    fn stage(args: &[&str]) -> Stage {
        Stage::new(args.iter().copied())
    }

    #[test]
    fn test_blank_and_comment_lines() {
        for line in ["", "   \t  ", "# this is a comment", "  # comment", "#"] {
            assert_eq!(parse(line), Err(ParseError::EmptyInput), "line: {:?}", line);
        }
    }

    #[test]
    fn test_trailing_comment() {
        let p = parse("ls -la # list files").unwrap();
        assert_eq!(p.stages, vec![stage(&["ls", "-la"])]);
    }

    #[test]
    fn test_comment_inside_word_truncates() {
        let p = parse("echo abc#def").unwrap();
        assert_eq!(p.stages, vec![stage(&["echo", "abc"])]);
    }

    #[test]
    fn test_simple_command() {
        let p = parse("ls -la /home").unwrap();
        assert_eq!(
            p,
            Pipeline {
                stages: vec![stage(&["ls", "-la", "/home"])],
                input: None,
                output: None,
                condition: Condition::Always,
            }
        );
    }

    #[test]
    fn test_extra_whitespace() {
        let p = parse("   echo    hello     world  ").unwrap();
        assert_eq!(p.stages, vec![stage(&["echo", "hello", "world"])]);
    }

    #[test]
    fn test_conditionals() {
        let p = parse("and ls -la /tmp").unwrap();
        assert_eq!(p.condition, Condition::IfSuccess);
        assert_eq!(p.stages, vec![stage(&["ls", "-la", "/tmp"])]);

        let p = parse("or pwd").unwrap();
        assert_eq!(p.condition, Condition::IfFailure);
        assert_eq!(p.stages, vec![stage(&["pwd"])]);
    }

    #[test]
    fn test_keyword_only_in_first_position() {
        let p = parse("echo and or").unwrap();
        assert_eq!(p.condition, Condition::Always);
        assert_eq!(p.stages, vec![stage(&["echo", "and", "or"])]);

        let p = parse("ls | or").unwrap();
        assert_eq!(p.stages, vec![stage(&["ls"]), stage(&["or"])]);
    }

    #[test]
    fn test_bare_keyword_is_no_pipeline() {
        assert!(matches!(parse("and"), Err(ParseError::MissingCommand { .. })));
        assert!(matches!(parse("or   # nothing"), Err(ParseError::MissingCommand { .. })));
    }

    #[test]
    fn test_redirects() {
        let p = parse("cat < input.txt").unwrap();
        assert_eq!(p.input.as_deref(), Some("input.txt"));
        assert_eq!(p.output, None);

        let p = parse("ls -la /tmp > files.txt").unwrap();
        assert_eq!(p.stages, vec![stage(&["ls", "-la", "/tmp"])]);
        assert_eq!(p.output.as_deref(), Some("files.txt"));
    }

    #[test]
    fn test_redirect_order_is_irrelevant() {
        let a = parse("sort < input.txt > output.txt").unwrap();
        let b = parse("sort > output.txt < input.txt").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.input.as_deref(), Some("input.txt"));
        assert_eq!(a.output.as_deref(), Some("output.txt"));
    }

    #[test]
    fn test_redirect_before_command() {
        let p = parse("< in.txt cat").unwrap();
        assert_eq!(p.stages, vec![stage(&["cat"])]);
        assert_eq!(p.input.as_deref(), Some("in.txt"));
    }

    #[test]
    fn test_last_redirect_wins() {
        let p = parse("echo hi > a.txt > b.txt").unwrap();
        assert_eq!(p.output.as_deref(), Some("b.txt"));
    }

    #[test]
    fn test_pipeline_stages() {
        let p = parse("cat file.txt | grep error | wc -l").unwrap();
        assert_eq!(
            p.stages,
            vec![stage(&["cat", "file.txt"]), stage(&["grep", "error"]), stage(&["wc", "-l"])]
        );
    }

    #[test]
    fn test_pipeline_without_spaces() {
        let p = parse("ls|grep test>results.txt").unwrap();
        assert_eq!(p.stages, vec![stage(&["ls"]), stage(&["grep", "test"])]);
        assert_eq!(p.output.as_deref(), Some("results.txt"));
    }

    #[test]
    fn test_full_line() {
        let p = parse("and cat < in.txt | grep pattern | sort > out.txt").unwrap();
        assert_eq!(p.condition, Condition::IfSuccess);
        assert_eq!(p.stages.len(), 3);
        assert_eq!(p.stages[2], stage(&["sort"]));
        assert_eq!(p.input.as_deref(), Some("in.txt"));
        assert_eq!(p.output.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_missing_redirect_target() {
        assert_eq!(
            parse("cat <"),
            Err(ParseError::MissingRedirectTarget { op: "<".to_string(), pos: 4 })
        );
        assert!(matches!(parse("ls >"), Err(ParseError::MissingRedirectTarget { .. })));
    }

    #[test]
    fn test_operator_as_redirect_target() {
        assert_eq!(
            parse("ls > | wc"),
            Err(ParseError::UnexpectedToken { found: "|".to_string(), pos: 5 })
        );
        assert!(matches!(parse("cat < > x"), Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_empty_stages() {
        assert_eq!(parse("| wc"), Err(ParseError::EmptyStage { pos: 0 }));
        assert!(matches!(parse("ls |"), Err(ParseError::EmptyStage { .. })));
        assert!(matches!(parse("ls | | wc"), Err(ParseError::EmptyStage { .. })));
        assert!(matches!(parse("> out.txt"), Err(ParseError::EmptyStage { .. })));
        assert!(matches!(parse("and < in.txt"), Err(ParseError::EmptyStage { .. })));
    }

    #[test]
    fn test_only_blank_is_blank() {
        assert!(ParseError::EmptyInput.is_blank());
        assert!(!ParseError::EmptyStage { pos: 0 }.is_blank());
    }
}

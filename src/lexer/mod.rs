pub mod token;

pub use token::{Token, TokenKind};

pub struct Lexer;

impl Lexer {
    /// Splits a line into words and the single-character operators `<`, `>`, `|`.
    ///
    /// Never fails: operator placement is checked by the parser. Operators are
    /// always their own token, so `cat<file` yields `cat`, `<`, `file`.
    pub fn tokenize(line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut chars = line.char_indices().peekable();
        let mut word_start: Option<usize> = None;

        while let Some(&(pos, ch)) = chars.peek() {
            match ch {
                ' ' | '\t' => {
                    if let Some(start) = word_start.take() {
                        tokens.push(Token::new(TokenKind::Word, &line[start..pos], (start, pos)));
                    }
                    chars.next();
                }
                '<' | '>' | '|' => {
                    if let Some(start) = word_start.take() {
                        tokens.push(Token::new(TokenKind::Word, &line[start..pos], (start, pos)));
                    }
                    let kind = match ch {
                        '<' => TokenKind::RedirectIn,
                        '>' => TokenKind::RedirectOut,
                        _ => TokenKind::Pipe,
                    };
                    tokens.push(Token::new(kind, &line[pos..pos + 1], (pos, pos + 1)));
                    chars.next();
                }
                _ => {
                    if word_start.is_none() {
                        word_start = Some(pos);
                    }
                    chars.next();
                }
            }
        }

        if let Some(start) = word_start {
            tokens.push(Token::new(TokenKind::Word, &line[start..], (start, line.len())));
        }

        tokens
    }
}

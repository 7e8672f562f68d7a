#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Word,          // Program name, argument or redirect target
    RedirectIn,    // <
    RedirectOut,   // >
    Pipe,          // |
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        !matches!(self, TokenKind::Word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,       // Original text
    pub span: (usize, usize), // Position info [start, end)
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, span: (usize, usize)) -> Self {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span,
        }
    }
}

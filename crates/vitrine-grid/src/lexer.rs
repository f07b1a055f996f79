use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Number(f32),
    /// `:` between the two halves of an aspect ratio.
    Colon,
    /// Frame separator: newline or `;`.
    Sep,
    Eof,
}

/// A token plus the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok.token == Token::Eof;
            tokens.push(tok);
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    /// Skips blanks and comments. Newlines are significant and left in place.
    fn skip_blanks_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace() && c != '\n') {
                self.advance();
            }
            if self.src[self.pos..].starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.src[self.pos..].starts_with("/*") {
                let (line, col) = (self.line, self.col);
                self.advance();
                self.advance();
                loop {
                    if self.src[self.pos..].starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        return Err(ParseError::new("unterminated block comment", line, col));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    fn next_token(&mut self) -> Result<TokenWithPos, ParseError> {
        self.skip_blanks_and_comments()?;

        let (line, col) = (self.line, self.col);
        let token = match self.peek() {
            None => Token::Eof,
            Some('\n') | Some(';') => {
                self.advance();
                Token::Sep
            }
            Some(':') => {
                self.advance();
                Token::Colon
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.lex_number()?,
            Some(c) if c.is_alphabetic() || c == '_' => self.lex_ident(),
            Some(other) => return Err(self.err(format!("unexpected character {:?}", other))),
        };

        Ok(TokenWithPos { token, line, col })
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let s = &self.src[start..self.pos];
        s.parse::<f32>()
            .map(Token::Number)
            .map_err(|_| self.err(format!("invalid number {:?}", s)))
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn ratio_is_number_colon_number() {
        assert_eq!(
            kinds("3:4"),
            vec![Token::Number(3.0), Token::Colon, Token::Number(4.0), Token::Eof]
        );
    }

    #[test]
    fn newline_and_semicolon_separate() {
        assert_eq!(
            kinds("v\nh;v"),
            vec![
                Token::Ident("v".into()),
                Token::Sep,
                Token::Ident("h".into()),
                Token::Sep,
                Token::Ident("v".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let toks = Lexer::new("1 2\n  v").tokenize().unwrap();
        assert_eq!((toks[1].line, toks[1].col), (1, 3));
        assert_eq!((toks[3].line, toks[3].col), (2, 3));
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        assert!(Lexer::new("/* open").tokenize().is_err());
    }

    #[test]
    fn negative_sign_is_rejected() {
        let err = Lexer::new("-1").tokenize().unwrap_err();
        assert_eq!((err.line, err.col), (1, 1));
    }
}

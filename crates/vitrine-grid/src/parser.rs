use crate::ast::{FrameSpec, GridDocument, Orientation};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .or_else(|| self.tokens.last().map(|t| (t.line, t.col)))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).map(|t| t.token.clone()).unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    fn skip_separators(&mut self) {
        while self.peek() == &Token::Sep {
            self.advance();
        }
    }

    /// Consumes a number that must be a positive whole value.
    fn expect_positive_int(&mut self, what: &str) -> Result<u32, ParseError> {
        let err = self.err(format!("{what} must be a positive integer"));
        match self.advance() {
            Token::Number(n) if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f32 => Ok(n as u32),
            Token::Number(_) => Err(err),
            tok => Err(self.err_at_previous(format!("expected {what}, got {:?}", tok))),
        }
    }

    fn err_at_previous(&self, msg: String) -> ParseError {
        let idx = self.pos.saturating_sub(1);
        let (line, col) = self.tokens.get(idx).map(|t| (t.line, t.col)).unwrap_or((1, 1));
        ParseError::new(msg, line, col)
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(&mut self) -> Result<GridDocument, ParseError> {
        let mut doc = GridDocument::default();

        self.skip_separators();
        if let Token::Ident(word) = self.peek() {
            if word == "columns" {
                self.advance();
                doc.columns = Some(self.expect_positive_int("column count")?);
                self.expect_line_end()?;
            }
        }

        loop {
            self.skip_separators();
            if self.peek() == &Token::Eof {
                break;
            }
            let frame = self.parse_frame()?;
            if let (Some(cols), Some(last_col)) =
                (doc.columns, frame.col_start.checked_add(frame.col_span - 1))
            {
                if last_col > cols {
                    return Err(self.err_at_previous(format!(
                        "frame spans columns {}..={} but the grid has {} columns",
                        frame.col_start, last_col, cols
                    )));
                }
            }
            doc.frames.push(frame);
            self.expect_line_end()?;
        }

        Ok(doc)
    }

    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Token::Sep | Token::Eof => Ok(()),
            tok => Err(self.err(format!("expected end of line, got {:?}", tok))),
        }
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    /// `row col span aspect orientation`
    fn parse_frame(&mut self) -> Result<FrameSpec, ParseError> {
        let row_start = self.expect_positive_int("row")?;
        let col_start = self.expect_positive_int("column")?;
        let col_span = self.expect_positive_int("span")?;
        let aspect_ratio = self.parse_aspect()?;
        let orientation = self.parse_orientation()?;
        Ok(FrameSpec { row_start, col_start, col_span, aspect_ratio, orientation })
    }

    /// `W:H` or a decimal width/height ratio.
    fn parse_aspect(&mut self) -> Result<f32, ParseError> {
        let first = match self.advance() {
            Token::Number(n) => n,
            tok => return Err(self.err_at_previous(format!("expected aspect ratio, got {:?}", tok))),
        };
        let ratio = if self.peek() == &Token::Colon {
            self.advance();
            match self.advance() {
                Token::Number(d) if d > 0.0 => first / d,
                Token::Number(_) => {
                    return Err(self.err_at_previous("aspect ratio height must be positive".into()));
                }
                tok => {
                    return Err(self.err_at_previous(format!(
                        "expected aspect ratio height, got {:?}",
                        tok
                    )));
                }
            }
        } else {
            first
        };
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(self.err_at_previous("aspect ratio must be positive".into()));
        }
        Ok(ratio)
    }

    fn parse_orientation(&mut self) -> Result<Orientation, ParseError> {
        match self.advance() {
            Token::Ident(s) => match s.as_str() {
                "v" | "vertical" => Ok(Orientation::Vertical),
                "h" | "horizontal" => Ok(Orientation::Horizontal),
                other => Err(self.err_at_previous(format!("unknown orientation {:?}", other))),
            },
            tok => Err(self.err_at_previous(format!("expected orientation, got {:?}", tok))),
        }
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a grid descriptor into a [`GridDocument`].
pub fn parse_str(src: &str) -> Result<GridDocument, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}

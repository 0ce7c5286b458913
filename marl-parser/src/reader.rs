// marl-parser - Reader for Marl
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Recursive descent reader for Marl source code.
//!
//! Converts tokens into a `MarlVal` tree. The reader works as an index
//! cursor over the immutable token sequence produced by the lexer; nothing
//! is consumed destructively, which keeps error positions available.
//!
//! [`Reader::read_str`] reads exactly the first complete form and ignores
//! any trailing tokens. Input that produces no tokens at all (blank lines,
//! comment-only lines) is the distinct [`ReadError::NoTokens`] condition:
//! callers must treat it as "nothing to evaluate", not as an error to
//! report.

use std::fmt;

use crate::lexer::{Lexer, LexerError, SpannedToken, Token};
use crate::value::MarlVal;

/// Reader error.
#[derive(Debug, Clone)]
pub enum ReadError {
    /// The input produced no tokens. Benign: there is nothing to evaluate.
    NoTokens,
    /// Malformed input, with the position of the offending token.
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::NoTokens => write!(f, "no tokens on this line"),
            ReadError::Syntax {
                message,
                line,
                column,
            } => write!(f, "Read error at {}:{}: {}", line, column, message),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<LexerError> for ReadError {
    fn from(e: LexerError) -> Self {
        ReadError::Syntax {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The reader converts tokens into a `MarlVal` tree.
pub struct Reader {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Reader {
    /// Tokenize the whole source and position the cursor at the start.
    pub fn new(source: &str) -> Result<Self, ReadError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Reader { tokens, pos: 0 })
    }

    /// Read the first complete form from the source.
    ///
    /// Trailing tokens after the first form are ignored. Zero tokens is the
    /// benign [`ReadError::NoTokens`] condition.
    pub fn read_str(source: &str) -> Result<MarlVal, ReadError> {
        let mut reader = Reader::new(source)?;
        if reader.tokens.is_empty() {
            return Err(ReadError::NoTokens);
        }
        reader.read_form()
    }

    /// Read the next complete form, or `None` once the tokens are exhausted.
    pub fn next_form(&mut self) -> Result<Option<MarlVal>, ReadError> {
        if self.pos >= self.tokens.len() {
            return Ok(None);
        }
        self.read_form().map(Some)
    }

    // ========================================================================
    // Internal reading methods
    // ========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance the cursor, returning the token it moved past.
    fn advance(&mut self) -> Option<&SpannedToken> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// Error at the current cursor position (or just past the last token).
    fn error(&self, message: impl Into<String>) -> ReadError {
        let (line, column) = match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(t) => (t.line, t.column),
            None => (1, 1),
        };
        ReadError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    fn read_form(&mut self) -> Result<MarlVal, ReadError> {
        let token = match self.peek() {
            Some(t) => t.clone(),
            None => return Err(self.error("Unexpected end of input")),
        };

        match token {
            Token::LParen => self.read_list(),
            Token::LBracket => self.read_vector(),
            Token::LBrace => self.read_map(),

            Token::Quote => self.read_wrapped(MarlVal::quote),
            Token::QuasiQuote => self.read_wrapped(MarlVal::quasiquote),
            Token::Unquote => self.read_wrapped(MarlVal::unquote),
            Token::SpliceUnquote => self.read_wrapped(MarlVal::splice_unquote),
            Token::Deref => self.read_wrapped(MarlVal::deref),
            Token::Meta => self.read_meta(),

            Token::RParen => Err(self.error("Unexpected ')'")),
            Token::RBracket => Err(self.error("Unexpected ']'")),
            Token::RBrace => Err(self.error("Unexpected '}'")),

            Token::Str(raw) => {
                // No string type in this dialect: a string lexeme is an
                // opaque atom carrying its raw text
                self.advance();
                Ok(MarlVal::symbol(&raw))
            }
            Token::Atom(text) => {
                self.advance();
                self.read_atom(&text)
            }

            // The lexer never emits Eof into the token vector
            Token::Eof => Err(self.error("Unexpected end of input")),
        }
    }

    fn read_list(&mut self) -> Result<MarlVal, ReadError> {
        self.advance(); // consume (
        let mut elements = Vec::new();

        loop {
            match self.peek() {
                Some(Token::RParen) => break,
                Some(_) => elements.push(self.read_form()?),
                None => return Err(self.error("Unexpected end of input, expected ')'")),
            }
        }

        self.advance(); // consume )
        Ok(MarlVal::list(elements))
    }

    fn read_vector(&mut self) -> Result<MarlVal, ReadError> {
        self.advance(); // consume [
        let mut elements = Vec::new();

        loop {
            match self.peek() {
                Some(Token::RBracket) => break,
                Some(_) => elements.push(self.read_form()?),
                None => return Err(self.error("Unexpected end of input, expected ']'")),
            }
        }

        self.advance(); // consume ]
        Ok(MarlVal::vector(elements))
    }

    fn read_map(&mut self) -> Result<MarlVal, ReadError> {
        self.advance(); // consume {
        let mut pairs = Vec::new();

        loop {
            match self.peek() {
                Some(Token::RBrace) => break,
                Some(_) => {
                    let key = self.read_form()?;
                    match self.peek() {
                        Some(Token::RBrace) | None => {
                            return Err(self.error(
                                "Map literal must contain an even number of forms",
                            ));
                        }
                        Some(_) => {}
                    }
                    let value = self.read_form()?;
                    pairs.push((key, value));
                }
                None => return Err(self.error("Unexpected end of input, expected '}'")),
            }
        }

        self.advance(); // consume }
        Ok(MarlVal::map(pairs))
    }

    fn read_wrapped(
        &mut self,
        wrap: impl FnOnce(MarlVal) -> MarlVal,
    ) -> Result<MarlVal, ReadError> {
        self.advance(); // consume the marker
        let form = self.read_form()?;
        Ok(wrap(form))
    }

    /// `^` reads two forms: the metadata first, then the subject.
    fn read_meta(&mut self) -> Result<MarlVal, ReadError> {
        self.advance(); // consume ^
        let meta = self.read_form()?;
        let form = self.read_form()?;
        Ok(MarlVal::with_meta(form, meta))
    }

    /// An atom is an integer if the entire token is an optional minus
    /// followed by digits; otherwise it is a symbol with the raw text.
    fn read_atom(&mut self, text: &str) -> Result<MarlVal, ReadError> {
        if is_integer_literal(text) {
            let n: i64 = text
                .parse()
                .map_err(|_| self.error(format!("Integer literal out of range: {}", text)))?;
            return Ok(MarlVal::int(n));
        }
        Ok(MarlVal::symbol(text))
    }
}

/// Optional leading `-`, then one or more ASCII digits, matching the whole
/// token.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Convenience function
// ============================================================================

/// Read the first form from a string.
pub fn read_str(source: &str) -> Result<MarlVal, ReadError> {
    Reader::read_str(source)
}

// ============================================================================
// Tests
// ============================================================================

// marl-parser - Lexer for Marl
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Lexer (tokeniser) for Marl source code.
//!
//! Converts a source string into a stream of tokens. Token classes, in
//! priority order at each token start: the two-character `~@` marker, the
//! single structural characters, a double-quoted string lexeme, a `;`
//! comment (discarded), or a bare atom. Whitespace and commas separate
//! tokens and are never tokens themselves.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Quoting markers
    Quote,         // '
    QuasiQuote,    // `
    Unquote,       // ~
    SpliceUnquote, // ~@
    Meta,          // ^
    Deref,         // @

    /// Double-quoted string lexeme, carried raw (quotes and escapes
    /// included, nothing decoded)
    Str(String),
    /// Bare atom: a maximal run of non-separator, non-delimiter characters
    Atom(String),

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::QuasiQuote => write!(f, "`"),
            Token::Unquote => write!(f, "~"),
            Token::SpliceUnquote => write!(f, "~@"),
            Token::Meta => write!(f, "^"),
            Token::Deref => write!(f, "@"),
            Token::Str(s) => write!(f, "{}", s),
            Token::Atom(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone)]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for LexerError {}

/// A token together with the source position it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            // Delimiters
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            ']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            '{' => {
                self.advance();
                Ok(Token::LBrace)
            }
            '}' => {
                self.advance();
                Ok(Token::RBrace)
            }

            // Quoting markers
            '\'' => {
                self.advance();
                Ok(Token::Quote)
            }
            '`' => {
                self.advance();
                Ok(Token::QuasiQuote)
            }
            '~' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::SpliceUnquote)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '^' => {
                self.advance();
                Ok(Token::Meta)
            }
            '@' => {
                self.advance();
                Ok(Token::Deref)
            }

            // String
            '"' => self.read_string(),

            // Atom
            _ if is_atom_char(c) => Ok(self.read_atom()),

            _ => Err(self.error(format!("Unexpected character: '{}'", c))),
        }
    }

    /// Collect all tokens with their positions into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let line = self.line;
            let column = self.column;
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(SpannedToken {
                token,
                line,
                column,
            });
        }
        Ok(tokens)
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.advance();
                }
                Some(';') => {
                    // Skip to end of line
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Read a string lexeme verbatim. Backslash escapes are honoured only so
    /// that an escaped quote does not terminate the token; nothing is
    /// decoded and the surrounding quotes are kept.
    fn read_string(&mut self) -> Result<Token, LexerError> {
        let mut raw = String::new();
        self.advance(); // consume opening "
        raw.push('"');

        loop {
            match self.advance() {
                Some('"') => {
                    raw.push('"');
                    break;
                }
                Some('\\') => {
                    raw.push('\\');
                    match self.advance() {
                        Some(c) => raw.push(c),
                        None => return Err(self.error("Unterminated string".to_string())),
                    }
                }
                Some(c) => raw.push(c),
                None => return Err(self.error("Unterminated string".to_string())),
            }
        }

        Ok(Token::Str(raw))
    }

    fn read_atom(&mut self) -> Token {
        let mut name = String::new();

        while let Some(c) = self.peek() {
            if is_atom_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        Token::Atom(name)
    }
}

/// Check if a character can appear in a bare atom.
///
/// `~`, `^` and `@` are structural only at a token start; mid-atom they are
/// ordinary characters.
fn is_atom_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            ',' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' | '`' | ';'
        )
}

// ============================================================================
// Tests
// ============================================================================

//! Byte-level tokenizer for MIB documents.
//!
//! Comments (`--` to end of line or to the next `--`) and whitespace are
//! dropped. Quoted strings may span lines. The token stream always ends with
//! a single [`TokenKind::Eof`].

use eyre::{Result, bail};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword: letters, digits, `-` and `_`.
    Ident,
    Number,
    /// Quoted string, or a `'...'H` / `'...'B` literal.
    Text,
    /// `::=`
    Assign,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Pipe,
    Dot,
    DotDot,
    Minus,
    /// Any other single byte.
    Other,
    Eof,
}

/// A token borrowing its text from the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    /// 1-based line the token starts on.
    pub line: u32,
}

impl Token<'_> {
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
    line: u32,
}

/// Tokenize a whole document.
///
/// # Errors
///
/// Fails on an unterminated quoted string or binary/hex literal.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
    };

    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

impl<'src> Lexer<'src> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn token(&self, kind: TokenKind, start: usize, line: u32) -> Token<'src> {
        Token {
            kind,
            text: &self.source[start..self.pos],
            line,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | b'\x0c') => {
                    self.advance();
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => self.skip_comment(),
                _ => return,
            }
        }
    }

    fn skip_comment(&mut self) {
        self.pos += 2;
        while let Some(b) = self.peek() {
            match b {
                b'\n' | b'\r' => return,
                b'-' if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Token<'src>> {
        self.skip_trivia();

        let start = self.pos;
        let line = self.line;
        let Some(b) = self.advance() else {
            return Ok(self.token(TokenKind::Eof, start, line));
        };

        let kind = match b {
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'|' => TokenKind::Pipe,
            b'-' => TokenKind::Minus,
            b'.' if self.peek() == Some(b'.') => {
                self.advance();
                TokenKind::DotDot
            }
            b'.' => TokenKind::Dot,
            b':' if self.peek() == Some(b':') && self.peek_at(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Assign
            }
            b'"' => {
                self.scan_until(b'"', line, "string")?;
                TokenKind::Text
            }
            b'\'' => {
                self.scan_until(b'\'', line, "binary or hex literal")?;
                if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                    self.advance();
                }
                TokenKind::Text
            }
            b if b.is_ascii_digit() => {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
                TokenKind::Number
            }
            b if b.is_ascii_alphabetic() => {
                self.scan_identifier();
                TokenKind::Ident
            }
            _ => {
                // `advance` consumed one byte; finish a multi-byte character
                let width = self.source[start..].chars().next().map_or(1, char::len_utf8);
                self.pos = start + width;
                TokenKind::Other
            }
        };

        Ok(self.token(kind, start, line))
    }

    fn scan_identifier(&mut self) {
        while let Some(c) = self.peek() {
            let continues = c.is_ascii_alphanumeric()
                || c == b'_'
                || (c == b'-' && self.peek_at(1) != Some(b'-'));
            if !continues {
                break;
            }
            self.advance();
        }
    }

    fn scan_until(&mut self, close: u8, line: u32, what: &str) -> Result<()> {
        loop {
            match self.advance() {
                Some(c) if c == close => return Ok(()),
                Some(_) => {}
                None => bail!("unterminated {what} starting on line {line}"),
            }
        }
    }
}

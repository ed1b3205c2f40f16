//! Outline compiler.
//!
//! Recognized top-level forms inside `NAME DEFINITIONS ::= BEGIN ... END`:
//!
//! ```text
//! IMPORTS sym, sym FROM MOD-A sym FROM MOD-B ;
//! EXPORTS ... ;
//! NAME MACRO ::= BEGIN ... END
//! name OBJECT IDENTIFIER ::= { parent 1 }
//! name <MACRO> clauses... ::= { parent 1 }
//! name TRAP-TYPE ENTERPRISE parent ... ::= 1
//! ```
//!
//! Anything else (type assignments, textual conventions) is skipped.

use std::path::Path;

use eyre::{Result, WrapErr, bail};
use mibgen_codegen::{Diagnostic, DiagnosticSource, DocumentCompiler};
use mibgen_ir::{Entity, EntityKind, Import, InputDocument, ModuleObject, Status};
use tracing::debug;

use crate::lexer::{Token, TokenKind, tokenize};

/// [`DocumentCompiler`] that extracts module outlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineCompiler;

impl OutlineCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCompiler for OutlineCompiler {
    fn compile(
        &self,
        document: &InputDocument,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ModuleObject>> {
        let tokens = tokenize(document.content())
            .wrap_err_with(|| format!("cannot tokenize {}", document.path().display()))?;

        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            path: document.path(),
            diagnostics,
        };
        let modules = parser.modules()?;

        debug!(
            document = %document.path().display(),
            modules = modules.len(),
            "outlined document"
        );
        Ok(modules)
    }
}

struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
    path: &'a Path,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'src> Parser<'_, 'src> {
    fn peek_at(&self, offset: usize) -> Token<'src> {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[(self.pos + offset).min(last)]
    }

    fn peek(&self) -> Token<'src> {
        self.peek_at(0)
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn location(&self, line: u32) -> String {
        format!("{}:{}", self.path.display(), line)
    }

    fn warn(&mut self, line: u32, message: String) {
        let diagnostic =
            Diagnostic::warning(DiagnosticSource::Compiler, message).at(self.location(line));
        self.diagnostics.push(diagnostic);
    }

    /// Skip a balanced `{ ... }` group starting at the current `{`.
    fn skip_group(&mut self) {
        let mut depth = 0usize;
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::Eof => return,
                _ => {}
            }
        }
    }

    fn skip_past(&mut self, kind: TokenKind) {
        while !self.at_eof() && self.advance().kind != kind {}
    }

    fn modules(&mut self) -> Result<Vec<ModuleObject>> {
        let mut modules = Vec::new();

        while let Some(name) = self.find_header() {
            modules.push(self.module_body(name)?);
        }

        if modules.is_empty() {
            bail!("no module header (NAME DEFINITIONS ::= BEGIN) found");
        }
        Ok(modules)
    }

    /// Advance past the next `NAME [{...}] DEFINITIONS ::= BEGIN`.
    fn find_header(&mut self) -> Option<&'src str> {
        while !self.at_eof() {
            let name = self.peek();
            if name.kind == TokenKind::Ident {
                let mut offset = 1;
                if self.peek_at(1).kind == TokenKind::LBrace {
                    let save = self.pos;
                    self.pos += 1;
                    self.skip_group();
                    offset = self.pos - save;
                    self.pos = save;
                }
                if self.peek_at(offset).is_ident("DEFINITIONS") {
                    let mut cursor = offset + 1;
                    // SMIv1 tagging defaults: `DEFINITIONS IMPLICIT TAGS ::=`
                    while self.peek_at(cursor).kind == TokenKind::Ident
                        && !self.peek_at(cursor).is_ident("BEGIN")
                    {
                        cursor += 1;
                    }
                    if self.peek_at(cursor).kind == TokenKind::Assign
                        && self.peek_at(cursor + 1).is_ident("BEGIN")
                    {
                        self.pos += cursor + 2;
                        return Some(name.text);
                    }
                }
            }
            self.advance();
        }
        None
    }

    fn module_body(&mut self, name: &str) -> Result<ModuleObject> {
        let mut module = ModuleObject::new(name, self.path);

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => bail!("module {name} is missing END"),
                TokenKind::LBrace => self.skip_group(),
                TokenKind::Ident if token.text == "END" => {
                    self.advance();
                    return Ok(module);
                }
                TokenKind::Ident if token.text == "IMPORTS" => {
                    self.advance();
                    self.imports(&mut module);
                }
                TokenKind::Ident if token.text == "EXPORTS" => self.skip_past(TokenKind::Semicolon),
                TokenKind::Ident if self.peek_at(1).is_ident("MACRO") => self.skip_macro(),
                TokenKind::Ident => {
                    if let Some(entity) = self.definition() {
                        module.entities.push(entity);
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn imports(&mut self, module: &mut ModuleObject) {
        let mut pending = Vec::new();
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::Semicolon | TokenKind::Eof => break,
                TokenKind::Ident if token.text == "FROM" => {
                    let source = self.advance();
                    if source.kind != TokenKind::Ident {
                        self.warn(source.line, "expected module name after FROM".into());
                        continue;
                    }
                    for symbol in pending.drain(..) {
                        module.imports.push(Import::new(symbol, source.text));
                    }
                    // SMIv1 allows an OID after the module reference.
                    if self.peek().kind == TokenKind::LBrace {
                        self.skip_group();
                    }
                }
                TokenKind::Ident => pending.push(token.text),
                _ => {}
            }
        }
        if !pending.is_empty() {
            let line = self.peek().line;
            self.warn(line, format!("imported symbols without FROM: {}", pending.join(", ")));
        }
    }

    fn skip_macro(&mut self) {
        while !self.at_eof() && !self.advance().is_ident("END") {}
    }

    /// Parse the definition starting at the current identifier, if it is an
    /// entity. Always consumes at least one token.
    fn definition(&mut self) -> Option<Entity> {
        let name = self.advance();
        let next = self.peek();

        if next.is_ident("OBJECT")
            && self.peek_at(1).is_ident("IDENTIFIER")
            && self.peek_at(2).kind == TokenKind::Assign
        {
            self.pos += 3;
            let mut entity = Entity::new(name.text, EntityKind::ObjectIdentifier);
            self.oid_value(&mut entity, name.line);
            return Some(entity);
        }

        let kind = match next.kind {
            TokenKind::Ident => EntityKind::from_macro(next.text)?,
            _ => return None,
        };
        self.advance();

        let mut entity = Entity::new(name.text, kind);
        let mut enterprise = None;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Assign => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => return None,
                TokenKind::LBrace => self.skip_group(),
                TokenKind::Ident if token.text == "END" => return None,
                TokenKind::Ident => {
                    self.advance();
                    let value = self.peek();
                    match token.text {
                        "STATUS" if entity.status.is_none() => {
                            entity.status = Status::parse(value.text);
                        }
                        "MAX-ACCESS" | "ACCESS" if entity.access.is_none() => {
                            entity.access = Some(value.text.to_string());
                        }
                        "SYNTAX" if entity.syntax.is_none() => {
                            entity.syntax = Some(value.text.to_string());
                        }
                        "ENTERPRISE" if enterprise.is_none() => {
                            enterprise = Some(value.text.to_string());
                        }
                        _ => {}
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }

        if kind == EntityKind::TrapType {
            let value = self.advance();
            entity.parent = enterprise;
            match value.text.parse::<u32>() {
                Ok(n) if value.kind == TokenKind::Number => entity.sub_id = Some(n),
                _ => self.warn(
                    value.line,
                    format!("cannot read trap number of {}", entity.name),
                ),
            }
        } else {
            self.oid_value(&mut entity, name.line);
        }
        Some(entity)
    }

    /// Read `{ parent ... n }` into the entity.
    fn oid_value(&mut self, entity: &mut Entity, line: u32) {
        if self.peek().kind != TokenKind::LBrace {
            self.warn(line, format!("cannot read OID value of {}", entity.name));
            return;
        }
        self.advance();

        let mut components: Vec<(Option<&str>, Option<u32>)> = Vec::new();
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    self.warn(line, format!("unterminated OID value of {}", entity.name));
                    return;
                }
                TokenKind::Number => components.push((None, token.text.parse().ok())),
                TokenKind::Ident => {
                    // `name(n)` form
                    if self.peek().kind == TokenKind::LParen
                        && self.peek_at(1).kind == TokenKind::Number
                        && self.peek_at(2).kind == TokenKind::RParen
                    {
                        let number = self.peek_at(1).text.parse().ok();
                        self.pos += 3;
                        components.push((Some(token.text), number));
                    } else {
                        components.push((Some(token.text), None));
                    }
                }
                _ => {}
            }
        }

        entity.parent = match components.first() {
            Some((Some(first), _)) => Some((*first).to_string()),
            _ => None,
        };
        entity.sub_id = match components.last() {
            Some((_, Some(n))) if components.len() > 1 || entity.parent.is_none() => Some(*n),
            _ => None,
        };
        if entity.sub_id.is_none() {
            self.warn(line, format!("cannot read OID value of {}", entity.name));
        }
    }
}

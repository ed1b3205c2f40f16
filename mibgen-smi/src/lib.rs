//! Outline SMI compiler for mibgen.
//!
//! Extracts module names, imports and OID-bearing definitions from SMIv1 and
//! SMIv2 MIB documents. It does not type-check definitions; it recovers
//! exactly the structure the generation pipeline consumes.

mod compiler;
mod lexer;

pub use compiler::OutlineCompiler;
pub use lexer::{Token, TokenKind, tokenize};

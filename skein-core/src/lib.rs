//! Skein Core - scanner, parser, printer and module transform (pure logic, no IO)
//!
//! Turns one JavaScript source file into a registry fragment:
//! scan → parse → rewrite imports/exports → print.
//! Only operates on in-memory data; reading files and assembling the bundle
//! happen in `skein-api`.

pub mod compiler;

// Re-export common types
pub use compiler::lexer::{tokenize, Token, TokenKind};
pub use compiler::module::{
    asset_file_name, entry_identity, is_asset, load_file, mangle, quote, resolve, transform,
    LoadedModule, TransformOutput,
};
pub use compiler::parser::{parse, Node, NodeFlags, NodeKind, ParserError, ParserErrorKind};
pub use compiler::printer::print;

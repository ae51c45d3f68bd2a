//! The lattice AST database: an external-tokenizer boundary, a columnar
//! content-addressed store of parsed Units, and the parser that fills it.

pub mod astdb;
pub mod parser;
pub mod tokenizer;

pub use astdb::{AstDb, AstKind, AstToken, NodeKind, NodeRecord, Snapshot, Unit};
pub use tokenizer::{lex, SourceKind, SourceToken};

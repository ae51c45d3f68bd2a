//! The AST Database (§3, §4.1-§4.3): columnar, content-addressed storage of
//! parsed Units, reached through immutable snapshots.

mod db;
mod node;
mod snapshot;
mod token;
mod token_mapper;
mod unit;

pub use db::AstDb;
pub use node::{NodeKind, NodeRecord};
pub use snapshot::Snapshot;
pub use token::{AstKind, AstToken};
pub use token_mapper::map_tokens;
pub use unit::{Unit, UnitBuilder};

//! Shared primitives for the `lattice` compiler front-end: opaque
//! identifiers, a string interner, source spans, the diagnostic engine,
//! profile gates, and the boundary contracts §6 hands to/from the Effect
//! System and Comptime VM collaborators.
//!
//! Everything here is deliberately inert data and bookkeeping — no parsing,
//! no dispatch. `lattice-syntax` and `lattice-dispatch` build on top of it.

pub mod contracts;
pub mod diagnostics;
pub mod error;
pub mod ids;
pub mod interner;
pub mod profile;
pub mod span;

pub use diagnostics::{Code, Diagnostic, Diagnostics, DiagnosticsPrinter, Fix, Producer, Severity};
pub use error::{Error, Result};
pub use ids::{ChildRange, DeclId, EdgeIndex, FunctionId, ModuleId, MonomorphizationId, NodeId, TokenId, TypeId, UnitId};
pub use interner::{Interner, StrId};
pub use profile::{Gate, GateGuard, GateStack, Profile};
pub use span::{Position, Span};

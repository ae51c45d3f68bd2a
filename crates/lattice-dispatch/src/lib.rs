//! Multiple-dispatch semantic resolution: type registry, signature and
//! specificity analysis, conversion costs, lexical scoping, the four-phase
//! semantic resolver, cross-module dispatch with hot reload, generic
//! monomorphization, and a compressed dispatch table.

pub mod compress;
pub mod conversion;
pub mod generic;
pub mod module_dispatcher;
pub mod resolver;
pub mod scope;
pub mod signature;
pub mod specificity;
pub mod types;

pub use compress::{compress, dump_table, CompressedDispatchTable, DispatchEntry};
pub use conversion::ConversionRegistry;
pub use generic::{GenericDispatcher, MonomorphizationKey};
pub use module_dispatcher::{CallSiteDigest, ConsistencyReport, ModuleDispatcher};
pub use resolver::SemanticResolver;
pub use scope::ScopeManager;
pub use signature::{FunctionFamily, Signature, SignatureRegistry};
pub use specificity::{SpecificityAnalyzer, SpecificityOrdering};
pub use types::{TypeRegistry, TypeRelation};

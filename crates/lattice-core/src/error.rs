//! Shared error kinds (§7), the way `plotnik_lib::Error` centralizes the
//! fatal errors every stage of the teacher's pipeline can raise.

/// Errors that abort the current operation outright rather than being
/// reported as a per-call-site diagnostic (§7: "`OutOfMemory` and
/// `UnitCreationFailed` are fatal to the current operation").
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("unit creation failed: {0}")]
    UnitCreationFailed(String),

    #[error("out of memory")]
    OutOfMemory,

    #[error("{0}")]
    ContractViolation(#[from] crate::contracts::ContractViolation),
}

pub type Result<T> = std::result::Result<T, Error>;

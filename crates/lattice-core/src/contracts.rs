//! Boundary schemas for the core's external collaborators (§6, Contracts
//! §2 "Input/output boundary schemas for the above").
//!
//! The Effect System and Comptime VM are separate collaborators; the parser
//! only needs to emit/consume these contract shapes, validated at the
//! boundary per §7's validation rules. Structs derive `serde` the way
//! `plotnik-core`'s `RawNode`/`RawCardinality` deserialization layer does,
//! since these contracts are expected to cross a process or FFI boundary.

use serde::{Deserialize, Serialize};

use crate::ids::{DeclId, NodeId};
use crate::interner::StrId;
use crate::span::Span;

/// Maximum parameter list length accepted by an Effect System contract (§6).
pub const MAX_EFFECT_PARAMETERS: usize = 100;

/// Maximum dependency list length accepted by a Comptime VM contract (§6).
pub const MAX_COMPTIME_DEPENDENCIES: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectParameter {
    pub name: StrId,
    pub type_info: StrId,
    pub is_capability: bool,
}

/// Effect System Input Contract (§6), produced by the Parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSystemInput {
    pub decl_id: DeclId,
    pub function_name: StrId,
    pub function_node: NodeId,
    pub parameters: Vec<EffectParameter>,
    pub return_type: Option<StrId>,
    pub source_span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectValidationErrorKind {
    InvalidEffect,
    MissingCapability,
    TypeMismatch,
    UnsupportedFeature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectValidationError {
    pub kind: EffectValidationErrorKind,
    pub message: String,
    pub span: Span,
}

/// Effect System Output Contract (§6), consumed by the Parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSystemOutput {
    pub success: bool,
    pub detected_effects: Vec<StrId>,
    pub required_capabilities: Vec<StrId>,
    pub validation_errors: Vec<EffectValidationError>,
}

/// Validation error describing a contract that violates §7's "a failed
/// contract must carry >=1 error; a successful one must carry 0" rule, or
/// that exceeds a length cap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("successful effect contract carries {0} validation error(s), expected 0")]
    SuccessWithErrors(usize),
    #[error("failed effect contract carries 0 validation errors, expected at least 1")]
    FailureWithNoErrors,
    #[error("effect contract has {0} parameters, exceeding the cap of {MAX_EFFECT_PARAMETERS}")]
    TooManyParameters(usize),
    #[error("comptime contract has {0} dependencies, exceeding the cap of {MAX_COMPTIME_DEPENDENCIES}")]
    TooManyDependencies(usize),
}

impl EffectSystemInput {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.parameters.len() > MAX_EFFECT_PARAMETERS {
            return Err(ContractViolation::TooManyParameters(self.parameters.len()));
        }
        Ok(())
    }
}

impl EffectSystemOutput {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.success && !self.validation_errors.is_empty() {
            return Err(ContractViolation::SuccessWithErrors(self.validation_errors.len()));
        }
        if !self.success && self.validation_errors.is_empty() {
            return Err(ContractViolation::FailureWithNoErrors);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComptimeExpressionKind {
    ConstDeclaration,
    ComptimeFunctionCall,
    TypeExpression,
    CompileTimeConstant,
}

/// Comptime VM Input Contract (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComptimeVmInput {
    pub decl_id: DeclId,
    pub expression_name: StrId,
    pub expression_node: NodeId,
    pub expression_type: ComptimeExpressionKind,
    pub dependencies: Vec<NodeId>,
    pub source_span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComptimeEvaluationErrorKind {
    UndefinedIdentifier,
    TypeMismatch,
    InfiniteRecursion,
    UnsupportedOperation,
    DependencyCycle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComptimeEvaluationError {
    pub kind: ComptimeEvaluationErrorKind,
    pub message: String,
    pub span: Span,
}

/// Comptime VM Output Contract (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComptimeVmOutput {
    pub success: bool,
    pub result_value: Option<String>,
    pub result_type: Option<StrId>,
    pub should_cache: bool,
    pub evaluation_errors: Vec<ComptimeEvaluationError>,
}

impl ComptimeVmInput {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.dependencies.len() > MAX_COMPTIME_DEPENDENCIES {
            return Err(ContractViolation::TooManyDependencies(self.dependencies.len()));
        }
        Ok(())
    }
}

impl ComptimeVmOutput {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.success && !self.evaluation_errors.is_empty() {
            return Err(ContractViolation::SuccessWithErrors(self.evaluation_errors.len()));
        }
        if !self.success && self.evaluation_errors.is_empty() {
            return Err(ContractViolation::FailureWithNoErrors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::empty(crate::span::Position::new(0, 1, 1))
    }

    #[test]
    fn successful_effect_output_must_carry_no_errors() {
        let out = EffectSystemOutput {
            success: true,
            detected_effects: vec![],
            required_capabilities: vec![],
            validation_errors: vec![EffectValidationError {
                kind: EffectValidationErrorKind::InvalidEffect,
                message: "bad".into(),
                span: span(),
            }],
        };
        assert!(out.validate().is_err());
    }

    #[test]
    fn failed_effect_output_must_carry_an_error() {
        let out = EffectSystemOutput {
            success: false,
            detected_effects: vec![],
            required_capabilities: vec![],
            validation_errors: vec![],
        };
        assert!(out.validate().is_err());
    }

    #[test]
    fn parameter_cap_is_enforced() {
        let input = EffectSystemInput {
            decl_id: DeclId::new(0),
            function_name: StrId::EMPTY,
            function_node: NodeId::new(0),
            parameters: vec![
                EffectParameter {
                    name: StrId::EMPTY,
                    type_info: StrId::EMPTY,
                    is_capability: false,
                };
                MAX_EFFECT_PARAMETERS + 1
            ],
            return_type: None,
            source_span: span(),
        };
        assert!(input.validate().is_err());
    }
}

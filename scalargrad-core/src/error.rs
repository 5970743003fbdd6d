use thiserror::Error;

/// Custom error type for the ScalarGrad engine.
///
/// Every failure is raised synchronously while the offending operation is
/// being constructed (forward time), never during the backward pass.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ScalarGradError {
    #[error("Invalid operand for operation '{operation}': {reason}")]
    InvalidOperand { operation: String, reason: String },

    #[error("Division by zero during operation '{operation}'")]
    DivisionByZero { operation: String },

    #[error("Operation '{operation}' requires a non-empty input sequence")]
    EmptyInput { operation: String },
}

//! Runtime error taxonomy.
//!
//! Factory functions are the public constructors; variants stay matchable
//! so hosts can tell a reset request from an ordinary failure.

use std::fmt;

use thiserror::Error;

use crate::TypeTag;

/// Result of a runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Intent raised by a host function rather than a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostSignal {
    /// The cartridge asked the machine to restart.
    Reset,
}

impl fmt::Display for HostSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostSignal::Reset => f.write_str("machine has been restarted"),
        }
    }
}

/// Errors raised while running compiled code or host functions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A value could not be converted to the type an operator requires.
    #[error("cannot coerce {found} to {expected}")]
    Coercion {
        found: TypeTag,
        expected: &'static str,
    },

    /// Relational operator on mismatched or unordered types.
    #[error("cannot compare {left} with {right} using `{op}`")]
    Comparison {
        op: &'static str,
        left: TypeTag,
        right: TypeTag,
    },

    /// Operation not supported on a value (length of a number, call of nil).
    #[error("{0}")]
    Type(String),

    /// Argument or state error raised by a host library function.
    #[error("{function}: {message}")]
    Library { function: String, message: String },

    #[error("call depth exceeded {limit} frames")]
    StackOverflow { limit: usize },

    #[error("{0}")]
    Signal(HostSignal),
}

impl RuntimeError {
    /// The host signal carried by this error, if any.
    pub fn signal(&self) -> Option<HostSignal> {
        match self {
            RuntimeError::Signal(signal) => Some(*signal),
            _ => None,
        }
    }
}

/// A value could not be coerced.
#[cold]
pub fn coercion(found: TypeTag, expected: &'static str) -> RuntimeError {
    RuntimeError::Coercion { found, expected }
}

/// Relational operator applied to incompatible operands.
#[cold]
pub fn comparison(op: &'static str, left: TypeTag, right: TypeTag) -> RuntimeError {
    RuntimeError::Comparison { op, left, right }
}

#[cold]
pub fn type_error(message: impl Into<String>) -> RuntimeError {
    RuntimeError::Type(message.into())
}

/// Error raised by a host function, tagged with its global name.
#[cold]
pub fn library(function: impl Into<String>, message: impl Into<String>) -> RuntimeError {
    RuntimeError::Library {
        function: function.into(),
        message: message.into(),
    }
}

#[cold]
pub fn stack_overflow(limit: usize) -> RuntimeError {
    RuntimeError::StackOverflow { limit }
}

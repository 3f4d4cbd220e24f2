//! Error types for marshaling, calls and state management
//!
//! Every failure leaves the runtime stack at the depth it had before the
//! failing operation started.

use crate::interop::{CallStatus, ValueKind};
use std::fmt;

/// What went wrong while converting a single slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarshalErrorKind {
    TypeMismatch {
        expected: &'static str,
        found: ValueKind,
    },
    InvalidUtf8,
}

/// A slot did not hold a value of the type the host asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalError {
    /// Stack index that was read, as passed to the reader
    pub index: i32,
    pub kind: MarshalErrorKind,
}

impl MarshalError {
    pub fn type_mismatch(index: i32, expected: &'static str, found: ValueKind) -> Self {
        Self {
            index,
            kind: MarshalErrorKind::TypeMismatch { expected, found },
        }
    }

    pub fn invalid_utf8(index: i32) -> Self {
        Self {
            index,
            kind: MarshalErrorKind::InvalidUtf8,
        }
    }
}

impl fmt::Display for MarshalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MarshalErrorKind::TypeMismatch { expected, found } => write!(
                f,
                "Type mismatch at stack index {}: expected {}, found {}",
                self.index, expected, found
            ),
            MarshalErrorKind::InvalidUtf8 => {
                write!(f, "String at stack index {} is not valid UTF-8", self.index)
            }
        }
    }
}

impl std::error::Error for MarshalError {}

/// Failure of a single invocation through a callable handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// A result did not match the handle's type signature
    Marshal(MarshalError),
    /// The protected call reported a non-zero status
    Script { function: String, status: CallStatus },
    /// The runtime could not make room for the function, its arguments or
    /// its results
    StackExhausted { function: String, needed: i32 },
    /// The stack depth after the call differed from the depth before it
    Unbalanced {
        function: String,
        expected: i32,
        found: i32,
    },
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marshal(err) => write!(f, "Bad result: {}", err),
            Self::Script { function, status } => {
                write!(f, "Call to '{}' failed: {}", function, status)
            }
            Self::StackExhausted { function, needed } => write!(
                f,
                "No room on the stack to call '{}': {} slots needed",
                function, needed
            ),
            Self::Unbalanced {
                function,
                expected,
                found,
            } => write!(
                f,
                "Stack unbalanced after calling '{}': expected depth {}, found {}",
                function, expected, found
            ),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Marshal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MarshalError> for CallError {
    fn from(err: MarshalError) -> Self {
        Self::Marshal(err)
    }
}

/// Failure reading or assigning a global variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalError {
    Marshal(MarshalError),
    /// No free slot to stage the value in
    StackExhausted { name: String },
}

impl fmt::Display for GlobalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marshal(err) => write!(f, "Bad global: {}", err),
            Self::StackExhausted { name } => {
                write!(f, "No room on the stack to access global '{}'", name)
            }
        }
    }
}

impl std::error::Error for GlobalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Marshal(err) => Some(err),
            Self::StackExhausted { .. } => None,
        }
    }
}

impl From<MarshalError> for GlobalError {
    fn from(err: MarshalError) -> Self {
        Self::Marshal(err)
    }
}

/// Failure creating a state or running a chunk in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The allocator could not create a new state
    Alloc,
    /// The chunk failed to compile
    Load { status: CallStatus },
    /// The chunk compiled but raised an error
    Run { status: CallStatus },
    /// No free slot for the compiled chunk
    StackExhausted,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc => write!(f, "Could not allocate a Lua state"),
            Self::Load { status } => write!(f, "Chunk failed to load: {}", status),
            Self::Run { status } => write!(f, "Chunk failed to run: {}", status),
            Self::StackExhausted => write!(f, "No room on the stack to load a chunk"),
        }
    }
}

impl std::error::Error for StateError {}

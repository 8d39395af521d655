//! Errors raised by the host while a contract runs.

use crate::ReturnCode;

/// A host-level abort. The running invocation stops immediately, produces no return data and
/// fails with [`HostError::return_code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The caller supplied fewer arguments than the contract reads.
    #[error("argument index {index} out of range, the call has {count} arguments")]
    ArgumentOutOfRange {
        /// The requested argument position
        index: usize,
        /// The number of arguments supplied with the call
        count: usize,
    },
    /// An argument does not fit the destination the contract provided.
    #[error("argument {index} is {length} bytes long, destination holds {capacity}")]
    ArgumentTooLong {
        /// The argument position
        index: usize,
        /// The argument length
        length: usize,
        /// The destination capacity
        capacity: usize,
    },
    /// A stored value does not fit the destination the contract provided.
    #[error("stored value is {length} bytes long, destination holds {capacity}")]
    StorageValueTooLong {
        /// The stored value length
        length: usize,
        /// The destination capacity
        capacity: usize,
    },
    /// The endpoint name is malformed or reserved by the platform.
    #[error("invalid function name: {0}")]
    InvalidFunctionName(String),
    /// The contract does not expose the endpoint.
    #[error("function not found: {0}")]
    FunctionNotFound(String),
    /// The executing account does not exist in the world.
    #[error("contract not found at {0}")]
    ContractNotFound(alloy_primitives::B256),
}

impl HostError {
    /// The return code the invocation fails with.
    pub const fn return_code(&self) -> ReturnCode {
        match self {
            Self::ArgumentOutOfRange { .. } |
            Self::ArgumentTooLong { .. } |
            Self::StorageValueTooLong { .. } => ReturnCode::ExecutionFailed,
            Self::InvalidFunctionName(_) | Self::FunctionNotFound(_) => {
                ReturnCode::FunctionNotFound
            }
            Self::ContractNotFound(_) => ReturnCode::ContractNotFound,
        }
    }
}

/// Result type of host operations.
pub type HostResult<T> = Result<T, HostError>;

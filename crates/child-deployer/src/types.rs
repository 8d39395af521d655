use alloy_primitives::{Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::constants::VALUE_LEN;

/// Application-level key under which the deployer contract keeps a bytecode blob in its own
/// storage. It is unrelated to the platform's account addresses.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Into,
    derive_more::Display,
)]
pub struct ContractId(u8);

impl ContractId {
    /// Creates a contract ID from its raw byte.
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Returns the storage key the bytecode is kept under.
    pub const fn storage_key(self) -> [u8; 1] {
        [self.0]
    }
}

/// Encodes a native-currency amount as the 32-byte big-endian value handed to the host.
pub fn encode_value(value: U256) -> [u8; VALUE_LEN] {
    value.to_be_bytes::<VALUE_LEN>()
}

/// Ordered constructor arguments for a child contract.
///
/// The buffers and their lengths are kept side by side, in the shape the host expects. Both
/// sequences grow together, so they always have the same arity and every length matches its
/// buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitArguments {
    lengths: Vec<usize>,
    buffers: Vec<Bytes>,
}

impl InitArguments {
    /// Creates an empty argument set.
    pub const fn new() -> Self {
        Self { lengths: Vec::new(), buffers: Vec::new() }
    }

    /// Creates an argument set holding a single one-byte argument.
    pub fn single_byte(byte: u8) -> Self {
        let mut arguments = Self::new();
        arguments.push([byte]);
        arguments
    }

    /// Appends an argument.
    pub fn push(&mut self, argument: impl AsRef<[u8]>) {
        let argument = Bytes::copy_from_slice(argument.as_ref());
        self.lengths.push(argument.len());
        self.buffers.push(argument);
    }

    /// Appends an argument, builder style.
    pub fn with(mut self, argument: impl AsRef<[u8]>) -> Self {
        self.push(argument);
        self
    }

    /// Number of arguments.
    pub fn count(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` when there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Argument lengths, in argument order.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Argument buffers, in argument order.
    pub fn buffers(&self) -> &[Bytes] {
        &self.buffers
    }

    /// All arguments concatenated, the way they sit in contract memory.
    pub fn concatenated(&self) -> Vec<u8> {
        self.buffers.iter().flat_map(|buffer| buffer.iter().copied()).collect()
    }
}

/// What a completed `deployChildContract` invocation reports to a Rust caller. The same facts are
/// observable positionally through the finish sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Number of bytecode bytes loaded from storage.
    pub loaded_length: usize,
    /// Result code of the creation request, as returned by the host. `None` when creation was
    /// never requested.
    pub result_code: Option<i32>,
    /// Address of the new child contract. Only set when the creation succeeded.
    pub new_address: Option<B256>,
}

impl DeployOutcome {
    /// Returns `true` if a child contract was created.
    pub const fn is_success(&self) -> bool {
        matches!(self.result_code, Some(0))
    }
}

/// Result codes of the execution platform. Code `0` is success, everything else is a failure
/// reported by the host.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[repr(i32)]
pub enum ReturnCode {
    /// Execution finished normally.
    #[default]
    Ok = 0,
    /// The called endpoint does not exist.
    FunctionNotFound = 1,
    /// The called endpoint has the wrong signature.
    FunctionWrongSignature = 2,
    /// The contract or the code to deploy could not be found.
    ContractNotFound = 3,
    /// The contract signalled an error.
    UserError = 4,
    /// Execution ran out of gas.
    OutOfGas = 5,
    /// The target address already holds an account with code.
    AccountCollision = 6,
    /// The sender cannot cover the transferred value.
    OutOfFunds = 7,
    /// Too many nested calls.
    CallStackOverFlow = 8,
    /// The code is not a valid contract.
    ContractInvalid = 9,
    /// Execution was aborted by the host.
    ExecutionFailed = 10,
}

impl ReturnCode {
    /// Returns `true` for [`ReturnCode::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Numeric value of the code.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<ReturnCode> for i32 {
    fn from(value: ReturnCode) -> Self {
        value.code()
    }
}

impl TryFrom<i32> for ReturnCode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Ok,
            1 => Self::FunctionNotFound,
            2 => Self::FunctionWrongSignature,
            3 => Self::ContractNotFound,
            4 => Self::UserError,
            5 => Self::OutOfGas,
            6 => Self::AccountCollision,
            7 => Self::OutOfFunds,
            8 => Self::CallStackOverFlow,
            9 => Self::ContractInvalid,
            10 => Self::ExecutionFailed,
            other => return Err(other),
        })
    }
}

//! Constants for the child-contract deployment fixture.
//!
//! The values mirror the reference fixture: a 5000-byte bytecode buffer, a deployment value of
//! 42 and 32-byte account addresses.

/// Name of the deployment endpoint exposed by the deployer contract.
pub const DEPLOY_CHILD_CONTRACT: &str = "deployChildContract";

/// Position of the contract ID among the call arguments.
pub const CONTRACT_ID_ARGUMENT: usize = 0;

/// Position of the byte forwarded to the child constructor.
pub const INIT_BYTE_ARGUMENT: usize = 1;

/// Capacity of the buffer the stored bytecode is loaded into.
pub const CODE_CAPACITY: usize = 5000;

/// Native-currency amount transferred to every child contract at creation.
pub const DEPLOYMENT_VALUE: u64 = 42;

/// Length of an account address.
pub const ADDRESS_LEN: usize = 32;

/// Length of the big-endian encoding of the deployment value.
pub const VALUE_LEN: usize = 32;

/// Limits on endpoint names, enforced before dispatch.
pub mod function_name {
    /// Names must be strictly shorter than this many bytes.
    pub const MAX_LENGTH: usize = 256;

    /// Names that belong to the platform and can never be called as endpoints.
    pub const RESERVED: &[&str] = &[
        "init",
        "callBack",
        "internalVMErrors",
        "transferValueOnly",
        "writeLog",
        "signalError",
        "completedTxEvent",
    ];
}

/// Finish values written by the status-word outcome encoding.
pub mod status_word {
    /// Creation succeeded.
    pub const SUCCESS: &[u8] = b"succ";
    /// Creation failed with result code 1.
    pub const FAILURE: &[u8] = b"fail";
    /// Any other result code.
    pub const UNKNOWN: &[u8] = b"unkn";
}

/// Header every module accepted by the mock host must start with: the WASM magic followed by
/// version 1.
pub const WASM_HEADER: [u8; 8] = [0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

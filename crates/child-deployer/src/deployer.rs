//! The deployment orchestrator.
//!
//! `deployChildContract` loads a bytecode blob the contract stored earlier, forwards one byte of
//! its own call arguments to the child constructor and asks the host to create the child. It
//! finishes two values, always in this order:
//!
//! 1. the number of bytecode bytes loaded from storage;
//! 2. the creation outcome, encoded per [`OutcomeEncoding`].
//!
//! Creation failures are not errors here: the host's result code is finished verbatim. Only host
//! aborts (missing arguments, oversized stored values) propagate as [`HostError`].
//!
//! [`HostError`]: crate::HostError

use alloy_primitives::B256;
use tracing::{debug, trace, warn};

use crate::{
    codec::status_word,
    constants::{ADDRESS_LEN, CONTRACT_ID_ARGUMENT, INIT_BYTE_ARGUMENT},
    encode_value, ContractId, DeployOutcome, DeploymentPolicy, HostError, HostInterface,
    HostResult, InitArguments, OutcomeEncoding, ReturnCode, StorageMissPolicy,
};

/// A call-scoped buffer of fixed capacity that bytecode is loaded into.
#[derive(Debug)]
pub struct CodeBuffer {
    buf: Box<[u8]>,
    len: usize,
}

impl CodeBuffer {
    /// Allocates a zeroed buffer of the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: vec![0u8; capacity].into_boxed_slice(), len: 0 }
    }

    /// Capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The loaded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Loads the value stored under `key` through the host and returns its length.
    ///
    /// A host reporting more bytes than the buffer holds is an error, not a truncation.
    pub fn load<H: HostInterface + ?Sized>(
        &mut self,
        host: &mut H,
        key: &[u8],
    ) -> HostResult<usize> {
        let len = host.storage_load(key, &mut self.buf)?;
        if len > self.buf.len() {
            return Err(HostError::StorageValueTooLong { length: len, capacity: self.buf.len() });
        }
        self.len = len;
        Ok(len)
    }
}

/// Reads a one-byte call argument.
fn byte_argument<H: HostInterface + ?Sized>(host: &H, index: usize) -> HostResult<u8> {
    let mut byte = [0u8; 1];
    host.get_argument(index, &mut byte)?;
    Ok(byte[0])
}

/// Runs `deployChildContract` against `host`.
pub fn deploy_child_contract<H: HostInterface + ?Sized>(
    host: &mut H,
    policy: &DeploymentPolicy,
) -> HostResult<DeployOutcome> {
    let contract_id = ContractId::new(byte_argument(&*host, CONTRACT_ID_ARGUMENT)?);

    let mut code = CodeBuffer::with_capacity(policy.code_capacity);
    let loaded_length = code.load(host, &contract_id.storage_key())?;
    trace!(target: "child_deployer", %contract_id, loaded_length, "Bytecode loaded");
    host.int64_finish(loaded_length as i64);

    let init_byte = byte_argument(&*host, INIT_BYTE_ARGUMENT)?;

    if loaded_length == 0 && policy.storage_miss == StorageMissPolicy::Guard {
        warn!(target: "child_deployer", %contract_id, "No bytecode stored, skipping creation");
        finish_outcome(host, policy.outcome_encoding, ReturnCode::ContractNotFound.code());
        return Ok(DeployOutcome { loaded_length, result_code: None, new_address: None });
    }

    let arguments = InitArguments::single_byte(init_byte);
    let mut new_address = [0u8; ADDRESS_LEN];
    let result = host.create_contract(
        &encode_value(policy.value),
        code.as_slice(),
        &mut new_address,
        &arguments,
    );
    debug!(
        target: "child_deployer",
        %contract_id,
        init_byte,
        result,
        "Child contract creation requested"
    );

    finish_outcome(host, policy.outcome_encoding, result);

    Ok(DeployOutcome {
        loaded_length,
        result_code: Some(result),
        new_address: (result == 0).then(|| B256::from(new_address)),
    })
}

fn finish_outcome<H: HostInterface + ?Sized>(host: &mut H, encoding: OutcomeEncoding, result: i32) {
    match encoding {
        OutcomeEncoding::ResultCode => host.int64_finish(result.into()),
        OutcomeEncoding::StatusWord => host.finish(status_word(result)),
    }
}

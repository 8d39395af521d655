//! The externally observable result of one invocation.

use std::collections::BTreeMap;

use alloy_primitives::{Bytes, B256, I256, U256};
use serde::{Deserialize, Serialize};

use crate::{codec::decode_i64, ReturnCode};

/// Result of running one endpoint.
///
/// `return_data` holds the finish values in the order the contract produced them. Values carry
/// no labels, so callers tell them apart by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmOutput {
    /// Outcome of the invocation.
    pub return_code: ReturnCode,
    /// Human-readable reason for a failed invocation.
    pub return_message: String,
    /// Finish values, in call order.
    pub return_data: Vec<Bytes>,
    /// Accounts whose state changed, keyed by address.
    pub output_accounts: BTreeMap<B256, OutputAccount>,
}

impl VmOutput {
    /// Creates a failed output carrying no data.
    pub fn failure(return_code: ReturnCode, return_message: impl Into<String>) -> Self {
        Self { return_code, return_message: return_message.into(), ..Default::default() }
    }

    /// Appends a finish value.
    pub fn add_finish_data(&mut self, data: impl Into<Bytes>) {
        self.return_data.push(data.into());
    }

    /// The finish value at `index`.
    pub fn data_at(&self, index: usize) -> Option<&Bytes> {
        self.return_data.get(index)
    }

    /// The finish value at `index`, decoded as an int64.
    pub fn int64_at(&self, index: usize) -> Option<i64> {
        self.data_at(index).and_then(|data| decode_i64(data))
    }

    /// Returns `true` if the invocation completed.
    pub const fn is_success(&self) -> bool {
        self.return_code.is_ok()
    }

    /// Accounts that received code during the invocation.
    pub fn deployed_accounts(&self) -> impl Iterator<Item = &OutputAccount> {
        self.output_accounts.values().filter(|account| account.code.is_some())
    }
}

/// Changes to a single account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAccount {
    /// Account address.
    pub address: B256,
    /// Nonce after the invocation.
    pub nonce: u64,
    /// Balance after the invocation.
    pub balance: U256,
    /// Balance change caused by the invocation.
    pub balance_delta: I256,
    /// Code deployed to the account, if it was created during the invocation.
    pub code: Option<Bytes>,
    /// The account that deployed the code.
    pub code_deployer: Option<B256>,
    /// Storage entries written during the invocation.
    pub storage_updates: BTreeMap<Bytes, Bytes>,
}

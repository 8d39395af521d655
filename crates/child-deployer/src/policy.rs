//! Deployment policy of the deployer contract.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::{CODE_CAPACITY, DEPLOYMENT_VALUE};

/// What `deployChildContract` does when the storage read loaded no bytecode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageMissPolicy {
    /// Request creation anyway with the empty code and let the host reject it.
    #[default]
    PassThrough,
    /// Skip creation and finish [`ReturnCode::ContractNotFound`](crate::ReturnCode) as the
    /// outcome.
    Guard,
}

/// How the creation result is finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeEncoding {
    /// The raw result code, as an int64.
    #[default]
    ResultCode,
    /// `succ` for 0, `fail` for 1 and `unkn` for anything else.
    StatusWord,
}

/// Configuration of a deployer contract instance. The default is the reference fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentPolicy {
    /// Amount transferred to each child contract.
    pub value: U256,
    /// Capacity of the bytecode buffer.
    pub code_capacity: usize,
    /// Behavior on a storage miss.
    pub storage_miss: StorageMissPolicy,
    /// Encoding of the creation outcome.
    pub outcome_encoding: OutcomeEncoding,
}

impl Default for DeploymentPolicy {
    fn default() -> Self {
        Self {
            value: U256::from(DEPLOYMENT_VALUE),
            code_capacity: CODE_CAPACITY,
            storage_miss: StorageMissPolicy::default(),
            outcome_encoding: OutcomeEncoding::default(),
        }
    }
}

impl DeploymentPolicy {
    /// Sets the storage-miss behavior.
    pub const fn with_storage_miss(mut self, storage_miss: StorageMissPolicy) -> Self {
        self.storage_miss = storage_miss;
        self
    }

    /// Sets the outcome encoding.
    pub const fn with_outcome_encoding(mut self, outcome_encoding: OutcomeEncoding) -> Self {
        self.outcome_encoding = outcome_encoding;
        self
    }

    /// Sets the bytecode buffer capacity.
    pub const fn with_code_capacity(mut self, code_capacity: usize) -> Self {
        self.code_capacity = code_capacity;
        self
    }
}

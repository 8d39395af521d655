//! Prestate files.
//!
//! A prestate is a JSON object mapping addresses to accounts:
//!
//! ```json
//! {
//!   "0x00000000000000000000000000000000000000000000000000000000000de910": {
//!     "balance": "0x3e8",
//!     "code": "0x0061736d01000000",
//!     "storage": { "0x07": "0x0061736d0100000000000000" }
//!   }
//! }
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use alloy_primitives::{Bytes, B256, U256};
use child_deployer::test_utils::{MockAccount, MockWorld};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// An account entry of a prestate file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrestateAccount {
    /// Account nonce.
    pub nonce: u64,
    /// Account balance.
    pub balance: U256,
    /// Contract code.
    pub code: Option<Bytes>,
    /// Storage entries.
    pub storage: BTreeMap<Bytes, Bytes>,
}

impl PrestateAccount {
    fn into_account(self, address: B256) -> MockAccount {
        MockAccount {
            address,
            nonce: self.nonce,
            balance: self.balance,
            code: self.code,
            code_deployer: None,
            storage: self.storage,
        }
    }
}

/// Prestate accounts keyed by address.
pub type Prestate = BTreeMap<B256, PrestateAccount>;

/// Builds a world from prestate JSON.
pub fn parse_prestate(json: &str) -> Result<MockWorld> {
    let prestate: Prestate = serde_json::from_str(json)?;
    debug!(target: "deployer_run", accounts = prestate.len(), "Parsed prestate");
    Ok(MockWorld::from_accounts(
        prestate.into_iter().map(|(address, account)| account.into_account(address)),
    ))
}

/// Builds a world from a prestate file, or an empty world without one.
pub fn load_prestate(path: Option<&Path>) -> Result<MockWorld> {
    match path {
        Some(path) => parse_prestate(&fs::read_to_string(path)?),
        None => Ok(MockWorld::new()),
    }
}

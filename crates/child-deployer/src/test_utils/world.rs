use std::collections::BTreeMap;

use alloy_primitives::{keccak256, Bytes, B256, I256, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{is_wasm_module, MockHost};
use crate::{
    constants::{ADDRESS_LEN, VALUE_LEN},
    validate_function_name, Contract, HostError, InitArguments, OutputAccount, ReturnCode,
    VmOutput,
};

/// An account in the mock world.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MockAccount {
    /// Account address.
    pub address: B256,
    /// Account nonce. Increases with every child the account creates.
    pub nonce: u64,
    /// Native-currency balance.
    pub balance: U256,
    /// Contract code, if the account is a contract.
    pub code: Option<Bytes>,
    /// The account that deployed the code.
    pub code_deployer: Option<B256>,
    /// Key-value storage.
    pub storage: BTreeMap<Bytes, Bytes>,
}

impl MockAccount {
    /// Creates an empty account at `address`.
    pub fn new(address: B256) -> Self {
        Self { address, ..Default::default() }
    }
}

/// A creation request observed by the mock host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateRecord {
    /// The account that asked for the creation.
    pub creator: B256,
    /// The value argument, as passed.
    pub value: [u8; VALUE_LEN],
    /// The code argument.
    pub code: Bytes,
    /// The argument lengths, as passed.
    pub argument_lengths: Vec<usize>,
    /// The argument buffers, as passed.
    pub arguments: Vec<Bytes>,
    /// The result code returned to the contract.
    pub result: i32,
    /// The address of the created contract, on success.
    pub new_address: Option<B256>,
}

impl CreateRecord {
    /// The value argument as an integer.
    pub fn value(&self) -> U256 {
        U256::from_be_bytes(self.value)
    }
}

/// One endpoint call against the mock world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    /// The calling account.
    pub caller: B256,
    /// The contract executing the call. Storage reads and creations happen on its behalf.
    pub recipient: B256,
    /// Endpoint name.
    pub function: String,
    /// Positional call arguments.
    pub arguments: Vec<Bytes>,
}

impl ContractCall {
    /// Creates a call without arguments.
    pub fn new(caller: B256, recipient: B256, function: impl Into<String>) -> Self {
        Self { caller, recipient, function: function.into(), arguments: Vec::new() }
    }

    /// Appends a call argument.
    pub fn argument(mut self, argument: impl Into<Bytes>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Appends a one-byte call argument.
    pub fn byte_argument(self, byte: u8) -> Self {
        self.argument(Bytes::copy_from_slice(&[byte]))
    }
}

/// An in-memory account world that runs contracts through [`MockHost`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockWorld {
    accounts: BTreeMap<B256, MockAccount>,
    forced_create_result: Option<i32>,
    create_log: Vec<CreateRecord>,
}

impl MockWorld {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world holding `accounts`.
    pub fn from_accounts(accounts: impl IntoIterator<Item = MockAccount>) -> Self {
        let accounts = accounts.into_iter().map(|account| (account.address, account)).collect();
        Self { accounts, ..Default::default() }
    }

    fn account_mut(&mut self, address: B256) -> &mut MockAccount {
        self.accounts.entry(address).or_insert_with(|| MockAccount::new(address))
    }

    /// Sets the balance for an account.
    pub fn set_account_balance(&mut self, address: B256, balance: U256) {
        self.account_mut(address).balance = balance;
    }

    /// Sets the balance for an account.
    pub fn account_balance(mut self, address: B256, balance: U256) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Sets the nonce for an account.
    pub fn set_account_nonce(&mut self, address: B256, nonce: u64) {
        self.account_mut(address).nonce = nonce;
    }

    /// Sets the nonce for an account.
    pub fn account_nonce(mut self, address: B256, nonce: u64) -> Self {
        self.set_account_nonce(address, nonce);
        self
    }

    /// Sets the code for an account.
    pub fn set_account_code(&mut self, address: B256, code: Bytes) {
        self.account_mut(address).code = Some(code);
    }

    /// Sets the code for an account.
    pub fn account_code(mut self, address: B256, code: Bytes) -> Self {
        self.set_account_code(address, code);
        self
    }

    /// Sets a storage entry for an account.
    pub fn set_account_storage(
        &mut self,
        address: B256,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
    ) {
        self.account_mut(address).storage.insert(key.into(), value.into());
    }

    /// Sets a storage entry for an account.
    pub fn account_storage(
        mut self,
        address: B256,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
    ) -> Self {
        self.set_account_storage(address, key, value);
        self
    }

    /// Makes every creation request fail with `result` instead of being evaluated. `None` or
    /// `Some(0)` restores normal evaluation.
    pub fn set_create_result(&mut self, result: Option<i32>) {
        self.forced_create_result = result;
    }

    /// Makes every creation request fail with `result`.
    pub fn create_result(mut self, result: i32) -> Self {
        self.set_create_result(Some(result));
        self
    }

    /// Looks up an account.
    pub fn account(&self, address: &B256) -> Option<&MockAccount> {
        self.accounts.get(address)
    }

    /// Iterates over all accounts in address order.
    pub fn accounts(&self) -> impl Iterator<Item = &MockAccount> {
        self.accounts.values()
    }

    /// Reads a storage entry.
    pub fn storage_value(&self, address: &B256, key: &[u8]) -> Option<&Bytes> {
        let key = Bytes::copy_from_slice(key);
        self.accounts.get(address).and_then(|account| account.storage.get(&key))
    }

    /// Every creation request committed so far, in order.
    pub fn create_log(&self) -> &[CreateRecord] {
        &self.create_log
    }

    /// The address the next child of `creator` will be created at.
    pub fn new_address(&self, creator: &B256) -> B256 {
        let nonce = self.accounts.get(creator).map_or(0, |account| account.nonce);
        let mut preimage = [0u8; ADDRESS_LEN + 8];
        preimage[..ADDRESS_LEN].copy_from_slice(creator.as_slice());
        preimage[ADDRESS_LEN..].copy_from_slice(&nonce.to_be_bytes());
        keccak256(preimage)
    }

    /// Evaluates a creation request on behalf of `creator` and returns the result code together
    /// with the new address on success.
    ///
    /// Checks run in order: the forced result, the creator's funds, the code format, an existing
    /// contract at the derived address, then overflow of the creator's nonce or the child's
    /// balance. A failed request changes no account.
    pub(crate) fn create_contract(
        &mut self,
        creator: B256,
        value: &[u8; VALUE_LEN],
        code: &[u8],
        arguments: &InitArguments,
    ) -> (i32, Option<B256>) {
        let amount = U256::from_be_bytes(*value);
        let new_address = self.new_address(&creator);
        let (balance, nonce) = self
            .accounts
            .get(&creator)
            .map_or((U256::ZERO, 0), |account| (account.balance, account.nonce));
        let child = self.accounts.get(&new_address);
        let collides = child.is_some_and(|account| account.code.is_some());
        let next_nonce = nonce.checked_add(1);
        let child_balance =
            child.map_or(U256::ZERO, |account| account.balance).checked_add(amount);

        let forced = self.forced_create_result.filter(|result| *result != 0);
        let result = if let Some(result) = forced {
            result
        } else if balance < amount {
            ReturnCode::OutOfFunds.code()
        } else if !is_wasm_module(code) {
            ReturnCode::ContractInvalid.code()
        } else if collides {
            ReturnCode::AccountCollision.code()
        } else if next_nonce.is_none() || child_balance.is_none() {
            ReturnCode::ExecutionFailed.code()
        } else {
            ReturnCode::Ok.code()
        };

        let created = (result == 0).then_some(new_address);
        if let (Some(address), Some(next_nonce), Some(child_balance)) =
            (created, next_nonce, child_balance)
        {
            let creator_account = self.account_mut(creator);
            creator_account.balance -= amount;
            creator_account.nonce = next_nonce;

            let child = self.account_mut(address);
            child.balance = child_balance;
            child.code = Some(Bytes::copy_from_slice(code));
            child.code_deployer = Some(creator);
            debug!(
                target: "child_deployer::mock",
                %creator,
                %address,
                %amount,
                "Child contract created"
            );
        } else {
            debug!(target: "child_deployer::mock", %creator, result, "Child contract not created");
        }

        self.create_log.push(CreateRecord {
            creator,
            value: *value,
            code: Bytes::copy_from_slice(code),
            argument_lengths: arguments.lengths().to_vec(),
            arguments: arguments.buffers().to_vec(),
            result,
            new_address: created,
        });

        (result, created)
    }

    /// Runs `call` on `contract`.
    ///
    /// The call runs against a copy of the world. The copy replaces the world when the call
    /// completes and is dropped when the host aborts, so an aborted call leaves no trace.
    pub fn execute(&mut self, contract: &dyn Contract, call: &ContractCall) -> VmOutput {
        if let Err(err) = self.check_call(call) {
            warn!(target: "child_deployer::mock", function = %call.function, %err, "Call rejected");
            return VmOutput::failure(err.return_code(), err.to_string());
        }

        let mut host = MockHost::new(self.clone(), call);
        if let Err(err) = contract.call(&call.function, &mut host) {
            warn!(target: "child_deployer::mock", function = %call.function, %err, "Call aborted");
            return VmOutput::failure(err.return_code(), err.to_string());
        }

        let (world, return_data) = host.into_parts();
        let output_accounts = self.output_accounts(&world);
        *self = world;

        VmOutput {
            return_code: ReturnCode::Ok,
            return_message: String::new(),
            return_data,
            output_accounts,
        }
    }

    fn check_call(&self, call: &ContractCall) -> Result<(), HostError> {
        validate_function_name(&call.function)?;
        if self.accounts.get(&call.recipient).is_none_or(|account| account.code.is_none()) {
            return Err(HostError::ContractNotFound(call.recipient));
        }
        Ok(())
    }

    /// Accounts of `after` that differ from `self`.
    fn output_accounts(&self, after: &Self) -> BTreeMap<B256, OutputAccount> {
        let mut changed = BTreeMap::new();
        for (address, account) in &after.accounts {
            let before = self.accounts.get(address);
            if before == Some(account) {
                continue;
            }

            let previous_balance = before.map_or(U256::ZERO, |before| before.balance);
            let storage_updates = account
                .storage
                .iter()
                .filter(|(key, value)| {
                    before.and_then(|before| before.storage.get(*key)) != Some(*value)
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            let deployed = before.is_none_or(|before| before.code != account.code);

            changed.insert(
                *address,
                OutputAccount {
                    address: *address,
                    nonce: account.nonce,
                    balance: account.balance,
                    balance_delta: I256::from_raw(account.balance)
                        .wrapping_sub(I256::from_raw(previous_balance)),
                    code: account.code.clone().filter(|_| deployed),
                    code_deployer: account.code_deployer.filter(|_| deployed),
                    storage_updates,
                },
            );
        }
        changed
    }
}

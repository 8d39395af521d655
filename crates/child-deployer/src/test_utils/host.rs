use alloy_primitives::{Bytes, B256};

use super::{ContractCall, MockWorld};
use crate::{
    constants::{ADDRESS_LEN, VALUE_LEN},
    HostError, HostInterface, HostResult, InitArguments,
};

/// The host side of one call against a [`MockWorld`].
///
/// The host owns a working copy of the world; [`MockWorld::execute`] decides whether the copy
/// is committed.
#[derive(Debug)]
pub struct MockHost<'a> {
    world: MockWorld,
    call: &'a ContractCall,
    return_data: Vec<Bytes>,
}

impl<'a> MockHost<'a> {
    /// Creates a host running `call` on `world`.
    pub fn new(world: MockWorld, call: &'a ContractCall) -> Self {
        Self { world, call, return_data: Vec::new() }
    }

    /// The world as modified by the call so far.
    pub const fn world(&self) -> &MockWorld {
        &self.world
    }

    /// The finish values produced so far.
    pub fn return_data(&self) -> &[Bytes] {
        &self.return_data
    }

    /// Splits the host into the modified world and the finish values.
    pub fn into_parts(self) -> (MockWorld, Vec<Bytes>) {
        (self.world, self.return_data)
    }

    fn executing_contract(&self) -> B256 {
        self.call.recipient
    }
}

impl HostInterface for MockHost<'_> {
    fn get_argument(&self, index: usize, out: &mut [u8]) -> HostResult<usize> {
        let argument = self
            .call
            .arguments
            .get(index)
            .ok_or(HostError::ArgumentOutOfRange { index, count: self.call.arguments.len() })?;
        if argument.len() > out.len() {
            return Err(HostError::ArgumentTooLong {
                index,
                length: argument.len(),
                capacity: out.len(),
            });
        }
        out[..argument.len()].copy_from_slice(argument);
        Ok(argument.len())
    }

    fn storage_load(&mut self, key: &[u8], out: &mut [u8]) -> HostResult<usize> {
        let Some(value) = self.world.storage_value(&self.executing_contract(), key) else {
            return Ok(0);
        };
        if value.len() > out.len() {
            return Err(HostError::StorageValueTooLong { length: value.len(), capacity: out.len() });
        }
        out[..value.len()].copy_from_slice(value);
        Ok(value.len())
    }

    fn create_contract(
        &mut self,
        value: &[u8; VALUE_LEN],
        code: &[u8],
        new_address: &mut [u8; ADDRESS_LEN],
        arguments: &InitArguments,
    ) -> i32 {
        let creator = self.executing_contract();
        let (result, created) = self.world.create_contract(creator, value, code, arguments);
        if let Some(address) = created {
            new_address.copy_from_slice(address.as_slice());
        }
        result
    }

    fn finish(&mut self, data: &[u8]) {
        self.return_data.push(Bytes::copy_from_slice(data));
    }
}

use auto_impl::auto_impl;

use crate::{
    codec::encode_i64,
    constants::{ADDRESS_LEN, VALUE_LEN},
    HostResult, InitArguments,
};

/// The primitive operations the execution platform offers to running contract code.
///
/// Every call is a blocking call-and-return. Operations returning a [`HostResult`] abort the
/// invocation on error; the contract is expected to propagate the error untouched.
#[auto_impl(&mut, Box)]
pub trait HostInterface {
    /// Copies the call argument at `index` into `out` and returns its length.
    ///
    /// Aborts if `index` is past the last argument or the argument does not fit `out`.
    fn get_argument(&self, index: usize, out: &mut [u8]) -> HostResult<usize>;

    /// Copies the value stored under `key` in the executing contract's own storage into `out`
    /// and returns the number of bytes copied. An absent key copies nothing and returns 0.
    ///
    /// Aborts if the stored value does not fit `out`.
    fn storage_load(&mut self, key: &[u8], out: &mut [u8]) -> HostResult<usize>;

    /// Requests the creation of a child contract running `code`, funded with `value` (32-byte
    /// big-endian) taken from the executing contract's balance, and constructed with
    /// `arguments`.
    ///
    /// On success the new address is written to `new_address` and 0 is returned. Any other
    /// value is a platform failure code and `new_address` is left untouched.
    fn create_contract(
        &mut self,
        value: &[u8; VALUE_LEN],
        code: &[u8],
        new_address: &mut [u8; ADDRESS_LEN],
        arguments: &InitArguments,
    ) -> i32;

    /// Appends `data` to the invocation's return data.
    fn finish(&mut self, data: &[u8]);

    /// Appends `value` to the invocation's return data, encoded by [`encode_i64`].
    fn int64_finish(&mut self, value: i64) {
        self.finish(&encode_i64(value));
    }
}

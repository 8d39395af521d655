use alloy_primitives::Bytes;

use crate::constants::WASM_HEADER;

/// Returns `true` if `code` starts with the WASM magic and version 1.
pub fn is_wasm_module(code: &[u8]) -> bool {
    code.starts_with(&WASM_HEADER)
}

/// Builds a `len`-byte module the mock host accepts: the WASM header followed by a deterministic
/// body. Lengths below the header size yield a truncated header, which the host rejects.
pub fn wasm_module(len: usize) -> Bytes {
    let body = (0usize..).map(|i| (i as u8).wrapping_mul(31));
    WASM_HEADER.iter().copied().chain(body).take(len).collect::<Vec<u8>>().into()
}

//! Hex argument decoding.

use alloy_primitives::{hex, Bytes};

use crate::{Result, RunError};

/// Decodes a call argument given as hex, with or without a `0x` prefix. An empty string is an
/// empty argument.
pub fn decode_hex_argument(s: &str) -> Result<Bytes> {
    let s = s.trim();
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    if digits.len() % 2 != 0 {
        return Err(RunError::InvalidInput(format!(
            "Invalid hex string length: {} (must be even)",
            digits.len()
        )));
    }

    Ok(hex::decode(digits)?.into())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::prefixed("0x07", &[7])]
    #[case::bare("0705", &[7, 5])]
    #[case::upper_prefix("0XFF", &[0xff])]
    #[case::empty("", &[])]
    #[case::prefix_only("0x", &[])]
    #[case::padded(" 0x2a ", &[42])]
    fn test_decode(#[case] input: &str, #[case] expected: &[u8]) {
        assert_eq!(decode_hex_argument(input).unwrap().to_vec(), expected.to_vec());
    }

    #[rstest]
    #[case::odd_length("0x7")]
    #[case::not_hex("0xzz")]
    fn test_decode_rejects(#[case] input: &str) {
        assert!(decode_hex_argument(input).is_err());
    }
}

//! Encoding of finish data.
//!
//! Integers are finished as minimal big-endian two's complement byte strings. Zero is the empty
//! string, positive values never carry a redundant leading `0x00` and negative values never
//! carry a redundant leading `0xff`.

use crate::constants::status_word;

/// Encodes `value` as a minimal big-endian two's complement byte string.
pub fn encode_i64(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let bytes = value.to_be_bytes();
    let filler = if value < 0 { 0xff } else { 0x00 };
    let mut start = 0;
    // Drop a filler byte only if the next byte still carries the right sign bit.
    while start < bytes.len() - 1 &&
        bytes[start] == filler &&
        (bytes[start + 1] & 0x80 == filler & 0x80)
    {
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Decodes a big-endian two's complement byte string. Returns `None` if the value does not fit
/// an `i64`.
pub fn decode_i64(bytes: &[u8]) -> Option<i64> {
    if bytes.is_empty() {
        return Some(0);
    }
    if bytes.len() > 8 {
        return None;
    }

    let filler = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut buf = [filler; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Some(i64::from_be_bytes(buf))
}

/// Maps a creation result code to the status word finished by the word-based outcome encoding.
pub const fn status_word(result: i32) -> &'static [u8] {
    match result {
        0 => status_word::SUCCESS,
        1 => status_word::FAILURE,
        _ => status_word::UNKNOWN,
    }
}

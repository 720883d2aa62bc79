//! Byte-packing primitives shared by the device and phone codecs.
//!
//! All readers are strict: a range that runs past the end of the input is an
//! [`UwbConfigError::InsufficientData`], never a short or zero-filled result.

use byteorder::{ByteOrder, LittleEndian};
use bytes::{BufMut, Bytes, BytesMut};

use crate::error::UwbConfigError;

/// Concatenate two byte sequences. An empty side is the identity.
pub fn concat(head: &[u8], tail: &[u8]) -> Bytes {
    if tail.is_empty() {
        return Bytes::copy_from_slice(head);
    }
    if head.is_empty() {
        return Bytes::copy_from_slice(tail);
    }
    let mut buf = BytesMut::with_capacity(head.len() + tail.len());
    buf.put_slice(head);
    buf.put_slice(tail);
    buf.freeze()
}

/// Borrow `len` bytes of `data` starting at `offset`.
pub fn extract(data: &[u8], offset: usize, len: usize) -> Result<&[u8], UwbConfigError> {
    let end = offset.checked_add(len).ok_or(UwbConfigError::InsufficientData {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    data.get(offset..end).ok_or(UwbConfigError::InsufficientData {
        expected: end,
        actual: data.len(),
    })
}

/// Copy a fixed-size field out of `data`.
pub fn extract_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], UwbConfigError> {
    Ok(extract(data, offset, N)?.try_into()?)
}

pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, UwbConfigError> {
    Ok(extract(data, offset, 1)?[0])
}

pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16, UwbConfigError> {
    Ok(LittleEndian::read_u16(extract(data, offset, 2)?))
}

pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, UwbConfigError> {
    Ok(LittleEndian::read_u32(extract(data, offset, 4)?))
}

/// Decode hex as printed by most tools.
///
/// Whitespace, `:` and `-` separators and a leading `0x`/`0X` are accepted so
/// that captured blobs, MAC addresses and IVs can be pasted as-is.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, UwbConfigError> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    let cleaned = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    Ok(hex::decode(cleaned)?)
}

/// Decode a hex string into a field of exactly `N` bytes.
pub fn parse_hex_field<const N: usize>(field: &'static str, text: &str) -> Result<[u8; N], UwbConfigError> {
    let bytes = decode_hex(text)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| UwbConfigError::InvalidLength { field, expected: N, actual })
}

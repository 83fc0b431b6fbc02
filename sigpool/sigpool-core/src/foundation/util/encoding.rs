use crate::foundation::PoolError;

pub fn decode_hex(s: &str) -> Result<Vec<u8>, PoolError> {
    let trimmed = s.trim();
    let unprefixed = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
    hex::decode(unprefixed).map_err(|e| e.into())
}

/// Parses a hex string (with or without `0x`) into exactly `N` bytes.
pub fn parse_hex_fixed<const N: usize>(s: &str) -> Result<[u8; N], PoolError> {
    let bytes = decode_hex(s)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| PoolError::EncodingError(format!("expected {N} bytes, got {len}")))
}

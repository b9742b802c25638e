//! Hex payload codec.
//!
//! The rollup carries every payload as a `0x`-prefixed hex string of UTF-8
//! bytes.

use thiserror::Error;

/// Prefix carried by every hex payload.
pub const HEX_PREFIX: &str = "0x";

/// Errors decoding a hex payload.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Payload does not start with `0x`.
    #[error("payload does not start with \"{HEX_PREFIX}\"")]
    MissingPrefix,

    /// Odd length or a non-hex character.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Bytes are not UTF-8.
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decode a `0x`-prefixed hex payload into a string.
pub fn hex_to_str(payload: &str) -> Result<String, CodecError> {
    let digits = payload
        .strip_prefix(HEX_PREFIX)
        .ok_or(CodecError::MissingPrefix)?;
    let bytes = hex::decode(digits)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode a string as a `0x`-prefixed hex payload.
pub fn str_to_hex(s: &str) -> String {
    format!("{HEX_PREFIX}{}", hex::encode(s.as_bytes()))
}

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::wire::{Result, WireError};

const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024 * 1024;
/// zstd frame magic used by compressed account dumps.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// How a buffer file was stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
	/// Raw bytes.
	Raw,
	/// Hex text, whitespace ignored.
	Hex,
	/// zstd-compressed raw bytes.
	Zstd,
}

impl Encoding {
	/// Render the encoding as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Raw => "raw",
			Self::Hex => "hex",
			Self::Zstd => "zstd",
		}
	}
}

/// Read a buffer file; `hex` forces hex-text parsing, otherwise zstd is auto-detected.
pub fn read_buffer(path: impl AsRef<Path>, hex: bool) -> Result<(Encoding, Vec<u8>)> {
	let raw = fs::read(path)?;
	if hex {
		return Ok((Encoding::Hex, parse_hex(&String::from_utf8_lossy(&raw))?));
	}
	decode_bytes(raw)
}

/// Parse hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
	let compact: String = text.chars().filter(|ch| !ch.is_whitespace()).collect();
	let digits = compact.strip_prefix("0x").unwrap_or(&compact);
	Ok(hex::decode(digits)?)
}

/// Detect and undo compression, returning `(encoding, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Encoding, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw, MAX_DECOMPRESSED_BYTES)?;
		tracing::debug!(compressed = raw.len(), decompressed = out.len(), "zstd input");
		return Ok((Encoding::Zstd, out));
	}
	Ok((Encoding::Raw, raw))
}

fn decode_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	// Reading one byte past the limit separates an exact fit from an overflow.
	zstd::stream::read::Decoder::new(raw)?.take(limit as u64 + 1).read_to_end(&mut out)?;
	if out.len() > limit {
		return Err(WireError::DecompressedTooLarge { limit });
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::{Encoding, decode_bytes, decode_zstd, parse_hex};
	use crate::wire::{ErrorKind, WireError};

	#[test]
	fn hex_ignores_whitespace_and_prefix() {
		assert_eq!(parse_hex("0x01 02\n0a ff").expect("parses"), vec![1, 2, 10, 255]);
	}

	#[test]
	fn bad_hex_is_invalid_encoding() {
		assert_eq!(parse_hex("0g").expect_err("bad digit").kind(), ErrorKind::InvalidEncoding);
	}

	#[test]
	fn zstd_round_trips() {
		let payload = vec![7_u8; 4096];
		let packed = zstd::encode_all(payload.as_slice(), 3).expect("compresses");
		let (encoding, bytes) = decode_bytes(packed).expect("decompresses");
		assert_eq!(encoding, Encoding::Zstd);
		assert_eq!(bytes, payload);
	}

	#[test]
	fn zstd_output_is_capped() {
		let packed = zstd::encode_all([1_u8; 64].as_slice(), 3).expect("compresses");
		assert_eq!(decode_zstd(&packed, 64).expect("exact fit").len(), 64);
		let err = decode_zstd(&packed, 63).expect_err("over limit");
		assert!(matches!(err, WireError::DecompressedTooLarge { limit: 63 }));
		assert_eq!(err.kind(), ErrorKind::LimitExceeded);
	}

	#[test]
	fn raw_bytes_pass_through() {
		let (encoding, bytes) = decode_bytes(vec![1, 2, 3]).expect("raw");
		assert_eq!(encoding, Encoding::Raw);
		assert_eq!(bytes, vec![1, 2, 3]);
	}
}

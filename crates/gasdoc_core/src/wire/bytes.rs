use crate::wire::{Result, WireError};

/// Forward-only bounded cursor over an immutable byte slice.
#[derive(Debug)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Whether every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(WireError::OutOfBounds {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_bytes(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		let [byte] = self.read_array::<1>()?;
		Ok(byte)
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		self.read_array().map(u32::from_le_bytes)
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		self.read_array().map(u64::from_le_bytes)
	}

	/// Read a little-endian `u128`.
	pub fn read_u128_le(&mut self) -> Result<u128> {
		self.read_array().map(u128::from_le_bytes)
	}

	/// Read a `u32` length prefix followed by that many strict UTF-8 bytes.
	pub fn read_string(&mut self) -> Result<&'a str> {
		let len = self.read_u32_le()? as usize;
		let at = self.pos;
		let raw = self.read_bytes(len)?;
		std::str::from_utf8(raw).map_err(|_| WireError::InvalidUtf8 { at, len })
	}
}

#[cfg(test)]
mod tests;

use crate::abi::{AbiError, Result};

/// Bounded cursor over one encoded region.
///
/// Positions reported in errors are absolute: `base` is the region's offset inside the
/// buffer handed to the top-level decode call.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0 of a top-level buffer.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, base: 0 }
	}

	/// Return current offset, relative to the region start.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return current offset inside the top-level buffer.
	pub fn abs_pos(&self) -> usize {
		self.base + self.pos
	}

	/// Return region length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(AbiError::TruncatedInput {
				at: self.abs_pos(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a big-endian `u16` length, count, or offset field.
	pub fn read_u16_be(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		Ok(u16::from_be_bytes(buf))
	}

	/// Split off a cursor over `start..end` of this region without moving this cursor.
	pub fn region(&self, start: usize, end: usize) -> Result<Cursor<'a>> {
		let bytes = self.bytes.get(start..end).ok_or(AbiError::TruncatedInput {
			at: self.base + start,
			need: end.saturating_sub(start),
			rem: self.bytes.len().saturating_sub(start),
		})?;
		Ok(Cursor {
			bytes,
			pos: 0,
			base: self.base + start,
		})
	}

	/// Take the next `n` bytes as their own region and advance past them.
	pub fn take_region(&mut self, n: usize) -> Result<Cursor<'a>> {
		let at = self.pos;
		let _ = self.read_exact(n)?;
		self.region(at, at + n)
	}

	/// View everything from the current position to the region end, without advancing.
	pub fn rest(&self) -> Cursor<'a> {
		Cursor {
			bytes: &self.bytes[self.pos.min(self.bytes.len())..],
			pos: 0,
			base: self.abs_pos(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Cursor;
	use crate::abi::AbiError;

	#[test]
	fn reads_big_endian_u16() {
		let mut cursor = Cursor::new(&[0x03, 0xfa, 0x01]);
		assert_eq!(cursor.read_u16_be().expect("u16 reads"), 1018);
		assert_eq!(cursor.remaining(), 1);
	}

	#[test]
	fn short_read_reports_absolute_position() {
		let bytes = [0_u8; 6];
		let mut outer = Cursor::new(&bytes);
		let _ = outer.read_exact(2).expect("prefix reads");
		let mut inner = outer.take_region(3).expect("region fits");
		let _ = inner.read_exact(2).expect("inner reads");

		let err = inner.read_exact(2).expect_err("region is exhausted");
		assert!(matches!(err, AbiError::TruncatedInput { at: 4, need: 2, rem: 1 }));
	}

	#[test]
	fn region_past_end_is_truncated() {
		let cursor = Cursor::new(&[1, 2, 3]);
		let err = cursor.region(1, 5).expect_err("region exceeds buffer");
		assert!(matches!(err, AbiError::TruncatedInput { at: 1, need: 4, rem: 2 }));
	}
}

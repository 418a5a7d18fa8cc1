//! Checksummed base32 text form of 32-byte addresses.

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

use crate::abi::{AbiError, Result};

/// Raw width of an address.
pub const ADDRESS_LEN: usize = 32;
/// Width of the address text form: 32 key bytes and a 4-byte checksum in unpadded base32.
pub const ADDRESS_TEXT_LEN: usize = 58;

const CHECKSUM_LEN: usize = 4;

fn checksum(key: &[u8]) -> [u8; CHECKSUM_LEN] {
	let digest = Sha512_256::digest(key);
	let mut out = [0_u8; CHECKSUM_LEN];
	out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
	out
}

fn out_of_range(expected: &str, got: impl Into<String>) -> AbiError {
	AbiError::ValueOutOfRange {
		ty: "address".to_owned(),
		expected: expected.to_owned(),
		got: got.into(),
	}
}

/// Render 32 address bytes as checksummed base32 text.
pub fn address_to_text(bytes: &[u8]) -> Result<String> {
	if bytes.len() != ADDRESS_LEN {
		return Err(out_of_range("32 bytes", format!("{} bytes", bytes.len())));
	}
	let mut raw = Vec::with_capacity(ADDRESS_LEN + CHECKSUM_LEN);
	raw.extend_from_slice(bytes);
	raw.extend_from_slice(&checksum(bytes));
	Ok(BASE32_NOPAD.encode(&raw))
}

/// Parse checksummed base32 address text back into its 32 bytes.
pub fn address_from_text(text: &str) -> Result<Vec<u8>> {
	if text.len() != ADDRESS_TEXT_LEN {
		return Err(out_of_range("58 characters of address text", format!("{} characters", text.len())));
	}
	let raw = BASE32_NOPAD
		.decode(text.as_bytes())
		.map_err(|err| out_of_range("base32 address text", format!("{text:?} ({err})")))?;
	let (key, sum) = raw.split_at(ADDRESS_LEN);
	if sum != checksum(key).as_slice() {
		return Err(out_of_range("address text with a valid checksum", text));
	}
	Ok(key.to_vec())
}

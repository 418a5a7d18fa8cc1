use avm_abi::abi::{AbiType, Method, address_from_text, address_to_text};

use crate::cmd::{CliError, Result};

/// Pretty-print one JSON payload to stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload)?;
	println!("{text}");
	Ok(())
}

/// Parse hex text with an optional `0x` prefix.
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>> {
	let digits = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);
	hex::decode(digits).map_err(|source| CliError::Hex {
		input: input.to_owned(),
		source,
	})
}

/// Render bytes as `0x`-prefixed lowercase hex.
pub(crate) fn hex_string(bytes: &[u8]) -> String {
	format!("0x{}", hex::encode(bytes))
}

/// Parse an address given as checksummed base32 text or `0x` hex.
pub(crate) fn parse_address(input: &str) -> Result<Vec<u8>> {
	if input.starts_with("0x") || input.starts_with("0X") {
		return parse_hex(input);
	}
	Ok(address_from_text(input)?)
}

/// Render an address as base32 text, falling back to hex for odd widths.
pub(crate) fn address_string(bytes: &[u8]) -> String {
	address_to_text(bytes).unwrap_or_else(|_| hex_string(bytes))
}

/// Parse a canonical type string.
pub(crate) fn parse_type(text: &str) -> Result<AbiType> {
	Ok(text.parse::<AbiType>()?)
}

/// Parse a method signature.
pub(crate) fn parse_method(signature: &str) -> Result<Method> {
	Ok(Method::parse(signature)?)
}

/// Return type label, `void` when absent.
pub(crate) fn returns_label(method: &Method) -> String {
	method.returns.as_ref().map_or_else(|| "void".to_owned(), AbiType::to_string)
}

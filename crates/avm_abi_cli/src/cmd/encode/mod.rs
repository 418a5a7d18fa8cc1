use avm_abi::abi::encode;

use crate::cmd::Result;
use crate::cmd::json::value_from_json;
use crate::cmd::util::{emit_json, hex_string, parse_type};

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_name = "TYPE")]
	pub ty: String,
	#[arg(value_name = "VALUE_JSON")]
	pub value: String,
	#[arg(long)]
	pub json: bool,
}

/// Encode one JSON value against a type and print the bytes as hex.
pub fn run(args: Args) -> Result<()> {
	let Args { ty, value, json } = args;

	let parsed = parse_type(&ty)?;
	let value = value_from_json(&serde_json::from_str(&value)?, &parsed)?;
	let bytes = encode(&value, &parsed)?;

	if json {
		let payload = EncodeJson {
			canonical: parsed.canonical(),
			len: bytes.len(),
			hex: hex_string(&bytes),
		};
		return emit_json(&payload);
	}

	println!("{}", hex_string(&bytes));
	Ok(())
}

#[derive(serde::Serialize)]
struct EncodeJson {
	canonical: String,
	len: usize,
	hex: String,
}

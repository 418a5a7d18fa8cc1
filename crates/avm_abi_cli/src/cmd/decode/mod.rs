use avm_abi::abi::{DecodeOptions, decode_with};
use tracing::debug;

use crate::cmd::Result;
use crate::cmd::json::value_to_json;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, parse_hex, parse_type};

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_name = "TYPE")]
	pub ty: String,
	#[arg(value_name = "HEX")]
	pub hex: String,
	#[arg(long)]
	pub json: bool,
	/// Ignore bytes left over after the value.
	#[arg(long)]
	pub lenient: bool,
}

/// Decode hex bytes against a type and print the value tree.
pub fn run(args: Args) -> Result<()> {
	let Args { ty, hex, json, lenient } = args;

	let parsed = parse_type(&ty)?;
	let bytes = parse_hex(&hex)?;
	let options = if lenient { DecodeOptions::lenient() } else { DecodeOptions::default() };
	debug!(ty = %parsed, len = bytes.len(), lenient, "decoding");
	let value = decode_with(&bytes, &parsed, &options)?;

	if json {
		let payload = DecodeJson {
			canonical: parsed.canonical(),
			value: value_to_json(&value),
		};
		return emit_json(&payload);
	}

	println!("type: {parsed}");
	print_value(&value, PrintOptions::default());
	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	canonical: String,
	value: serde_json::Value,
}

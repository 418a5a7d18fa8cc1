use crate::cmd::Result;
use crate::cmd::json::value_to_json;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, parse_hex, parse_method, returns_label};

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_name = "SIGNATURE")]
	pub signature: String,
	/// Return log entry, `151f7c75` prefix included.
	#[arg(value_name = "LOG_HEX")]
	pub log: String,
	#[arg(long)]
	pub json: bool,
}

/// Decode the return log entry of one method call.
pub fn run(args: Args) -> Result<()> {
	let Args { signature, log, json } = args;

	let method = parse_method(&signature)?;
	let value = method.decode_return(&parse_hex(&log)?)?;

	if json {
		let payload = ReturnJson {
			signature: method.signature(),
			returns: returns_label(&method),
			value: value.as_ref().map(value_to_json),
		};
		return emit_json(&payload);
	}

	match value {
		Some(value) => print_value(&value, PrintOptions::default()),
		None => println!("void"),
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct ReturnJson {
	signature: String,
	returns: String,
	value: Option<serde_json::Value>,
}

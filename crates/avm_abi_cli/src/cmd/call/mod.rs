use avm_abi::abi::TransportLimits;
use tracing::debug;

use crate::cmd::json::value_from_json_at;
use crate::cmd::util::{emit_json, hex_string, parse_method};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_name = "SIGNATURE")]
	pub signature: String,
	/// Arguments as one JSON array in call order.
	#[arg(value_name = "ARGS_JSON_ARRAY")]
	pub args: String,
	#[arg(long)]
	pub json: bool,
	/// Skip the transaction argument count and size ceilings.
	#[arg(long)]
	pub unbounded: bool,
}

/// Encode the application arguments of one method call.
pub fn run(args: Args) -> Result<()> {
	let Args {
		signature,
		args,
		json,
		unbounded,
	} = args;

	let method = parse_method(&signature)?;
	let raw: serde_json::Value = serde_json::from_str(&args)?;
	let items = raw.as_array().ok_or_else(|| CliError::JsonValue {
		path: "$".to_owned(),
		expected: "an array of arguments".to_owned(),
		got: "a single value".to_owned(),
	})?;
	if items.len() != method.args.len() {
		return Err(CliError::JsonValue {
			path: "$".to_owned(),
			expected: format!("{} arguments", method.args.len()),
			got: format!("{} arguments", items.len()),
		});
	}

	let values = method
		.args
		.iter()
		.zip(items)
		.enumerate()
		.map(|(idx, (arg, item))| value_from_json_at(item, &arg.ty, &format!("$[{idx}]")))
		.collect::<Result<Vec<_>>>()?;
	let limits = if unbounded { TransportLimits::unbounded() } else { TransportLimits::default() };
	let app_args = method.encode_call(&values, &limits)?;
	debug!(method = %method.name, slots = app_args.len(), "encoded call");

	let app_args: Vec<String> = app_args.iter().map(|arg| hex_string(arg)).collect();
	if json {
		let payload = CallJson {
			signature: method.signature(),
			app_args,
		};
		return emit_json(&payload);
	}

	for arg in &app_args {
		println!("{arg}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct CallJson {
	signature: String,
	app_args: Vec<String>,
}

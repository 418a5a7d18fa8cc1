use crate::cmd::Result;
use crate::cmd::util::{emit_json, hex_string, parse_method, returns_label};

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_name = "SIGNATURE")]
	pub signature: String,
	#[arg(long)]
	pub json: bool,
}

/// Print a method's canonical signature, selector, and argument types.
pub fn run(args: Args) -> Result<()> {
	let Args { signature, json } = args;

	let method = parse_method(&signature)?;
	let selector = hex_string(&method.selector());
	let arg_types: Vec<String> = method.args.iter().map(|arg| arg.ty.to_string()).collect();

	if json {
		let payload = MethodJson {
			name: method.name.to_string(),
			signature: method.signature(),
			selector,
			args: arg_types,
			returns: returns_label(&method),
		};
		return emit_json(&payload);
	}

	println!("signature: {}", method.signature());
	println!("selector: {selector}");
	for (idx, ty) in arg_types.iter().enumerate() {
		println!("arg[{idx}]: {ty}");
	}
	println!("returns: {}", returns_label(&method));
	Ok(())
}

#[derive(serde::Serialize)]
struct MethodJson {
	name: String,
	signature: String,
	selector: String,
	args: Vec<String>,
	returns: String,
}

#[cfg(test)]
mod tests;

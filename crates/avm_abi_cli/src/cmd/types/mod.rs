use tracing::debug;

use crate::cmd::Result;
use crate::cmd::util::{emit_json, parse_type};

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_name = "TYPE")]
	pub ty: String,
	#[arg(long)]
	pub json: bool,
}

/// Print the canonical form and layout of one type.
pub fn run(args: Args) -> Result<()> {
	let Args { ty, json } = args;

	let parsed = parse_type(&ty)?;
	let canonical = parsed.canonical();
	let static_width = parsed.static_byte_width();
	debug!(input = %ty, canonical = %canonical, "parsed type");

	if json {
		let payload = TypeJson {
			canonical,
			dynamic: parsed.is_dynamic(),
			static_width,
		};
		return emit_json(&payload);
	}

	println!("type: {canonical}");
	println!("dynamic: {}", parsed.is_dynamic());
	match static_width {
		Some(width) => println!("static_width: {width}"),
		None => println!("static_width: -"),
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TypeJson {
	canonical: String,
	dynamic: bool,
	static_width: Option<usize>,
}

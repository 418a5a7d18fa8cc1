use avm_abi::abi::AbiValue;

use crate::cmd::util::{address_string, hex_string};

/// Output truncation limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of elements printed for arrays and tuples.
	pub max_array_items: usize,
	/// Maximum number of bytes shown for byte strings.
	pub max_bytes_shown: usize,
	/// Maximum nesting depth before collapsing.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_array_items: 16,
			max_bytes_shown: 64,
			max_print_depth: 8,
		}
	}
}

/// Print one decoded value tree to stdout.
pub fn print_value(value: &AbiValue, options: PrintOptions) {
	for line in render_value(value, options) {
		println!("{line}");
	}
}

/// Render one decoded value tree as indented lines.
pub fn render_value(value: &AbiValue, options: PrintOptions) -> Vec<String> {
	let mut lines = Vec::new();
	render_into(&mut lines, value, "", 0, 0, options);
	lines
}

fn render_into(lines: &mut Vec<String>, value: &AbiValue, label: &str, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let (open, close, items) = match value {
		AbiValue::Array(items) => ("[", "]", items),
		AbiValue::Tuple(items) => ("(", ")", items),
		AbiValue::Struct(item) => {
			if depth >= options.max_print_depth {
				lines.push(format!("{pad}{label}{} {{ ... }}", item.type_name));
				return;
			}
			lines.push(format!("{pad}{label}{} {{", item.type_name));
			for field in &item.fields {
				render_into(lines, &field.value, &format!("{} = ", field.name), indent + 2, depth + 1, options);
			}
			lines.push(format!("{pad}}}"));
			return;
		}
		scalar => {
			lines.push(format!("{pad}{label}{}", render_scalar(scalar, options)));
			return;
		}
	};

	if depth >= options.max_print_depth {
		lines.push(format!("{pad}{label}{open}... {} items{close}", items.len()));
		return;
	}
	lines.push(format!("{pad}{label}{open}"));
	for item in items.iter().take(options.max_array_items) {
		render_into(lines, item, "", indent + 2, depth + 1, options);
	}
	if items.len() > options.max_array_items {
		lines.push(format!("{pad}  ... {} more", items.len() - options.max_array_items));
	}
	lines.push(format!("{pad}{close}"));
}

fn render_scalar(value: &AbiValue, options: PrintOptions) -> String {
	match value {
		AbiValue::UInt(item) => item.to_string(),
		AbiValue::UFixed(item) => item.to_string(),
		AbiValue::Bool(item) => item.to_string(),
		AbiValue::Byte(item) => format!("0x{item:02x}"),
		AbiValue::Address(bytes) => format!("address {}", address_string(bytes)),
		AbiValue::Bytes(bytes) => render_bytes(bytes, options),
		AbiValue::String(text) => format!("{text:?}"),
		AbiValue::Array(_) | AbiValue::Tuple(_) | AbiValue::Struct(_) => String::new(),
	}
}

fn render_bytes(bytes: &[u8], options: PrintOptions) -> String {
	if bytes.len() <= options.max_bytes_shown {
		return format!("bytes[{}] {}", bytes.len(), hex_string(bytes));
	}
	format!("bytes[{}] {}...", bytes.len(), hex_string(&bytes[..options.max_bytes_shown]))
}

#[cfg(test)]
mod tests;

//! JSON value notation used on the command line and in fixtures.
//!
//! Integers are JSON numbers or decimal strings, fixed-point values are
//! decimal strings, byte strings are `0x` hex, addresses are checksummed
//! base32 text (`0x` hex is also accepted on input), arrays and tuples are
//! JSON arrays, and structs are JSON objects in field order.

use alloy_primitives::U512;
use avm_abi::abi::{AbiType, AbiValue, Decimal, FieldValue, StructValue, TupleType};
use serde_json::{Map, Value};

use crate::cmd::util::{address_string, hex_string, parse_address, parse_hex};
use crate::cmd::{CliError, Result};

/// Convert JSON notation into a value shaped by `ty`.
pub(crate) fn value_from_json(json: &Value, ty: &AbiType) -> Result<AbiValue> {
	value_from_json_at(json, ty, "$")
}

/// Same as [`value_from_json`], reporting failures under `path`.
pub(crate) fn value_from_json_at(json: &Value, ty: &AbiType, path: &str) -> Result<AbiValue> {
	let mismatch = |expected: &str| CliError::JsonValue {
		path: path.to_owned(),
		expected: expected.to_owned(),
		got: json_kind(json).to_owned(),
	};

	match ty {
		AbiType::UInt(_) => json_uint(json).map(AbiValue::UInt).ok_or_else(|| mismatch("an unsigned integer")),
		AbiType::UFixed(_, precision) => {
			let text = match json {
				Value::String(text) => text.clone(),
				Value::Number(number) => number.to_string(),
				_ => return Err(mismatch("a decimal string")),
			};
			Ok(AbiValue::UFixed(Decimal::parse(&text, precision.get())?))
		}
		AbiType::Bool => json.as_bool().map(AbiValue::Bool).ok_or_else(|| mismatch("a boolean")),
		AbiType::Byte => json
			.as_u64()
			.and_then(|item| u8::try_from(item).ok())
			.map(AbiValue::Byte)
			.ok_or_else(|| mismatch("an integer in 0..=255")),
		AbiType::Address => {
			let text = json.as_str().ok_or_else(|| mismatch("an address string"))?;
			Ok(AbiValue::Address(parse_address(text)?))
		}
		AbiType::StaticBytes(_) | AbiType::DynamicBytes => {
			let text = json.as_str().ok_or_else(|| mismatch("a 0x hex string"))?;
			Ok(AbiValue::Bytes(parse_hex(text)?))
		}
		AbiType::String => json.as_str().map(AbiValue::string).ok_or_else(|| mismatch("a string")),
		AbiType::StaticArray(elem, _) | AbiType::DynamicArray(elem) => {
			let items = json.as_array().ok_or_else(|| mismatch("an array"))?;
			let values = items
				.iter()
				.enumerate()
				.map(|(idx, item)| value_from_json_at(item, elem, &format!("{path}[{idx}]")))
				.collect::<Result<Vec<_>>>()?;
			Ok(AbiValue::Array(values))
		}
		AbiType::Tuple(tuple) => match json {
			Value::Array(items) => tuple_from_array(items, tuple, path),
			Value::Object(map) => tuple_from_object(map, tuple, path),
			_ => Err(mismatch("an array or object")),
		},
	}
}

fn tuple_from_array(items: &[Value], tuple: &TupleType, path: &str) -> Result<AbiValue> {
	check_arity(items.len(), tuple, path)?;
	let values = tuple
		.fields()
		.iter()
		.zip(items)
		.enumerate()
		.map(|(idx, (field, item))| value_from_json_at(item, field.ty(), &format!("{path}[{idx}]")))
		.collect::<Result<Vec<_>>>()?;
	Ok(AbiValue::Tuple(values))
}

/// Named types match keys by field name; anonymous tuples take values in document order.
fn tuple_from_object(map: &Map<String, Value>, tuple: &TupleType, path: &str) -> Result<AbiValue> {
	check_arity(map.len(), tuple, path)?;

	let Some(type_name) = tuple.name() else {
		let values = tuple
			.fields()
			.iter()
			.zip(map)
			.map(|(field, (key, item))| value_from_json_at(item, field.ty(), &format!("{path}.{key}")))
			.collect::<Result<Vec<_>>>()?;
		return Ok(AbiValue::Tuple(values));
	};

	let mut fields = Vec::with_capacity(tuple.len());
	for field in tuple.fields() {
		let name = field.name().unwrap_or_default();
		let item = map.get(name).ok_or_else(|| CliError::JsonValue {
			path: path.to_owned(),
			expected: format!("field {name}"),
			got: "no such key".to_owned(),
		})?;
		fields.push(FieldValue::new(name, value_from_json_at(item, field.ty(), &format!("{path}.{name}"))?));
	}
	Ok(AbiValue::Struct(StructValue {
		type_name: type_name.into(),
		fields,
	}))
}

fn check_arity(got: usize, tuple: &TupleType, path: &str) -> Result<()> {
	if got != tuple.len() {
		return Err(CliError::JsonValue {
			path: path.to_owned(),
			expected: format!("{} elements", tuple.len()),
			got: format!("{got} elements"),
		});
	}
	Ok(())
}

fn json_uint(json: &Value) -> Option<U512> {
	match json {
		Value::Number(number) => number.as_u64().map(U512::from),
		Value::String(text) if !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit()) => text.parse().ok(),
		_ => None,
	}
}

fn json_kind(json: &Value) -> &'static str {
	match json {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// Render a value in JSON notation.
///
/// Integers that fit in 64 bits become JSON numbers, wider ones decimal strings.
pub(crate) fn value_to_json(value: &AbiValue) -> Value {
	match value {
		AbiValue::UInt(item) => u64::try_from(*item).map_or_else(|_| Value::String(item.to_string()), Value::from),
		AbiValue::UFixed(item) => Value::String(item.to_string()),
		AbiValue::Bool(item) => Value::Bool(*item),
		AbiValue::Byte(item) => Value::from(*item),
		AbiValue::Address(bytes) => Value::String(address_string(bytes)),
		AbiValue::Bytes(bytes) => Value::String(hex_string(bytes)),
		AbiValue::String(text) => Value::String(text.to_string()),
		AbiValue::Array(items) | AbiValue::Tuple(items) => Value::Array(items.iter().map(value_to_json).collect()),
		AbiValue::Struct(item) => Value::Object(
			item.fields
				.iter()
				.map(|field| (field.name.to_string(), value_to_json(&field.value)))
				.collect(),
		),
	}
}

use std::fmt;

use alloy_primitives::U512;

use crate::abi::{AbiError, Result};

/// Runtime value conforming to one [`AbiType`](crate::abi::AbiType).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiValue {
	/// Unsigned integer of any width up to 512 bits.
	UInt(U512),
	/// Fixed-point decimal.
	UFixed(Decimal),
	/// Boolean.
	Bool(bool),
	/// Single octet.
	Byte(u8),
	/// Raw address bytes; must be 32 bytes long to encode.
	Address(Vec<u8>),
	/// Raw byte buffer for static or dynamic byte types.
	Bytes(Vec<u8>),
	/// UTF-8 text.
	String(Box<str>),
	/// Homogeneous sequence for static and dynamic arrays.
	Array(Vec<AbiValue>),
	/// Anonymous tuple elements in order.
	Tuple(Vec<AbiValue>),
	/// Struct-shaped value with field names preserved.
	Struct(StructValue),
}

impl AbiValue {
	/// Build an unsigned integer from a machine word.
	pub fn uint(value: u64) -> Self {
		Self::UInt(U512::from(value))
	}

	/// Build a byte buffer value.
	pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
		Self::Bytes(value.into())
	}

	/// Build a text value.
	pub fn string(value: impl Into<Box<str>>) -> Self {
		Self::String(value.into())
	}

	/// Stable lowercase label of the variant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::UInt(_) => "uint",
			Self::UFixed(_) => "ufixed",
			Self::Bool(_) => "bool",
			Self::Byte(_) => "byte",
			Self::Address(_) => "address",
			Self::Bytes(_) => "bytes",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Tuple(_) => "tuple",
			Self::Struct(_) => "struct",
		}
	}

	/// Integer payload, if this is a `UInt`.
	pub fn as_uint(&self) -> Option<U512> {
		match self {
			Self::UInt(value) => Some(*value),
			_ => None,
		}
	}

	/// Byte payload of `Bytes` and `Address` values.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Bytes(value) | Self::Address(value) => Some(value),
			_ => None,
		}
	}
}

impl From<bool> for AbiValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<U512> for AbiValue {
	fn from(value: U512) -> Self {
		Self::UInt(value)
	}
}

impl From<Decimal> for AbiValue {
	fn from(value: Decimal) -> Self {
		Self::UFixed(value)
	}
}

impl From<StructValue> for AbiValue {
	fn from(value: StructValue) -> Self {
		Self::Struct(value)
	}
}

/// Decoded struct value with field names preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructValue {
	/// Struct type name.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

impl StructValue {
	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&AbiValue> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

/// Named struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: AbiValue,
}

impl FieldValue {
	/// Pair a field name with its value.
	pub fn new(name: impl Into<Box<str>>, value: AbiValue) -> Self {
		Self { name: name.into(), value }
	}
}

/// Fixed-point decimal `raw / 10^precision`.
///
/// The raw integer is the canonical payload, so no precision is lost in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
	/// Scaled integer.
	pub raw: U512,
	/// Number of decimal places.
	pub precision: u8,
}

impl Decimal {
	/// Pair a raw integer with its precision.
	pub fn new(raw: U512, precision: u8) -> Self {
		Self { raw, precision }
	}

	/// Parse decimal text such as `"1.50"` at a fixed precision.
	pub fn parse(text: &str, precision: u8) -> Result<Self> {
		let out_of_range = || AbiError::ValueOutOfRange {
			ty: format!("ufixed with precision {precision}"),
			expected: format!("a non-negative decimal with at most {precision} fractional digits"),
			got: text.to_owned(),
		};

		let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
		let digits_only = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
		if int_part.is_empty() || !digits_only(int_part) || !digits_only(frac_part) || frac_part.len() > usize::from(precision) {
			return Err(out_of_range());
		}

		let mut digits = String::with_capacity(int_part.len() + usize::from(precision));
		digits.push_str(int_part);
		digits.push_str(frac_part);
		digits.extend(std::iter::repeat_n('0', usize::from(precision) - frac_part.len()));

		let raw = digits.parse::<U512>().map_err(|_| out_of_range())?;
		Ok(Self { raw, precision })
	}
}

impl fmt::Display for Decimal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let digits = self.raw.to_string();
		let precision = usize::from(self.precision);
		if precision == 0 {
			return f.write_str(&digits);
		}

		let padded = if digits.len() <= precision {
			format!("{}{digits}", "0".repeat(precision + 1 - digits.len()))
		} else {
			digits
		};
		let split = padded.len() - precision;
		write!(f, "{}.{}", &padded[..split], &padded[split..])
	}
}

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::abi::{AbiError, Result};

/// Integer storage width in bits: a multiple of 8 in `8..=512`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth(u16);

impl BitWidth {
	/// Narrowest legal width.
	pub const MIN: usize = 8;
	/// Widest legal width.
	pub const MAX: usize = 512;

	/// Validate a bit width.
	pub fn new(bits: usize) -> Result<Self> {
		if !(Self::MIN..=Self::MAX).contains(&bits) || bits % 8 != 0 {
			return Err(AbiError::malformed(format!(
				"integer width {bits} must be a multiple of 8 in {}..={}",
				Self::MIN,
				Self::MAX
			)));
		}
		Ok(Self(bits as u16))
	}

	/// Width in bits.
	pub fn bits(self) -> usize {
		usize::from(self.0)
	}

	/// Width in encoded bytes.
	pub fn bytes(self) -> usize {
		usize::from(self.0) / 8
	}
}

/// Decimal places of a fixed-point type: `1..=160`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precision(u8);

impl Precision {
	/// Largest legal precision.
	pub const MAX: usize = 160;

	/// Validate a precision.
	pub fn new(precision: usize) -> Result<Self> {
		if precision == 0 || precision > Self::MAX {
			return Err(AbiError::malformed(format!("fixed-point precision {precision} must be in 1..={}", Self::MAX)));
		}
		Ok(Self(precision as u8))
	}

	/// Number of decimal places.
	pub fn get(self) -> u8 {
		self.0
	}
}

/// One element of a tuple, optionally named when the tuple is a struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleField {
	name: Option<Box<str>>,
	ty: AbiType,
}

impl TupleField {
	/// Field name for struct tuples.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Element type.
	pub fn ty(&self) -> &AbiType {
		&self.ty
	}
}

/// Fixed-arity heterogeneous element list.
///
/// Anonymous tuples and structs share this representation and therefore share
/// their binary layout; a struct only adds a type name and field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleType {
	name: Option<Box<str>>,
	fields: Vec<TupleField>,
}

impl TupleType {
	/// Struct type name, `None` for anonymous tuples.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Elements in declaration order.
	pub fn fields(&self) -> &[TupleField] {
		&self.fields
	}

	/// Whether elements carry field names.
	pub fn is_struct(&self) -> bool {
		self.name.is_some()
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the tuple has no elements.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<(usize, &TupleField)> {
		self.fields.iter().enumerate().find(|(_, field)| field.name() == Some(name))
	}

	pub(crate) fn element_types(&self) -> Vec<&AbiType> {
		self.fields.iter().map(|field| &field.ty).collect()
	}
}

/// Shape of an encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
	/// Unsigned integer `0 <= v < 2^bits`.
	UInt(BitWidth),
	/// Unsigned decimal `raw / 10^precision`, stored as `UInt(bits)`.
	UFixed(BitWidth, Precision),
	/// Boolean, bit-packed inside tuples and arrays.
	Bool,
	/// Single octet.
	Byte,
	/// 32 raw bytes.
	Address,
	/// Exactly `n` raw bytes.
	StaticBytes(usize),
	/// Length-prefixed raw bytes.
	DynamicBytes,
	/// Length-prefixed UTF-8 text.
	String,
	/// Exactly `n` elements.
	StaticArray(Box<AbiType>, usize),
	/// Count-prefixed elements.
	DynamicArray(Box<AbiType>),
	/// Anonymous tuple or named struct.
	Tuple(TupleType),
}

impl AbiType {
	/// Build `uint<bits>`.
	pub fn uint(bits: usize) -> Result<Self> {
		Ok(Self::UInt(BitWidth::new(bits)?))
	}

	/// Build `ufixed<bits>x<precision>`.
	pub fn ufixed(bits: usize, precision: usize) -> Result<Self> {
		Ok(Self::UFixed(BitWidth::new(bits)?, Precision::new(precision)?))
	}

	/// Build `byte[n]`.
	pub fn static_bytes(len: usize) -> Self {
		Self::StaticBytes(len)
	}

	/// Build `elem[len]`.
	pub fn static_array(elem: AbiType, len: usize) -> Self {
		Self::StaticArray(Box::new(elem), len)
	}

	/// Build `elem[]`.
	pub fn dynamic_array(elem: AbiType) -> Self {
		Self::DynamicArray(Box::new(elem))
	}

	/// Build an anonymous tuple.
	pub fn tuple(elems: Vec<AbiType>) -> Self {
		Self::Tuple(TupleType {
			name: None,
			fields: elems.into_iter().map(|ty| TupleField { name: None, ty }).collect(),
		})
	}

	/// Build a named struct; field names must be non-empty and unique.
	pub fn struct_of<N, F>(name: N, fields: Vec<(F, AbiType)>) -> Result<Self>
	where
		N: Into<Box<str>>,
		F: Into<Box<str>>,
	{
		let name = name.into();
		if name.is_empty() {
			return Err(AbiError::malformed("struct name must not be empty"));
		}

		let mut seen = HashSet::with_capacity(fields.len());
		let mut out = Vec::with_capacity(fields.len());
		for (field, ty) in fields {
			let field = field.into();
			if field.is_empty() {
				return Err(AbiError::malformed(format!("struct {name} has an empty field name")));
			}
			if !seen.insert(field.clone()) {
				return Err(AbiError::malformed(format!("struct {name} has duplicate field {field}")));
			}
			out.push(TupleField { name: Some(field), ty });
		}

		Ok(Self::Tuple(TupleType { name: Some(name), fields: out }))
	}

	/// Whether the encoded width depends on the value.
	pub fn is_dynamic(&self) -> bool {
		match self {
			Self::DynamicBytes | Self::String | Self::DynamicArray(_) => true,
			Self::StaticArray(elem, _) => elem.is_dynamic(),
			Self::Tuple(tuple) => tuple.fields.iter().any(|field| field.ty.is_dynamic()),
			Self::UInt(_) | Self::UFixed(..) | Self::Bool | Self::Byte | Self::Address | Self::StaticBytes(_) => false,
		}
	}

	/// Encoded width of a static type; `None` for dynamic types and for
	/// widths that do not fit in `usize`.
	pub fn static_byte_width(&self) -> Option<usize> {
		match self {
			Self::UInt(bits) | Self::UFixed(bits, _) => Some(bits.bytes()),
			Self::Bool | Self::Byte => Some(1),
			Self::Address => Some(32),
			Self::StaticBytes(len) => Some(*len),
			Self::DynamicBytes | Self::String | Self::DynamicArray(_) => None,
			Self::StaticArray(elem, len) => {
				if **elem == Self::Bool {
					return Some(len.div_ceil(8));
				}
				elem.static_byte_width()?.checked_mul(*len)
			}
			Self::Tuple(tuple) => {
				let types = tuple.element_types();
				let mut width = 0_usize;
				for slot in head_slots(&types) {
					let slot_width = match slot {
						Slot::Offset { .. } => return None,
						Slot::Inline { index, .. } => types[index].static_byte_width()?,
						Slot::Bools { .. } => slot.width(),
					};
					width = width.checked_add(slot_width)?;
				}
				Some(width)
			}
		}
	}

	/// Canonical ARC-4 type string.
	pub fn canonical(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for AbiType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UInt(bits) => write!(f, "uint{}", bits.bits()),
			Self::UFixed(bits, precision) => write!(f, "ufixed{}x{}", bits.bits(), precision.get()),
			Self::Bool => f.write_str("bool"),
			Self::Byte => f.write_str("byte"),
			Self::Address => f.write_str("address"),
			Self::StaticBytes(len) => write!(f, "byte[{len}]"),
			Self::DynamicBytes => f.write_str("byte[]"),
			Self::String => f.write_str("string"),
			Self::StaticArray(elem, len) => write!(f, "{elem}[{len}]"),
			Self::DynamicArray(elem) => write!(f, "{elem}[]"),
			Self::Tuple(tuple) => {
				f.write_str("(")?;
				for (idx, field) in tuple.fields.iter().enumerate() {
					if idx > 0 {
						f.write_str(",")?;
					}
					write!(f, "{}", field.ty)?;
				}
				f.write_str(")")
			}
		}
	}
}

impl FromStr for AbiType {
	type Err = AbiError;

	fn from_str(input: &str) -> Result<Self> {
		parse_type(input, input)
	}
}

fn parse_type(text: &str, input: &str) -> Result<AbiType> {
	let invalid = |reason| AbiError::InvalidTypeString {
		input: input.to_owned(),
		reason,
	};

	if text.is_empty() {
		return Err(invalid("empty type"));
	}

	if let Some(head) = text.strip_suffix(']') {
		let open = head.rfind('[').ok_or_else(|| invalid("unbalanced brackets"))?;
		let len_text = &head[open + 1..];
		let elem = parse_type(&head[..open], input)?;

		if len_text.is_empty() {
			return Ok(match elem {
				AbiType::Byte => AbiType::DynamicBytes,
				other => AbiType::dynamic_array(other),
			});
		}
		if let Some(negative) = len_text.strip_prefix('-')
			&& !negative.is_empty()
			&& negative.bytes().all(|byte| byte.is_ascii_digit())
		{
			return Err(AbiError::malformed(format!("array length -{negative} is negative")));
		}
		let len = parse_decimal(len_text).ok_or_else(|| invalid("array length is not a decimal integer"))?;

		return Ok(match elem {
			AbiType::Byte => AbiType::StaticBytes(len),
			other => AbiType::static_array(other, len),
		});
	}

	if let Some(inner) = text.strip_prefix('(') {
		let inner = inner.strip_suffix(')').ok_or_else(|| invalid("unbalanced parentheses"))?;
		let elems = split_top_level(inner).ok_or_else(|| invalid("unbalanced parentheses"))?;
		let mut types = Vec::with_capacity(elems.len());
		for elem in elems {
			types.push(parse_type(elem, input)?);
		}
		return Ok(AbiType::tuple(types));
	}

	match text {
		"bool" => return Ok(AbiType::Bool),
		"byte" => return Ok(AbiType::Byte),
		"address" => return Ok(AbiType::Address),
		"string" => return Ok(AbiType::String),
		_ => {}
	}

	if let Some(bits) = text.strip_prefix("ufixed") {
		let (bits, precision) = bits.split_once('x').ok_or_else(|| invalid("ufixed needs <bits>x<precision>"))?;
		let bits = parse_decimal(bits).ok_or_else(|| invalid("ufixed width is not a decimal integer"))?;
		let precision = parse_decimal(precision).ok_or_else(|| invalid("ufixed precision is not a decimal integer"))?;
		return AbiType::ufixed(bits, precision);
	}

	if let Some(bits) = text.strip_prefix("uint") {
		let bits = parse_decimal(bits).ok_or_else(|| invalid("uint width is not a decimal integer"))?;
		return AbiType::uint(bits);
	}

	Err(invalid("unknown type name"))
}

fn parse_decimal(text: &str) -> Option<usize> {
	if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	text.parse().ok()
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(text: &str) -> Option<Vec<&str>> {
	if text.is_empty() {
		return Some(Vec::new());
	}

	let mut out = Vec::new();
	let mut depth = 0_usize;
	let mut start = 0;
	for (idx, ch) in text.char_indices() {
		match ch {
			'(' => depth += 1,
			')' => depth = depth.checked_sub(1)?,
			',' if depth == 0 => {
				out.push(&text[start..idx]);
				start = idx + 1;
			}
			_ => {}
		}
	}
	if depth != 0 {
		return None;
	}
	out.push(&text[start..]);
	Some(out)
}

/// One head slot of a head/tail layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
	/// `len` consecutive bools starting at element `start`, packed MSB first.
	Bools { start: usize, len: usize },
	/// Static element stored inline.
	Inline { index: usize, width: usize },
	/// Dynamic element referenced by a 2-byte offset into the tail.
	Offset { index: usize },
}

impl Slot {
	pub(crate) fn width(self) -> usize {
		match self {
			Self::Bools { len, .. } => len.div_ceil(8),
			Self::Inline { width, .. } => width,
			Self::Offset { .. } => 2,
		}
	}
}

/// Lay out the head of a fixed-arity element list.
pub(crate) fn head_slots(types: &[&AbiType]) -> Vec<Slot> {
	let mut slots = Vec::with_capacity(types.len());
	let mut idx = 0;
	while idx < types.len() {
		if *types[idx] == AbiType::Bool {
			let start = idx;
			while idx < types.len() && *types[idx] == AbiType::Bool {
				idx += 1;
			}
			slots.push(Slot::Bools { start, len: idx - start });
			continue;
		}

		// Static widths past `usize` saturate so `head_width` reports the overflow.
		slots.push(if types[idx].is_dynamic() {
			Slot::Offset { index: idx }
		} else {
			Slot::Inline { index: idx, width: types[idx].static_byte_width().unwrap_or(usize::MAX) }
		});
		idx += 1;
	}
	slots
}

/// Total head width, or `None` when it overflows `usize`.
pub(crate) fn head_width(slots: &[Slot]) -> Option<usize> {
	slots.iter().try_fold(0_usize, |total, slot| total.checked_add(slot.width()))
}

/// Path label of one element, as used in error context.
pub(crate) fn element_label(tuple: Option<&TupleType>, index: usize) -> String {
	match tuple.and_then(|tuple| tuple.fields.get(index)).and_then(TupleField::name) {
		Some(name) => format!(".{name}"),
		None => format!("[{index}]"),
	}
}

#[cfg(test)]
mod tests;

use alloy_primitives::U512;
use tracing::{debug, trace};

use crate::abi::bytes::Cursor;
use crate::abi::ty::{BitWidth, Slot, TupleType, element_label, head_slots, head_width};
use crate::abi::value::{Decimal, FieldValue, StructValue};
use crate::abi::{AbiError, AbiType, AbiValue, MAX_U16_FIELD, Result};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum element count accepted from a dynamic array prefix, and from a
	/// static array whose elements take no bytes.
	pub max_array_elems: usize,
	/// Accept bytes left over after the top-level value.
	pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_array_elems: MAX_U16_FIELD,
			allow_trailing_bytes: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that tolerates trailing bytes after the top-level value.
	pub fn lenient() -> Self {
		Self {
			allow_trailing_bytes: true,
			..Self::default()
		}
	}
}

/// Decode `bytes` against `ty`, requiring the whole buffer to be consumed.
pub fn decode(bytes: &[u8], ty: &AbiType) -> Result<AbiValue> {
	decode_with(bytes, ty, &DecodeOptions::default())
}

/// Decode `bytes` against `ty` with explicit options.
pub fn decode_with(bytes: &[u8], ty: &AbiType, opt: &DecodeOptions) -> Result<AbiValue> {
	let mut cursor = Cursor::new(bytes);
	let value = decode_value(&mut cursor, ty, opt).and_then(|value| {
		if cursor.remaining() > 0 && !opt.allow_trailing_bytes {
			return Err(AbiError::TrailingBytes {
				ty: ty.to_string(),
				expected: cursor.pos(),
				actual: bytes.len(),
			});
		}
		Ok(value)
	});

	match value {
		Ok(value) => {
			trace!(ty = %ty, len = bytes.len(), "decoded value");
			Ok(value)
		}
		Err(err) => {
			debug!(ty = %ty, len = bytes.len(), error = %err, "decode rejected");
			Err(err)
		}
	}
}

fn decode_value(cursor: &mut Cursor<'_>, ty: &AbiType, opt: &DecodeOptions) -> Result<AbiValue> {
	match ty {
		AbiType::UInt(bits) => Ok(AbiValue::UInt(read_uint(cursor, *bits)?)),
		AbiType::UFixed(bits, precision) => Ok(AbiValue::UFixed(Decimal::new(read_uint(cursor, *bits)?, precision.get()))),
		AbiType::Bool => {
			let at = cursor.abs_pos();
			let raw = cursor.read_exact(1)?;
			Ok(AbiValue::Bool(unpack_bools(raw, 1, at)?[0]))
		}
		AbiType::Byte => Ok(AbiValue::Byte(cursor.read_u8()?)),
		AbiType::Address => Ok(AbiValue::Address(cursor.read_exact(32)?.to_vec())),
		AbiType::StaticBytes(len) => Ok(AbiValue::Bytes(cursor.read_exact(*len)?.to_vec())),
		AbiType::DynamicBytes => Ok(AbiValue::Bytes(read_prefixed(cursor)?.to_vec())),
		AbiType::String => {
			let at = cursor.abs_pos() + 2;
			let raw = read_prefixed(cursor)?;
			let text = std::str::from_utf8(raw).map_err(|_| AbiError::InvalidUtf8 { at })?;
			Ok(AbiValue::String(text.into()))
		}
		AbiType::StaticArray(elem, len) => {
			check_element_budget(cursor, elem, *len, opt)?;
			let types = vec![elem.as_ref(); *len];
			Ok(AbiValue::Array(decode_sequence(cursor, &types, None, opt)?))
		}
		AbiType::DynamicArray(elem) => {
			let count = usize::from(cursor.read_u16_be()?);
			if count > opt.max_array_elems {
				return Err(AbiError::ArrayTooLarge {
					count,
					max: opt.max_array_elems,
				});
			}
			let types = vec![elem.as_ref(); count];
			Ok(AbiValue::Array(decode_sequence(cursor, &types, None, opt)?))
		}
		AbiType::Tuple(tuple) => {
			let values = decode_sequence(cursor, &tuple.element_types(), Some(tuple), opt)?;
			let Some(type_name) = tuple.name() else {
				return Ok(AbiValue::Tuple(values));
			};
			let fields = tuple
				.fields()
				.iter()
				.zip(values)
				.map(|(field, value)| FieldValue::new(field.name().unwrap_or_default(), value))
				.collect();
			Ok(AbiValue::Struct(StructValue {
				type_name: type_name.into(),
				fields,
			}))
		}
	}
}

fn read_uint(cursor: &mut Cursor<'_>, bits: BitWidth) -> Result<U512> {
	let raw = cursor.read_exact(bits.bytes())?;
	let mut be = [0_u8; 64];
	be[64 - raw.len()..].copy_from_slice(raw);
	Ok(U512::from_be_bytes(be))
}

fn read_prefixed<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8]> {
	let len = usize::from(cursor.read_u16_be()?);
	cursor.read_exact(len)
}

/// Reject a static element count before allocating per-element state.
///
/// Every element needs at least its head width, so a count whose heads cannot fit the
/// remaining bytes fails as truncated input. Zero-width elements fall back to the array
/// ceiling.
fn check_element_budget(cursor: &Cursor<'_>, elem: &AbiType, count: usize, opt: &DecodeOptions) -> Result<()> {
	let need = if *elem == AbiType::Bool {
		Some(count.div_ceil(8))
	} else if elem.is_dynamic() {
		count.checked_mul(2)
	} else {
		elem.static_byte_width().and_then(|width| width.checked_mul(count))
	};

	match need {
		Some(0) if count > opt.max_array_elems => Err(AbiError::ArrayTooLarge {
			count,
			max: opt.max_array_elems,
		}),
		Some(need) if need <= cursor.remaining() => Ok(()),
		need => Err(AbiError::TruncatedInput {
			at: cursor.abs_pos(),
			need: need.unwrap_or(usize::MAX),
			rem: cursor.remaining(),
		}),
	}
}

struct PendingTail {
	index: usize,
	offset: usize,
	at: usize,
}

/// Head/tail decoding of a fixed-arity element list starting at the cursor.
///
/// Offsets are relative to the list start. The first tail element must begin right after
/// the head and every following element right after its predecessor, so any buffer this
/// accepts re-encodes to the same bytes.
fn decode_sequence(cursor: &mut Cursor<'_>, types: &[&AbiType], tuple: Option<&TupleType>, opt: &DecodeOptions) -> Result<Vec<AbiValue>> {
	let mut region = cursor.rest();
	let slots = head_slots(types);
	let head_len = head_width(&slots).unwrap_or(usize::MAX);
	if head_len > region.remaining() {
		return Err(AbiError::TruncatedInput {
			at: region.abs_pos(),
			need: head_len,
			rem: region.remaining(),
		});
	}

	let mut values: Vec<Option<AbiValue>> = (0..types.len()).map(|_| None).collect();
	let mut pending: Vec<PendingTail> = Vec::new();

	for slot in slots {
		match slot {
			Slot::Bools { start, len } => {
				let at = region.abs_pos();
				let raw = region.read_exact(slot.width())?;
				for (idx, bit) in unpack_bools(raw, len, at)?.into_iter().enumerate() {
					values[start + idx] = Some(AbiValue::Bool(bit));
				}
			}
			Slot::Inline { index, width } => {
				let mut elem = region.take_region(width)?;
				let value = decode_value(&mut elem, types[index], opt).map_err(|err| err.in_element(element_label(tuple, index)))?;
				values[index] = Some(value);
			}
			Slot::Offset { index } => {
				let at = region.abs_pos();
				let offset = usize::from(region.read_u16_be()?);
				let min = pending.last().map_or(head_len, |prev| prev.offset);
				let max = region.len();
				if offset < min || offset > max {
					return Err(AbiError::OffsetOutOfBounds { at, offset, min, max }.in_element(element_label(tuple, index)));
				}
				pending.push(PendingTail { index, offset, at });
			}
		}
	}

	let mut end = head_len;
	for tail in pending {
		if tail.offset != end {
			return Err(AbiError::OffsetOutOfBounds {
				at: tail.at,
				offset: tail.offset,
				min: end,
				max: end,
			}
			.in_element(element_label(tuple, tail.index)));
		}
		let mut elem = region.region(tail.offset, region.len())?;
		let value = decode_value(&mut elem, types[tail.index], opt).map_err(|err| err.in_element(element_label(tuple, tail.index)))?;
		values[tail.index] = Some(value);
		end = tail.offset + elem.pos();
	}

	let _ = cursor.read_exact(end)?;
	values
		.into_iter()
		.collect::<Option<Vec<_>>>()
		.ok_or_else(|| AbiError::malformed("head layout does not cover every element"))
}

/// Unpack `len` bools stored MSB first; padding bits must be zero.
pub(crate) fn unpack_bools(raw: &[u8], len: usize, at: usize) -> Result<Vec<bool>> {
	let used_in_last = len - 8 * (raw.len().saturating_sub(1));
	if let Some(last) = raw.last() {
		let padding = 0xff_u8.checked_shr(used_in_last as u32).unwrap_or(0);
		if last & padding != 0 {
			return Err(AbiError::NonCanonicalBool {
				at: at + raw.len() - 1,
				byte: *last,
			});
		}
	}

	Ok((0..len).map(|idx| raw[idx / 8] & (0x80 >> (idx % 8)) != 0).collect())
}

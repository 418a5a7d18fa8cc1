use alloy_primitives::U512;
use tracing::trace;

use crate::abi::ty::{BitWidth, Slot, TupleType, element_label, head_slots, head_width};
use crate::abi::{AbiError, AbiType, AbiValue, LengthBound, MAX_U16_FIELD, Result};

/// Encode `value` against `ty`.
///
/// Output is deterministic: equal inputs always produce identical bytes, and decoding the
/// output against the same type yields `value` again.
pub fn encode(value: &AbiValue, ty: &AbiType) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(ty.static_byte_width().map_or(64, |width| width.min(MAX_U16_FIELD)));
	encode_into(&mut out, value, ty)?;
	trace!(ty = %ty, len = out.len(), "encoded value");
	Ok(out)
}

fn encode_into(out: &mut Vec<u8>, value: &AbiValue, ty: &AbiType) -> Result<()> {
	match (ty, value) {
		(AbiType::UInt(bits), AbiValue::UInt(raw)) => encode_uint(out, *raw, *bits, ty),
		(AbiType::UFixed(bits, precision), AbiValue::UFixed(decimal)) => {
			if decimal.precision != precision.get() {
				return Err(AbiError::mismatch(ty, format_args!("ufixed with precision {}", decimal.precision)));
			}
			encode_uint(out, decimal.raw, *bits, ty)
		}
		(AbiType::Bool, AbiValue::Bool(bit)) => {
			out.push(pack_bools(&[*bit])[0]);
			Ok(())
		}
		(AbiType::Byte, AbiValue::Byte(byte)) => {
			out.push(*byte);
			Ok(())
		}
		(AbiType::Address, AbiValue::Address(bytes)) => {
			if bytes.len() != 32 {
				return Err(AbiError::ValueOutOfRange {
					ty: ty.to_string(),
					expected: "32 bytes".to_owned(),
					got: format!("{} bytes", bytes.len()),
				});
			}
			out.extend_from_slice(bytes);
			Ok(())
		}
		(AbiType::StaticBytes(len), AbiValue::Bytes(bytes)) => {
			if bytes.len() != *len {
				return Err(AbiError::LengthMismatch {
					ty: ty.to_string(),
					expected: LengthBound::Exactly(*len),
					actual: bytes.len(),
				});
			}
			out.extend_from_slice(bytes);
			Ok(())
		}
		(AbiType::DynamicBytes, AbiValue::Bytes(bytes)) => encode_prefixed(out, bytes, ty),
		(AbiType::String, AbiValue::String(text)) => encode_prefixed(out, text.as_bytes(), ty),
		(AbiType::StaticArray(elem, len), AbiValue::Array(items)) => {
			if items.len() != *len {
				return Err(AbiError::LengthMismatch {
					ty: ty.to_string(),
					expected: LengthBound::Exactly(*len),
					actual: items.len(),
				});
			}
			let types = vec![elem.as_ref(); *len];
			encode_sequence(out, &types, &items.iter().collect::<Vec<_>>(), None)
		}
		(AbiType::DynamicArray(elem), AbiValue::Array(items)) => {
			let count = u16::try_from(items.len()).map_err(|_| AbiError::LengthMismatch {
				ty: ty.to_string(),
				expected: LengthBound::AtMost(MAX_U16_FIELD),
				actual: items.len(),
			})?;
			out.extend_from_slice(&count.to_be_bytes());
			let types = vec![elem.as_ref(); items.len()];
			encode_sequence(out, &types, &items.iter().collect::<Vec<_>>(), None)
		}
		(AbiType::Tuple(tuple), AbiValue::Tuple(items)) => {
			check_arity(ty, tuple, items.len())?;
			encode_sequence(out, &tuple.element_types(), &items.iter().collect::<Vec<_>>(), Some(tuple))
		}
		(AbiType::Tuple(tuple), AbiValue::Struct(item)) => {
			check_arity(ty, tuple, item.fields.len())?;
			for (field, value) in tuple.fields().iter().zip(&item.fields) {
				if let Some(name) = field.name()
					&& name != value.name.as_ref()
				{
					return Err(AbiError::mismatch(format_args!("field {name}"), format_args!("field {}", value.name)));
				}
			}
			let items: Vec<&AbiValue> = item.fields.iter().map(|field| &field.value).collect();
			encode_sequence(out, &tuple.element_types(), &items, Some(tuple))
		}
		_ => Err(AbiError::mismatch(ty, value.kind_name())),
	}
}

fn encode_uint(out: &mut Vec<u8>, raw: U512, bits: BitWidth, ty: &AbiType) -> Result<()> {
	if raw.bit_len() > bits.bits() {
		return Err(AbiError::ValueOutOfRange {
			ty: ty.to_string(),
			expected: format!("< 2^{}", bits.bits()),
			got: raw.to_string(),
		});
	}
	let be = raw.to_be_bytes::<64>();
	out.extend_from_slice(&be[64 - bits.bytes()..]);
	Ok(())
}

fn encode_prefixed(out: &mut Vec<u8>, bytes: &[u8], ty: &AbiType) -> Result<()> {
	let len = u16::try_from(bytes.len()).map_err(|_| AbiError::LengthMismatch {
		ty: ty.to_string(),
		expected: LengthBound::AtMost(MAX_U16_FIELD),
		actual: bytes.len(),
	})?;
	out.extend_from_slice(&len.to_be_bytes());
	out.extend_from_slice(bytes);
	Ok(())
}

fn check_arity(ty: &AbiType, tuple: &TupleType, got: usize) -> Result<()> {
	if got != tuple.len() {
		return Err(AbiError::mismatch(
			format_args!("{ty} with {} elements", tuple.len()),
			format_args!("{got} elements"),
		));
	}
	Ok(())
}

fn sequence_label(types: &[&AbiType]) -> String {
	let inner: Vec<String> = types.iter().map(ToString::to_string).collect();
	format!("({})", inner.join(","))
}

/// Head/tail encoding of a fixed-arity element list.
fn encode_sequence(out: &mut Vec<u8>, types: &[&AbiType], items: &[&AbiValue], tuple: Option<&TupleType>) -> Result<()> {
	let slots = head_slots(types);
	let head_len = head_width(&slots).ok_or_else(|| AbiError::ValueOutOfRange {
		ty: sequence_label(types),
		expected: "a head width addressable in memory".to_owned(),
		got: "a head width past usize".to_owned(),
	})?;
	let mut head = Vec::with_capacity(head_len.min(MAX_U16_FIELD));
	let mut tail = Vec::new();

	for slot in slots {
		match slot {
			Slot::Bools { start, len } => {
				let mut bits = Vec::with_capacity(len);
				for index in start..start + len {
					match items[index] {
						AbiValue::Bool(bit) => bits.push(*bit),
						other => return Err(AbiError::mismatch("bool", other.kind_name()).in_element(element_label(tuple, index))),
					}
				}
				head.extend_from_slice(&pack_bools(&bits));
			}
			Slot::Inline { index, .. } => {
				encode_into(&mut head, items[index], types[index]).map_err(|err| err.in_element(element_label(tuple, index)))?;
			}
			Slot::Offset { index } => {
				let offset = head_len + tail.len();
				let offset = u16::try_from(offset).map_err(|_| {
					AbiError::LengthMismatch {
						ty: types[index].to_string(),
						expected: LengthBound::AtMost(MAX_U16_FIELD),
						actual: offset,
					}
					.in_element(element_label(tuple, index))
				})?;
				head.extend_from_slice(&offset.to_be_bytes());
				encode_into(&mut tail, items[index], types[index]).map_err(|err| err.in_element(element_label(tuple, index)))?;
			}
		}
	}

	out.extend_from_slice(&head);
	out.extend_from_slice(&tail);
	Ok(())
}

/// Pack bools eight per byte, most-significant bit first, zero-padding the last byte.
pub(crate) fn pack_bools(bits: &[bool]) -> Vec<u8> {
	let mut packed = vec![0_u8; bits.len().div_ceil(8)];
	for (idx, bit) in bits.iter().enumerate() {
		if *bit {
			packed[idx / 8] |= 0x80 >> (idx % 8);
		}
	}
	packed
}

#[cfg(test)]
mod tests;

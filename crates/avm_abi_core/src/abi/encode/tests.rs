use alloy_primitives::U512;
use rstest::rstest;

use super::pack_bools;
use crate::abi::{AbiError, AbiType, AbiValue, Decimal, FieldValue, LengthBound, StructValue, encode};

fn uint(bits: usize) -> AbiType {
	AbiType::uint(bits).expect("valid width")
}

fn struct1() -> AbiType {
	AbiType::struct_of("Struct1", vec![("address", AbiType::Address), ("uint256", uint(256))]).expect("struct builds")
}

#[rstest]
#[case(0, "00")]
#[case(1, "01")]
#[case(255, "ff")]
fn uint8_boundaries(#[case] value: u64, #[case] expected: &str) {
	let out = encode(&AbiValue::uint(value), &uint(8)).expect("uint8 encodes");
	assert_eq!(hex::encode(out), expected);
}

#[test]
fn uint8_rejects_256() {
	let err = encode(&AbiValue::uint(256), &uint(8)).expect_err("256 does not fit");
	assert!(matches!(err, AbiError::ValueOutOfRange { .. }));
}

#[test]
fn uint512_extremes() {
	let ty = uint(512);
	assert_eq!(encode(&AbiValue::UInt(U512::ZERO), &ty).expect("zero encodes"), vec![0_u8; 64]);
	assert_eq!(encode(&AbiValue::UInt(U512::MAX), &ty).expect("max encodes"), vec![0xff_u8; 64]);
}

#[test]
fn uint64_is_big_endian() {
	let out = encode(&AbiValue::uint(0x0102_0304_0506_0708), &uint(64)).expect("uint64 encodes");
	assert_eq!(hex::encode(out), "0102030405060708");
}

#[test]
fn ufixed_encodes_raw_integer() {
	let ty = AbiType::ufixed(64, 2).expect("ufixed64x2 builds");
	let value = AbiValue::UFixed(Decimal::parse("1.50", 2).expect("decimal parses"));
	assert_eq!(hex::encode(encode(&value, &ty).expect("ufixed encodes")), "0000000000000096");

	let wrong_precision = AbiValue::UFixed(Decimal::new(U512::from(150_u64), 3));
	let err = encode(&wrong_precision, &ty).expect_err("precision must match");
	assert!(matches!(err, AbiError::ValueTypeMismatch { .. }));
}

#[test]
fn standalone_bool_is_one_byte() {
	assert_eq!(encode(&AbiValue::Bool(true), &AbiType::Bool).expect("true encodes"), vec![0x80]);
	assert_eq!(encode(&AbiValue::Bool(false), &AbiType::Bool).expect("false encodes"), vec![0x00]);
}

#[rstest]
#[case(0, "")]
#[case(1, "80")]
#[case(7, "aa")]
#[case(8, "aa")]
#[case(9, "aa80")]
#[case(16, "aaaa")]
fn bool_runs_pack_msb_first(#[case] len: usize, #[case] expected: &str) {
	let bits: Vec<AbiValue> = (0..len).map(|idx| AbiValue::Bool(idx % 2 == 0)).collect();

	let static_ty = AbiType::static_array(AbiType::Bool, len);
	let out = encode(&AbiValue::Array(bits.clone()), &static_ty).expect("static bool array encodes");
	assert_eq!(hex::encode(&out), expected);
	assert_eq!(static_ty.static_byte_width(), Some(out.len()));

	let dynamic_ty = AbiType::dynamic_array(AbiType::Bool);
	let out = encode(&AbiValue::Array(bits.clone()), &dynamic_ty).expect("dynamic bool array encodes");
	assert_eq!(hex::encode(&out), format!("{len:04x}{expected}"));

	let tuple_ty = AbiType::tuple(vec![AbiType::Bool; len]);
	let out = encode(&AbiValue::Tuple(bits), &tuple_ty).expect("bool tuple encodes");
	assert_eq!(hex::encode(&out), expected);
}

#[test]
fn bool_run_is_split_by_other_elements() {
	let ty = AbiType::tuple(vec![AbiType::Bool, AbiType::Bool, uint(8), AbiType::Bool]);
	let value = AbiValue::Tuple(vec![AbiValue::Bool(true), AbiValue::Bool(true), AbiValue::uint(7), AbiValue::Bool(true)]);
	assert_eq!(hex::encode(encode(&value, &ty).expect("tuple encodes")), "c00780");
}

#[test]
fn pack_bools_zero_pads_last_byte() {
	assert_eq!(pack_bools(&[true, false, true]), vec![0b1010_0000]);
	assert_eq!(pack_bools(&[]), Vec::<u8>::new());
}

#[test]
fn dynamic_bytes_length_prefix() {
	assert_eq!(encode(&AbiValue::bytes(Vec::new()), &AbiType::DynamicBytes).expect("empty encodes"), vec![0, 0]);

	let payload = vec![0x5a_u8; 1018];
	let out = encode(&AbiValue::bytes(payload.clone()), &AbiType::DynamicBytes).expect("1018 bytes encode");
	assert_eq!(&out[..2], &[0x03, 0xfa]);
	assert_eq!(&out[2..], payload.as_slice());
}

#[test]
fn dynamic_bytes_over_u16_fails() {
	let err = encode(&AbiValue::bytes(vec![0_u8; 65536]), &AbiType::DynamicBytes).expect_err("too long");
	assert!(matches!(
		err,
		AbiError::LengthMismatch {
			expected: LengthBound::AtMost(65535),
			actual: 65536,
			..
		}
	));
}

#[test]
fn string_uses_bytes_layout() {
	let out = encode(&AbiValue::string("Hello"), &AbiType::String).expect("string encodes");
	assert_eq!(hex::encode(out), "000548656c6c6f");
}

#[test]
fn static_bytes_are_verbatim() {
	let ty = AbiType::static_bytes(8);
	assert_eq!(encode(&AbiValue::bytes(*b"12345678"), &ty).expect("8 bytes encode"), b"12345678".to_vec());

	let err = encode(&AbiValue::bytes(*b"1234567"), &ty).expect_err("7 bytes rejected");
	assert!(matches!(
		err,
		AbiError::LengthMismatch {
			expected: LengthBound::Exactly(8),
			actual: 7,
			..
		}
	));
}

#[test]
fn address_must_be_32_bytes() {
	let addr = vec![0xab_u8; 32];
	assert_eq!(encode(&AbiValue::Address(addr.clone()), &AbiType::Address).expect("address encodes"), addr);

	let err = encode(&AbiValue::Address(vec![0_u8; 31]), &AbiType::Address).expect_err("short address rejected");
	assert!(matches!(err, AbiError::ValueOutOfRange { .. }));
}

#[test]
fn tuple_head_offset_points_past_head() {
	let ty = AbiType::tuple(vec![uint(8), AbiType::DynamicBytes]);
	let value = AbiValue::Tuple(vec![AbiValue::uint(1), AbiValue::bytes(Vec::new())]);
	let out = encode(&value, &ty).expect("tuple encodes");
	assert_eq!(out, vec![0x01, 0x00, 0x03, 0x00, 0x00]);
}

#[test]
fn tail_offsets_accumulate() {
	let ty = AbiType::tuple(vec![AbiType::DynamicBytes, uint(16), AbiType::String]);
	let value = AbiValue::Tuple(vec![AbiValue::bytes(vec![0xaa, 0xbb]), AbiValue::uint(5), AbiValue::string("hi")]);
	let out = encode(&value, &ty).expect("tuple encodes");
	assert_eq!(hex::encode(out), "00060005000a0002aabb00026869");
}

#[test]
fn struct_and_tuple_encode_identically() {
	let addr = vec![0x11_u8; 32];
	let named = AbiValue::Struct(StructValue {
		type_name: "Struct1".into(),
		fields: vec![FieldValue::new("address", AbiValue::Address(addr.clone())), FieldValue::new("uint256", AbiValue::uint(1))],
	});
	let anonymous = AbiValue::Tuple(vec![AbiValue::Address(addr), AbiValue::uint(1)]);
	let tuple_ty = AbiType::tuple(vec![AbiType::Address, uint(256)]);

	let from_struct = encode(&named, &struct1()).expect("struct encodes");
	assert_eq!(from_struct.len(), 64);
	assert_eq!(from_struct, encode(&anonymous, &tuple_ty).expect("tuple encodes"));
	assert_eq!(from_struct, encode(&anonymous, &struct1()).expect("tuple value against struct type encodes"));
	assert_eq!(from_struct, encode(&named, &tuple_ty).expect("struct value against tuple type encodes"));
}

#[test]
fn struct_field_names_must_match() {
	let value = AbiValue::Struct(StructValue {
		type_name: "Struct1".into(),
		fields: vec![FieldValue::new("owner", AbiValue::Address(vec![0; 32])), FieldValue::new("uint256", AbiValue::uint(1))],
	});
	let err = encode(&value, &struct1()).expect_err("field name mismatch");
	assert!(matches!(err, AbiError::ValueTypeMismatch { .. }));
}

#[test]
fn nested_error_reports_element_path() {
	let inner = AbiType::struct_of("Inner", vec![("num", uint(8))]).expect("struct builds");
	let ty = AbiType::tuple(vec![AbiType::Bool, AbiType::dynamic_array(inner)]);
	let bad = AbiValue::Struct(StructValue {
		type_name: "Inner".into(),
		fields: vec![FieldValue::new("num", AbiValue::uint(300))],
	});
	let value = AbiValue::Tuple(vec![AbiValue::Bool(true), AbiValue::Array(vec![bad])]);

	let err = encode(&value, &ty).expect_err("300 does not fit uint8");
	assert_eq!(err.path(), Some("[1][0].num"));
	assert!(matches!(err.root(), AbiError::ValueOutOfRange { .. }));
}

#[test]
fn static_array_count_must_match() {
	let ty = AbiType::static_array(uint(8), 3);
	let err = encode(&AbiValue::Array(vec![AbiValue::uint(1)]), &ty).expect_err("wrong count");
	assert!(matches!(err, AbiError::LengthMismatch { .. }));
}

#[test]
fn zero_length_static_array_is_empty() {
	let ty = AbiType::static_array(AbiType::DynamicBytes, 0);
	assert!(encode(&AbiValue::Array(Vec::new()), &ty).expect("empty array encodes").is_empty());
}

#[test]
fn overflowing_head_width_is_an_error() {
	let wide = AbiType::static_array(uint(8), 1 << 63);
	let ty = AbiType::tuple(vec![wide.clone(), wide]);
	let value = AbiValue::Tuple(vec![AbiValue::Array(Vec::new()), AbiValue::Array(Vec::new())]);
	let err = encode(&value, &ty).expect_err("head width overflows");
	assert!(matches!(err, AbiError::ValueOutOfRange { .. }));

	let huge = AbiType::static_array(uint(8), usize::MAX / 16);
	let err = encode(&AbiValue::Array(Vec::new()), &huge).expect_err("count mismatch");
	assert!(matches!(err, AbiError::LengthMismatch { .. }));
}

#[test]
fn address_needs_an_address_value() {
	let err = encode(&AbiValue::bytes(vec![0_u8; 32]), &AbiType::Address).expect_err("bytes are not an address");
	let AbiError::ValueTypeMismatch { expected, got } = err else {
		panic!("expected ValueTypeMismatch");
	};
	assert_eq!(expected, "address");
	assert_eq!(got, AbiValue::bytes(vec![0_u8; 32]).kind_name());
}

#[test]
fn wrong_value_kind_is_a_mismatch() {
	let err = encode(&AbiValue::Bool(true), &uint(64)).expect_err("bool against uint64");
	let AbiError::ValueTypeMismatch { expected, got } = err else {
		panic!("expected ValueTypeMismatch");
	};
	assert_eq!(expected, "uint64");
	assert_eq!(got, "bool");
}

#[test]
fn encoding_is_deterministic() {
	let ty: AbiType = "(address,(uint8,uint8),bool[3],string[])".parse().expect("type parses");
	let value = AbiValue::Tuple(vec![
		AbiValue::Address(vec![7; 32]),
		AbiValue::Tuple(vec![AbiValue::uint(1), AbiValue::uint(2)]),
		AbiValue::Array(vec![AbiValue::Bool(true), AbiValue::Bool(false), AbiValue::Bool(true)]),
		AbiValue::Array(vec![AbiValue::string("a"), AbiValue::string("bc")]),
	]);
	assert_eq!(encode(&value, &ty).expect("first encode"), encode(&value, &ty).expect("second encode"));
}

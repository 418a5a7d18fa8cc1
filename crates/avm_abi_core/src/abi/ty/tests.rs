use super::{Slot, head_slots};
use crate::abi::{AbiError, AbiType};

fn parse(text: &str) -> AbiType {
	text.parse().expect("type string parses")
}

fn uint(bits: usize) -> AbiType {
	AbiType::uint(bits).expect("valid width")
}

#[test]
fn uint_widths_must_be_multiples_of_eight() {
	for bits in [8, 16, 24, 256, 512] {
		assert_eq!(uint(bits).static_byte_width(), Some(bits / 8));
	}
	for bits in [0, 7, 12, 520] {
		let err = AbiType::uint(bits).expect_err("width should be rejected");
		assert!(matches!(err, AbiError::MalformedType { .. }), "bits={bits}: {err}");
	}
}

#[test]
fn ufixed_precision_is_bounded() {
	let ty = AbiType::ufixed(64, 2).expect("ufixed64x2 is valid");
	assert_eq!(ty.static_byte_width(), Some(8));
	assert!(matches!(AbiType::ufixed(64, 0), Err(AbiError::MalformedType { .. })));
	assert!(matches!(AbiType::ufixed(64, 161), Err(AbiError::MalformedType { .. })));
	assert!(matches!(AbiType::ufixed(9, 2), Err(AbiError::MalformedType { .. })));
}

#[test]
fn duplicate_struct_field_is_malformed() {
	let err = AbiType::struct_of("Pair", vec![("a", uint(8)), ("a", AbiType::Bool)]).expect_err("duplicate field rejected");
	let AbiError::MalformedType { reason } = err else {
		panic!("expected MalformedType");
	};
	assert!(reason.contains("duplicate field a"));
}

#[test]
fn empty_struct_field_name_is_malformed() {
	let err = AbiType::struct_of("Pair", vec![("", uint(8))]).expect_err("empty field rejected");
	assert!(matches!(err, AbiError::MalformedType { .. }));
}

#[test]
fn dynamic_flag_is_structural() {
	assert!(!uint(64).is_dynamic());
	assert!(!AbiType::Address.is_dynamic());
	assert!(!AbiType::static_bytes(8).is_dynamic());
	assert!(AbiType::DynamicBytes.is_dynamic());
	assert!(AbiType::String.is_dynamic());
	assert!(AbiType::dynamic_array(uint(8)).is_dynamic());
	assert!(!AbiType::static_array(uint(8), 3).is_dynamic());
	assert!(AbiType::static_array(AbiType::DynamicBytes, 3).is_dynamic());
	assert!(!AbiType::tuple(vec![uint(8), AbiType::Bool]).is_dynamic());
	assert!(AbiType::tuple(vec![uint(8), AbiType::tuple(vec![AbiType::String])]).is_dynamic());
	assert_eq!(AbiType::DynamicBytes.static_byte_width(), None);
}

#[test]
fn static_width_packs_bool_runs() {
	assert_eq!(AbiType::static_array(AbiType::Bool, 0).static_byte_width(), Some(0));
	assert_eq!(AbiType::static_array(AbiType::Bool, 8).static_byte_width(), Some(1));
	assert_eq!(AbiType::static_array(AbiType::Bool, 9).static_byte_width(), Some(2));

	let mixed = AbiType::tuple(vec![AbiType::Bool, AbiType::Bool, uint(16), AbiType::Bool]);
	assert_eq!(mixed.static_byte_width(), Some(1 + 2 + 1));
}

#[test]
fn overflowing_width_is_none_but_static() {
	let huge = AbiType::static_array(uint(64), usize::MAX);
	assert_eq!(huge.static_byte_width(), None);
	assert!(!huge.is_dynamic());

	let wide = AbiType::static_array(uint(8), 1 << 63);
	assert_eq!(wide.static_byte_width(), Some(1 << 63));
	assert_eq!(AbiType::tuple(vec![wide.clone(), wide]).static_byte_width(), None);
}

#[test]
fn struct_and_tuple_share_width() {
	let fields = vec![("address", AbiType::Address), ("uint256", uint(256))];
	let named = AbiType::struct_of("Struct1", fields).expect("struct builds");
	let anonymous = AbiType::tuple(vec![AbiType::Address, uint(256)]);
	assert_eq!(named.static_byte_width(), Some(64));
	assert_eq!(named.static_byte_width(), anonymous.static_byte_width());
	assert_eq!(named.to_string(), anonymous.to_string());
}

#[test]
fn head_slots_group_consecutive_bools() {
	let dynamic = AbiType::DynamicBytes;
	let byte = AbiType::Byte;
	let slots = head_slots(&[&AbiType::Bool, &AbiType::Bool, &dynamic, &AbiType::Bool, &byte]);
	assert_eq!(
		slots,
		vec![
			Slot::Bools { start: 0, len: 2 },
			Slot::Offset { index: 2 },
			Slot::Bools { start: 3, len: 1 },
			Slot::Inline { index: 4, width: 1 },
		]
	);
}

#[test]
fn parses_canonical_type_strings() {
	assert_eq!(parse("uint64"), uint(64));
	assert_eq!(parse("ufixed8x16"), AbiType::ufixed(8, 16).expect("valid"));
	assert_eq!(parse("byte[8]"), AbiType::StaticBytes(8));
	assert_eq!(parse("byte[]"), AbiType::DynamicBytes);
	assert_eq!(parse("string[]"), AbiType::dynamic_array(AbiType::String));
	assert_eq!(parse("bool[3][]"), AbiType::dynamic_array(AbiType::static_array(AbiType::Bool, 3)));
	assert_eq!(parse("()"), AbiType::tuple(Vec::new()));
	assert_eq!(
		parse("(address,(uint8,uint8),byte[])"),
		AbiType::tuple(vec![AbiType::Address, AbiType::tuple(vec![uint(8), uint(8)]), AbiType::DynamicBytes])
	);
}

#[test]
fn display_round_trips_through_parse() {
	for text in ["uint512", "ufixed64x10", "(address,uint256)[]", "((uint8,bool),string,bool[9])", "byte[1020]"] {
		assert_eq!(parse(text).to_string(), text);
	}
}

#[test]
fn negative_array_length_is_malformed() {
	let err = "uint8[-1]".parse::<AbiType>().expect_err("negative length rejected");
	assert!(matches!(err, AbiError::MalformedType { .. }));
}

#[test]
fn rejects_bad_type_strings() {
	for text in ["", "uint", "int8", "(uint8", "uint8)", "uint8[x]", "ufixed64", "uint8]"] {
		let err = text.parse::<AbiType>().expect_err("type string rejected");
		assert!(matches!(err, AbiError::InvalidTypeString { .. }), "{text}: {err}");
	}
	assert!(matches!("uint7".parse::<AbiType>(), Err(AbiError::MalformedType { .. })));
}

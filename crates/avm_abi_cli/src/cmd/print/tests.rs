use avm_abi::abi::{AbiValue, FieldValue, StructValue};

use super::{PrintOptions, render_value};

#[test]
fn scalars_render_on_one_line() {
	let options = PrintOptions::default();
	assert_eq!(render_value(&AbiValue::uint(42), options), vec!["42"]);
	assert_eq!(render_value(&AbiValue::Byte(255), options), vec!["0xff"]);
	assert_eq!(render_value(&AbiValue::string("hi \"there\""), options), vec![r#""hi \"there\"""#]);
	assert_eq!(render_value(&AbiValue::bytes(vec![0xab, 0xcd]), options), vec!["bytes[2] 0xabcd"]);
	assert_eq!(
		render_value(&AbiValue::Address(vec![0; 32]), options),
		vec!["address AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ"]
	);
}

#[test]
fn struct_fields_are_labelled_and_indented() {
	let value = AbiValue::Struct(StructValue {
		type_name: "Pair".into(),
		fields: vec![
			FieldValue::new("ok", AbiValue::Bool(true)),
			FieldValue::new("items", AbiValue::Array(vec![AbiValue::uint(1), AbiValue::uint(2)])),
		],
	});
	assert_eq!(
		render_value(&value, PrintOptions::default()),
		vec!["Pair {", "  ok = true", "  items = [", "    1", "    2", "  ]", "}"]
	);
}

#[test]
fn long_arrays_and_bytes_are_truncated() {
	let options = PrintOptions {
		max_array_items: 2,
		max_bytes_shown: 2,
		max_print_depth: 8,
	};
	let value = AbiValue::Tuple(vec![AbiValue::Array((0..5).map(AbiValue::uint).collect()), AbiValue::bytes(vec![1, 2, 3])]);
	assert_eq!(
		render_value(&value, options),
		vec!["(", "  [", "    0", "    1", "    ... 3 more", "  ]", "  bytes[3] 0x0102...", ")"]
	);
}

#[test]
fn depth_limit_collapses_containers() {
	let options = PrintOptions {
		max_print_depth: 1,
		..PrintOptions::default()
	};
	let value = AbiValue::Array(vec![AbiValue::Array(vec![AbiValue::Bool(false)])]);
	assert_eq!(render_value(&value, options), vec!["[", "  [... 1 items]", "]"]);
}

use crate::cmd::test_support::{run_avm_abi, run_avm_abi_failure, run_avm_abi_json};

#[test]
fn method_json_reports_selector() {
	let json = run_avm_abi_json(&["method", "add(uint64,uint64)uint128", "--json"]);

	assert_eq!(json["name"], "add");
	assert_eq!(json["selector"], "0x8aa3b61f");
	assert_eq!(json["args"], serde_json::json!(["uint64", "uint64"]));
	assert_eq!(json["returns"], "uint128");
}

#[test]
fn method_text_lists_arguments() {
	let output = run_avm_abi(&["method", "noop()void"]);

	assert!(output.status.success());
	assert_eq!(
		String::from_utf8_lossy(&output.stdout),
		"signature: noop()void\nselector: 0xe83a87ab\nreturns: void\n"
	);
}

#[test]
fn unbalanced_signature_fails() {
	run_avm_abi_failure(&["method", "add(uint64"]);
}

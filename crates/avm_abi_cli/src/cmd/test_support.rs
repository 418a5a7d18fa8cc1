use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use avm_abi_testkit::workspace_bin;

static AVM_ABI_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_avm_abi(args: &[&str]) -> Output {
	let bin = AVM_ABI_BIN.get_or_init(|| workspace_bin("avm-abi"));
	Command::new(bin).args(args).output().expect("avm-abi command executes")
}

pub(crate) fn run_avm_abi_json(args: &[&str]) -> serde_json::Value {
	let output = run_avm_abi(args);
	assert!(
		output.status.success(),
		"avm-abi command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Run a command that must fail and return its `error:` line from stderr.
pub(crate) fn run_avm_abi_failure(args: &[&str]) -> String {
	let output = run_avm_abi(args);
	assert!(!output.status.success(), "avm-abi {args:?} should fail");
	assert!(output.stdout.is_empty(), "failed command printed to stdout");
	let stderr = String::from_utf8_lossy(&output.stderr);
	stderr
		.lines()
		.find(|line| line.starts_with("error:"))
		.unwrap_or_else(|| panic!("no error line in stderr: {stderr}"))
		.to_owned()
}

//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::process::Command;

/// File name of the echo-contract method catalogue under `fixtures/`.
pub const ECHO_METHODS_FIXTURE: &str = "echo_methods.json";

/// One echo method: its signature and sample arguments in JSON value notation.
///
/// Every echo method takes one argument and returns it unchanged, so each
/// sample is both the call argument and the expected return value.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EchoCase {
	/// Method signature, e.g. `arc4UintN8(uint8)uint8`.
	pub signature: String,
	/// Sample values for the single argument.
	pub samples: Vec<serde_json::Value>,
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Resolve a workspace binary, building it with cargo when the test harness
/// did not provide `CARGO_BIN_EXE_<name>`.
///
/// Panics when the build fails; callers are tests.
pub fn workspace_bin(name: &str) -> PathBuf {
	if let Some(path) = std::env::var_os(format!("CARGO_BIN_EXE_{name}")) {
		return PathBuf::from(path);
	}

	let mut bin = target_dir().join("debug");
	bin.push(if cfg!(windows) { format!("{name}.exe") } else { name.to_owned() });

	let status = Command::new("cargo")
		.current_dir(workspace_root())
		.args(["build", "--quiet", "--bin", name])
		.status()
		.unwrap_or_else(|err| panic!("failed to run cargo build for {name}: {err}"));
	assert!(status.success(), "failed to build {name} binary at {}", bin.display());

	bin
}

/// Load the echo-contract method catalogue.
///
/// Panics when the fixture is missing or malformed; callers are tests.
pub fn echo_cases() -> Vec<EchoCase> {
	let path = fixture_path(ECHO_METHODS_FIXTURE);
	let raw = std::fs::read(&path).unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
	serde_json::from_slice(&raw).unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

use avm_abi::abi::AbiError;

/// Result alias for command handlers.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
	/// Codec or method-layer failure.
	#[error(transparent)]
	Abi(#[from] AbiError),
	/// Command-line JSON text did not parse.
	#[error("invalid JSON input: {0}")]
	Json(#[from] serde_json::Error),
	/// Command-line hex text did not parse.
	#[error("invalid hex input {input:?}: {source}")]
	Hex {
		/// Offending input text.
		input: String,
		/// Underlying hex error.
		#[source]
		source: hex::FromHexError,
	},
	/// JSON value does not fit the shape the type asks for.
	#[error("at {path}: expected {expected}, got {got}")]
	JsonValue {
		/// JSON path of the offending value, `$` for the root.
		path: String,
		/// Shape the type requires.
		expected: String,
		/// Shape that was supplied.
		got: String,
	},
}

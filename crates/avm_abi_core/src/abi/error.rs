use std::fmt;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, AbiError>;

/// Length constraint reported by [`AbiError::LengthMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
	/// The buffer must have exactly this many bytes.
	Exactly(usize),
	/// The buffer may have at most this many bytes.
	AtMost(usize),
}

impl fmt::Display for LengthBound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Exactly(len) => write!(f, "{len}"),
			Self::AtMost(len) => write!(f, "<= {len}"),
		}
	}
}

/// Errors produced while building type descriptors, encoding, and decoding values.
#[derive(Debug, Error)]
pub enum AbiError {
	/// A type descriptor was constructed with an invalid shape.
	#[error("malformed type: {reason}")]
	MalformedType {
		/// What made the shape invalid.
		reason: String,
	},
	/// Value does not fit the target type.
	#[error("value out of range for {ty}: expected {expected}, got {got}")]
	ValueOutOfRange {
		/// Canonical target type.
		ty: String,
		/// Accepted range.
		expected: String,
		/// Offending value or size.
		got: String,
	},
	/// Buffer length does not satisfy the descriptor's declared length.
	#[error("length mismatch for {ty}: expected {expected} bytes, got {actual}")]
	LengthMismatch {
		/// Canonical target type.
		ty: String,
		/// Required length.
		expected: LengthBound,
		/// Supplied length.
		actual: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("truncated input at offset {at}: need {need} bytes, remaining {rem}")]
	TruncatedInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A head offset points outside the region it may address.
	#[error("offset {offset} read at {at} out of bounds (allowed {min}..={max})")]
	OffsetOutOfBounds {
		/// Byte position of the offset field.
		at: usize,
		/// Decoded offset, relative to the enclosing tuple.
		offset: usize,
		/// Smallest legal offset.
		min: usize,
		/// Largest legal offset.
		max: usize,
	},
	/// Value variant does not conform to the descriptor.
	#[error("type mismatch: expected {expected}, got {got}")]
	ValueTypeMismatch {
		/// Expected type or field label.
		expected: String,
		/// Actual value kind or field label.
		got: String,
	},
	/// Decoding finished before the supplied buffer was consumed.
	#[error("trailing bytes after {ty}: consumed {expected}, buffer has {actual}")]
	TrailingBytes {
		/// Canonical decoded type.
		ty: String,
		/// Bytes consumed by the value.
		expected: usize,
		/// Bytes supplied.
		actual: usize,
	},
	/// Bool byte has bits set outside the canonical layout.
	#[error("non-canonical bool byte 0x{byte:02x} at offset {at}")]
	NonCanonicalBool {
		/// Byte offset of the bool byte.
		at: usize,
		/// Offending byte.
		byte: u8,
	},
	/// `string` payload is not valid UTF-8.
	#[error("invalid utf-8 in string payload at offset {at}")]
	InvalidUtf8 {
		/// Byte offset of the payload start.
		at: usize,
	},
	/// Element count prefix exceeds the configured decode ceiling.
	#[error("array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Decoded element count.
		count: usize,
		/// Configured ceiling.
		max: usize,
	},
	/// Canonical type text could not be parsed.
	#[error("invalid type string {input:?}: {reason}")]
	InvalidTypeString {
		/// Original text.
		input: String,
		/// Parse failure.
		reason: &'static str,
	},
	/// Method signature text could not be parsed.
	#[error("invalid method signature {signature:?}: {reason}")]
	InvalidMethodSignature {
		/// Original text.
		signature: String,
		/// Parse failure.
		reason: String,
	},
	/// Application arguments start with another method's selector.
	#[error("selector mismatch: expected {expected:02x?}, got {got:02x?}")]
	SelectorMismatch {
		/// Selector of the method being decoded.
		expected: [u8; 4],
		/// First application argument.
		got: Vec<u8>,
	},
	/// Wrong number of call arguments.
	#[error("argument count mismatch: expected {expected}, got {got}")]
	ArgCountMismatch {
		/// Arguments declared by the method.
		expected: usize,
		/// Arguments supplied.
		got: usize,
	},
	/// Return log does not start with the return prefix.
	#[error("return log is missing the 151f7c75 prefix")]
	MissingReturnPrefix,
	/// Call or return payload exceeds a transport ceiling.
	#[error("transport limit exceeded for {what}: limit={limit}, actual={actual}")]
	TransportLimitExceeded {
		/// Limited quantity.
		what: &'static str,
		/// Configured ceiling.
		limit: usize,
		/// Measured size.
		actual: usize,
	},
	/// Error raised inside a nested element.
	#[error("at {path}: {source}")]
	InElement {
		/// Element path such as `[1].owner[0]`.
		path: String,
		/// Underlying error.
		#[source]
		source: Box<AbiError>,
	},
}

impl AbiError {
	/// Return the innermost error, skipping element context.
	pub fn root(&self) -> &AbiError {
		match self {
			Self::InElement { source, .. } => source.root(),
			other => other,
		}
	}

	/// Return the element path recorded for this error, if any.
	pub fn path(&self) -> Option<&str> {
		match self {
			Self::InElement { path, .. } => Some(path),
			_ => None,
		}
	}

	/// Prefix the element path with `label`.
	pub(crate) fn in_element(self, label: impl fmt::Display) -> Self {
		match self {
			Self::InElement { path, source } => Self::InElement {
				path: format!("{label}{path}"),
				source,
			},
			other => Self::InElement {
				path: label.to_string(),
				source: Box::new(other),
			},
		}
	}

	pub(crate) fn malformed(reason: impl Into<String>) -> Self {
		Self::MalformedType { reason: reason.into() }
	}

	pub(crate) fn mismatch(expected: impl fmt::Display, got: impl fmt::Display) -> Self {
		Self::ValueTypeMismatch {
			expected: expected.to_string(),
			got: got.to_string(),
		}
	}
}

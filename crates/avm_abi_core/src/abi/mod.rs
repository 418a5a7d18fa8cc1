mod address;
mod bytes;
mod decode;
mod encode;
mod error;
mod method;
mod ty;
mod value;

/// Address text form.
pub use address::{ADDRESS_LEN, ADDRESS_TEXT_LEN, address_from_text, address_to_text};
/// Decoding entry points and options.
pub use decode::{DecodeOptions, decode, decode_with};
/// Encoding entry point.
pub use encode::encode;
/// Error and result aliases.
pub use error::{AbiError, LengthBound, Result};
/// Method signatures, selectors, and call/return framing.
pub use method::{Method, MethodArg, RETURN_PREFIX, TransportLimits};
/// Type descriptor model.
pub use ty::{AbiType, BitWidth, Precision, TupleField, TupleType};
/// Runtime value model.
pub use value::{AbiValue, Decimal, FieldValue, StructValue};

/// Largest value representable by a 2-byte length, count, or offset field.
pub const MAX_U16_FIELD: usize = u16::MAX as usize;

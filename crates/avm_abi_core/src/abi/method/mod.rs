use sha2::{Digest, Sha512_256};
use tracing::trace;

use crate::abi::{AbiError, AbiType, AbiValue, Result, decode, encode};

/// Prefix of the log entry that carries a method's return value.
pub const RETURN_PREFIX: [u8; 4] = [0x15, 0x1f, 0x7c, 0x75];

/// Arguments beyond this count share the last application argument as a tuple.
const MAX_DIRECT_ARGS: usize = 15;

/// Transport ceilings checked when framing calls and returns.
///
/// The codec only enforces its own 2-byte field limits; these are the
/// per-transaction ceilings of the surrounding transport.
#[derive(Debug, Clone)]
pub struct TransportLimits {
	/// Maximum number of application arguments, selector included.
	pub max_app_args: usize,
	/// Maximum combined byte length of all application arguments.
	pub max_app_args_len: usize,
	/// Maximum byte length of one log entry.
	pub max_log_len: usize,
}

impl Default for TransportLimits {
	fn default() -> Self {
		Self {
			max_app_args: 16,
			max_app_args_len: 2048,
			max_log_len: 1024,
		}
	}
}

impl TransportLimits {
	/// Preset that disables every transport ceiling.
	pub fn unbounded() -> Self {
		Self {
			max_app_args: usize::MAX,
			max_app_args_len: usize::MAX,
			max_log_len: usize::MAX,
		}
	}
}

/// One declared method argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArg {
	/// Optional argument name; not part of the signature.
	pub name: Option<Box<str>>,
	/// Argument type.
	pub ty: AbiType,
}

impl MethodArg {
	/// Unnamed argument.
	pub fn new(ty: AbiType) -> Self {
		Self { name: None, ty }
	}

	/// Named argument.
	pub fn named(name: impl Into<Box<str>>, ty: AbiType) -> Self {
		Self { name: Some(name.into()), ty }
	}
}

/// Contract method: name, argument types, and return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
	/// Method name.
	pub name: Box<str>,
	/// Arguments in call order.
	pub args: Vec<MethodArg>,
	/// Return type; `None` for `void`.
	pub returns: Option<AbiType>,
}

impl Method {
	/// Build a method from its parts.
	pub fn new(name: impl Into<Box<str>>, args: Vec<MethodArg>, returns: Option<AbiType>) -> Self {
		Self {
			name: name.into(),
			args,
			returns,
		}
	}

	/// Parse a signature such as `add(uint64,uint64)uint128`.
	pub fn parse(signature: &str) -> Result<Self> {
		let invalid = |reason: String| AbiError::InvalidMethodSignature {
			signature: signature.to_owned(),
			reason,
		};

		let open = signature.find('(').ok_or_else(|| invalid("missing argument list".to_owned()))?;
		let name = &signature[..open];
		if name.is_empty() || name.contains(|ch: char| ch.is_whitespace() || ch == ')' || ch == ',') {
			return Err(invalid("invalid method name".to_owned()));
		}

		let close = matching_paren(signature, open).ok_or_else(|| invalid("unbalanced parentheses".to_owned()))?;
		let args = match signature[open..=close].parse::<AbiType>().map_err(|err| invalid(err.to_string()))? {
			AbiType::Tuple(tuple) => tuple.fields().iter().map(|field| MethodArg::new(field.ty().clone())).collect(),
			_ => return Err(invalid("argument list is not a tuple".to_owned())),
		};

		let returns = match &signature[close + 1..] {
			"" => return Err(invalid("missing return type".to_owned())),
			"void" => None,
			text => Some(text.parse::<AbiType>().map_err(|err| invalid(err.to_string()))?),
		};

		Ok(Self {
			name: name.into(),
			args,
			returns,
		})
	}

	/// Canonical signature text.
	pub fn signature(&self) -> String {
		let args: Vec<String> = self.args.iter().map(|arg| arg.ty.to_string()).collect();
		let returns = self.returns.as_ref().map_or_else(|| "void".to_owned(), AbiType::to_string);
		format!("{}({}){returns}", self.name, args.join(","))
	}

	/// First four bytes of the SHA-512/256 digest of the signature.
	pub fn selector(&self) -> [u8; 4] {
		let digest = Sha512_256::digest(self.signature().as_bytes());
		let mut out = [0_u8; 4];
		out.copy_from_slice(&digest[..4]);
		out
	}

	/// Encode application arguments: the selector followed by one entry per argument slot.
	pub fn encode_call(&self, args: &[AbiValue], limits: &TransportLimits) -> Result<Vec<Vec<u8>>> {
		if args.len() != self.args.len() {
			return Err(AbiError::ArgCountMismatch {
				expected: self.args.len(),
				got: args.len(),
			});
		}

		let mut out = Vec::with_capacity(args.len().min(MAX_DIRECT_ARGS) + 1);
		out.push(self.selector().to_vec());

		let (direct, packed) = self.split_slots();
		for (idx, (arg, value)) in self.args.iter().zip(args).take(direct).enumerate() {
			out.push(encode(value, &arg.ty).map_err(|err| err.in_element(format!("args[{idx}]")))?);
		}
		if let Some(tuple_ty) = packed {
			let rest = AbiValue::Tuple(args[direct..].to_vec());
			out.push(encode(&rest, &tuple_ty).map_err(|err| err.in_element(format!("args[{direct}..]")))?);
		}

		check_limit("application arguments", limits.max_app_args, out.len())?;
		check_limit("application argument bytes", limits.max_app_args_len, out.iter().map(Vec::len).sum())?;
		trace!(method = %self.name, slots = out.len(), "encoded call");
		Ok(out)
	}

	/// Decode application arguments produced by [`Method::encode_call`].
	pub fn decode_call(&self, app_args: &[&[u8]]) -> Result<Vec<AbiValue>> {
		let selector = self.selector();
		let Some((first, rest)) = app_args.split_first() else {
			return Err(AbiError::SelectorMismatch {
				expected: selector,
				got: Vec::new(),
			});
		};
		if *first != selector.as_slice() {
			return Err(AbiError::SelectorMismatch {
				expected: selector,
				got: first.to_vec(),
			});
		}

		let (direct, packed) = self.split_slots();
		let expected = direct + usize::from(packed.is_some());
		if rest.len() != expected {
			return Err(AbiError::ArgCountMismatch {
				expected,
				got: rest.len(),
			});
		}

		let mut out = Vec::with_capacity(self.args.len());
		for (idx, (arg, raw)) in self.args.iter().zip(rest).take(direct).enumerate() {
			out.push(decode(raw, &arg.ty).map_err(|err| err.in_element(format!("args[{idx}]")))?);
		}
		if let Some(tuple_ty) = packed {
			match decode(rest[direct], &tuple_ty).map_err(|err| err.in_element(format!("args[{direct}..]")))? {
				AbiValue::Tuple(values) => out.extend(values),
				other => return Err(AbiError::mismatch("tuple", other.kind_name())),
			}
		}
		Ok(out)
	}

	/// Frame a return value as a log entry.
	pub fn encode_return(&self, value: &AbiValue, limits: &TransportLimits) -> Result<Vec<u8>> {
		let Some(ty) = &self.returns else {
			return Err(AbiError::mismatch("void", value.kind_name()));
		};
		let mut out = RETURN_PREFIX.to_vec();
		out.extend(encode(value, ty)?);
		check_limit("log entry bytes", limits.max_log_len, out.len())?;
		Ok(out)
	}

	/// Decode a return log entry; `void` methods yield `None`.
	pub fn decode_return(&self, log: &[u8]) -> Result<Option<AbiValue>> {
		let Some(ty) = &self.returns else {
			return Ok(None);
		};
		let payload = log.strip_prefix(RETURN_PREFIX.as_slice()).ok_or(AbiError::MissingReturnPrefix)?;
		decode(payload, ty).map(Some)
	}

	/// Number of direct argument slots and the tuple type packing the rest, if any.
	fn split_slots(&self) -> (usize, Option<AbiType>) {
		if self.args.len() <= MAX_DIRECT_ARGS {
			return (self.args.len(), None);
		}
		let direct = MAX_DIRECT_ARGS - 1;
		let packed = AbiType::tuple(self.args[direct..].iter().map(|arg| arg.ty.clone()).collect());
		(direct, Some(packed))
	}
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
	let mut depth = 0_usize;
	for (idx, ch) in text[open..].char_indices() {
		match ch {
			'(' => depth += 1,
			')' => {
				depth -= 1;
				if depth == 0 {
					return Some(open + idx);
				}
			}
			_ => {}
		}
	}
	None
}

fn check_limit(what: &'static str, limit: usize, actual: usize) -> Result<()> {
	if actual > limit {
		return Err(AbiError::TransportLimitExceeded { what, limit, actual });
	}
	Ok(())
}

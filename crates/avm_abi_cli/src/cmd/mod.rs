/// Method call argument encoding command.
pub mod call;
/// Value decoding command.
pub mod decode;
/// Value encoding command.
pub mod encode;
/// Method signature inspection command.
pub mod method;
/// Return log decoding command.
pub mod returns;
/// Type layout inspection command.
pub mod types;

mod error;
pub(crate) mod json;
pub(crate) mod print;
pub(crate) mod util;

#[cfg(test)]
mod test_support;

pub use error::{CliError, Result};

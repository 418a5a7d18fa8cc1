//! Public library API for encoding and decoding AVM contract call values.

/// Type descriptors, values, the head/tail codec, and method call framing.
pub mod abi;

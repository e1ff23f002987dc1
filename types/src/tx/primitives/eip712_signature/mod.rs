//! Typed structured data hashing as described in EIP-712.
//!
//! Only flat structures are supported: every member is encoded into a single word, with
//! dynamic types (`bytes`, `string`, arrays) replaced by the keccak hash of their content.

pub mod struct_builder;
pub mod typed_structure;

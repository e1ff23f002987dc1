pub mod eip712_signature;
pub mod packed_eth_signature;

pub use eip712_signature::{
    struct_builder::StructBuilder,
    typed_structure::{EIP712TypedStructure, Eip712Domain, StructMember},
};
pub use packed_eth_signature::PackedEthSignature;

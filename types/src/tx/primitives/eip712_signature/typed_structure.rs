use serde::{Deserialize, Serialize};
use zkl2_basic_types::{Address, L2ChainId, H256, U256};
use zkl2_config::constants::{EIP712_DOMAIN_NAME, EIP712_DOMAIN_VERSION};
use zkl2_utils::{address_to_h256, hash::hash_bytes, u256_to_h256};

use super::struct_builder::{EncodeBuilder, StructBuilder};

/// A value that can be a member of an EIP-712 structure.
pub trait StructMember {
    const MEMBER_TYPE: &'static str;

    /// The 32-byte word this member contributes to `encodeData`.
    fn encode_member_data(&self) -> H256;
}

impl StructMember for U256 {
    const MEMBER_TYPE: &'static str = "uint256";

    fn encode_member_data(&self) -> H256 {
        u256_to_h256(*self)
    }
}

impl StructMember for H256 {
    const MEMBER_TYPE: &'static str = "bytes32";

    fn encode_member_data(&self) -> H256 {
        *self
    }
}

impl StructMember for Address {
    const MEMBER_TYPE: &'static str = "address";

    fn encode_member_data(&self) -> H256 {
        address_to_h256(self)
    }
}

impl StructMember for String {
    const MEMBER_TYPE: &'static str = "string";

    fn encode_member_data(&self) -> H256 {
        hash_bytes(self.as_bytes())
    }
}

impl StructMember for Vec<u8> {
    const MEMBER_TYPE: &'static str = "bytes";

    fn encode_member_data(&self) -> H256 {
        hash_bytes(self)
    }
}

impl StructMember for Vec<H256> {
    const MEMBER_TYPE: &'static str = "bytes32[]";

    fn encode_member_data(&self) -> H256 {
        let concatenated: Vec<u8> = self.iter().flat_map(|word| word.0).collect();
        hash_bytes(&concatenated)
    }
}

/// Structure that can be signed as EIP-712 typed data.
pub trait EIP712TypedStructure {
    const TYPE_NAME: &'static str;

    fn build_structure<BUILDER: StructBuilder>(&self, builder: &mut BUILDER);

    fn encode_type(&self) -> String {
        let mut builder = EncodeBuilder::default();
        self.build_structure(&mut builder);
        builder.encode_type(Self::TYPE_NAME)
    }

    fn type_hash(&self) -> H256 {
        hash_bytes(self.encode_type().as_bytes())
    }

    fn encode_data(&self) -> Vec<H256> {
        let mut builder = EncodeBuilder::default();
        self.build_structure(&mut builder);
        builder.encoded_data()
    }

    /// `keccak(typeHash || encodeData(s))`.
    fn hash_struct(&self) -> H256 {
        let mut bytes = self.type_hash().as_bytes().to_vec();
        for word in self.encode_data() {
            bytes.extend_from_slice(word.as_bytes());
        }
        hash_bytes(&bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
}

impl Eip712Domain {
    pub fn new(chain_id: L2ChainId) -> Self {
        Self {
            name: EIP712_DOMAIN_NAME.to_owned(),
            version: EIP712_DOMAIN_VERSION.to_owned(),
            chain_id: chain_id.into(),
        }
    }
}

impl EIP712TypedStructure for Eip712Domain {
    const TYPE_NAME: &'static str = "EIP712Domain";

    fn build_structure<BUILDER: StructBuilder>(&self, builder: &mut BUILDER) {
        builder.add_member("name", &self.name);
        builder.add_member("version", &self.version);
        builder.add_member("chainId", &self.chain_id);
    }
}

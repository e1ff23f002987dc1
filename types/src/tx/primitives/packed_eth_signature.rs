use ethereum_types_old::H256 as ParityCryptoH256;
use parity_crypto::publickey::{
    public_to_address, recover, sign, Error as ParityCryptoError, KeyPair,
    Signature as ETHSignature,
};
use thiserror::Error;
use zkl2_basic_types::{Address, H256};
use zkl2_utils::hash::hash_bytes;

use super::{EIP712TypedStructure, Eip712Domain};

/// Struct used for working with ethereum signatures created using eth_sign (using geth, ethers.js, etc)
/// message is serialized as 65 bytes long `0x` prefixed string.
///
/// Ethereum clients produce `v = 27 + recovery_id`, while the underlying secp256k1 library
/// works with the bare recovery id. The recovery id is stored internally; `serialize_packed`
/// adds 27 back and `deserialize_packed` accepts both forms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedEthSignature(ETHSignature);

impl PackedEthSignature {
    pub fn r(&self) -> &[u8] {
        self.0.r()
    }

    pub fn s(&self) -> &[u8] {
        self.0.s()
    }

    /// Recovery id, either 0 or 1.
    pub fn v(&self) -> u8 {
        self.0.v()
    }

    /// `v` as it is put into a legacy transaction, see EIP-155.
    pub fn v_with_chain_id(&self, chain_id: Option<u64>) -> u64 {
        match chain_id {
            Some(chain_id) => self.v() as u64 + 35 + chain_id * 2,
            None => self.v() as u64 + 27,
        }
    }

    pub fn from_rsv(r: &H256, s: &H256, v: u8) -> Self {
        let r = ParityCryptoH256::from_slice(r.as_bytes());
        let s = ParityCryptoH256::from_slice(s.as_bytes());
        PackedEthSignature(ETHSignature::from_rsv(&r, &s, v))
    }

    /// `r || s || (v + 27)`.
    pub fn serialize_packed(&self) -> [u8; 65] {
        self.0.clone().into_electrum()
    }

    pub fn deserialize_packed(bytes: &[u8]) -> Result<Self, DeserializeError> {
        if bytes.len() != 65 {
            return Err(DeserializeError::IncorrectSignatureLength);
        }
        let mut bytes_array = [0u8; 65];
        bytes_array.copy_from_slice(bytes);
        if bytes_array[64] >= 27 {
            bytes_array[64] -= 27;
        }
        Ok(PackedEthSignature(ETHSignature::from(bytes_array)))
    }

    /// Digest signed by `eth_signTypedData_v4`: `keccak(0x1901 || domainSeparator || hashStruct)`.
    pub fn typed_data_to_signed_bytes(
        domain: &Eip712Domain,
        typed_struct: &impl EIP712TypedStructure,
    ) -> H256 {
        let mut bytes = Vec::with_capacity(66);
        bytes.extend_from_slice(b"\x19\x01");
        bytes.extend_from_slice(domain.hash_struct().as_bytes());
        bytes.extend_from_slice(typed_struct.hash_struct().as_bytes());
        hash_bytes(&bytes)
    }

    /// Digest signed by `eth_sign`, i.e. with the `\x19Ethereum Signed Message` prefix.
    pub fn message_to_signed_bytes(msg: &[u8]) -> H256 {
        let mut bytes = format!("\x19Ethereum Signed Message:\n{}", msg.len()).into_bytes();
        bytes.extend_from_slice(msg);
        hash_bytes(&bytes)
    }

    pub fn sign(private_key: &H256, msg: &[u8]) -> Result<PackedEthSignature, ParityCryptoError> {
        let signed_bytes = Self::message_to_signed_bytes(msg);
        Self::sign_raw(private_key, &signed_bytes)
    }

    pub fn sign_raw(
        private_key: &H256,
        signed_bytes: &H256,
    ) -> Result<PackedEthSignature, ParityCryptoError> {
        let private_key = ParityCryptoH256::from_slice(&private_key.0);
        let signed_bytes = ParityCryptoH256::from_slice(&signed_bytes.0);

        let secret_key = private_key.into();
        let signature = sign(&secret_key, &signed_bytes)?;
        Ok(PackedEthSignature(signature))
    }

    pub fn sign_typed_data(
        private_key: &H256,
        domain: &Eip712Domain,
        typed_struct: &impl EIP712TypedStructure,
    ) -> Result<PackedEthSignature, ParityCryptoError> {
        let signed_bytes = PackedEthSignature::typed_data_to_signed_bytes(domain, typed_struct);
        PackedEthSignature::sign_raw(private_key, &signed_bytes)
    }

    pub fn signature_recover_signer(
        &self,
        signed_bytes: &H256,
    ) -> Result<Address, ParityCryptoError> {
        let signed_bytes = ParityCryptoH256::from_slice(&signed_bytes.0);
        let public_key = recover(&self.0, &signed_bytes)?;
        let address = public_to_address(&public_key);
        Ok(Address::from_slice(address.as_bytes()))
    }

    pub fn address_from_private_key(private_key: &H256) -> Result<Address, ParityCryptoError> {
        let private_key = ParityCryptoH256::from_slice(&private_key.0);
        let pair = KeyPair::from_secret(private_key.into())?;
        Ok(Address::from_slice(pair.address().as_bytes()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DeserializeError {
    #[error("Eth signature length should be 65 bytes")]
    IncorrectSignatureLength,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn private_key() -> H256 {
        H256::from_str("0x7726827caac94a7f9e1b160f7ea819f172f7b6f9d2a97f992c38edeab82d4110")
            .unwrap()
    }

    #[test]
    fn address_of_known_private_key() {
        let address = PackedEthSignature::address_from_private_key(&private_key()).unwrap();
        assert_eq!(
            address,
            Address::from_str("0x36615Cf349d7F6344891B1e7CA7C72883F5dc049").unwrap()
        );
    }

    #[test]
    fn signer_is_recovered() {
        let signature = PackedEthSignature::sign(&private_key(), b"hello").unwrap();
        let signer = signature
            .signature_recover_signer(&PackedEthSignature::message_to_signed_bytes(b"hello"))
            .unwrap();
        assert_eq!(
            signer,
            PackedEthSignature::address_from_private_key(&private_key()).unwrap()
        );
    }

    #[test]
    fn packed_form_uses_electrum_v() {
        let signature = PackedEthSignature::sign(&private_key(), b"packed").unwrap();
        let packed = signature.serialize_packed();
        assert!(packed[64] == 27 || packed[64] == 28);

        let restored = PackedEthSignature::deserialize_packed(&packed).unwrap();
        assert_eq!(restored, signature);
        assert!(restored.v() <= 1);

        let mut raw_v = packed;
        raw_v[64] -= 27;
        assert_eq!(PackedEthSignature::deserialize_packed(&raw_v).unwrap(), signature);
        assert_eq!(
            PackedEthSignature::deserialize_packed(&packed[..64]),
            Err(DeserializeError::IncorrectSignatureLength)
        );
    }

    #[test]
    fn rsv_round_trip() {
        let signature = PackedEthSignature::sign(&private_key(), b"rsv").unwrap();
        let restored = PackedEthSignature::from_rsv(
            &H256::from_slice(signature.r()),
            &H256::from_slice(signature.s()),
            signature.v(),
        );
        assert_eq!(restored, signature);
        assert_eq!(restored.v_with_chain_id(Some(1)), signature.v() as u64 + 37);
        assert_eq!(restored.v_with_chain_id(None), signature.v() as u64 + 27);
    }
}

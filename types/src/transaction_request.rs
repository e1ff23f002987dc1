//! Encoding, decoding and hashing of transactions accepted by the rollup.
//!
//! Besides the standard Ethereum formats (legacy, EIP-2930 and EIP-1559) the rollup accepts
//! its own EIP-712 transaction type `0x71`, which additionally carries the pubdata price limit,
//! factory dependencies, an optional paymaster and an optional custom (account-defined)
//! signature. The same request type is used for L1 transactions, which are always standard.

use rlp::{DecoderError, Rlp, RlpStream};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zkl2_basic_types::{AccessList, AccessListItem, Address, Bytes, L2ChainId, Nonce, H256, U256, U64};
use zkl2_config::constants::{
    DEFAULT_L2_GAS_PER_PUBDATA_LIMIT, EIP_1559_TX_TYPE, EIP_2930_TX_TYPE, EIP_712_TX_TYPE,
    LEGACY_TX_TYPE,
};
use zkl2_utils::{
    address_to_u256,
    bytecode::{hash_bytecode, validate_bytecode, InvalidBytecodeError},
    hash::hash_bytes,
    u256_to_h256,
};

use crate::tx::primitives::{EIP712TypedStructure, Eip712Domain, PackedEthSignature, StructBuilder};

const EIP712_TX_FIELDS: usize = 16;

#[derive(Debug, Error, PartialEq)]
pub enum SerializationTransactionError {
    #[error("chain id is required")]
    MissingChainId,
    #[error("from address is required for EIP-712 transactions")]
    MissingFrom,
    #[error("empty custom signature is not allowed")]
    EmptySignatureNotAllowed,
    #[error("signature has v = {0}, while 0 or 1 is expected")]
    InvalidSignature(U256),
    #[error("cannot recover the signer: {0}")]
    MalformedSignature(String),
    #[error("rlp decoding failed: {0}")]
    DecodeRlpError(#[from] DecoderError),
    #[error("unknown transaction format {0:#04x}")]
    UnknownTransactionFormat(u8),
    #[error("expected {0} bytes long field, got {1}")]
    InvalidFieldLength(usize, usize),
    #[error("integer field doesn't fit into 256 bits")]
    IntegerOverflow,
    #[error("invalid paymaster params")]
    InvalidPaymasterParams,
    #[error("nonce is too big")]
    TooBigNonce,
    #[error("factory dependency #{0} is invalid: {1}")]
    InvalidFactoryDependencies(usize, InvalidBytecodeError),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterParams {
    pub paymaster: Address,
    pub paymaster_input: Vec<u8>,
}

impl PaymasterParams {
    fn new(value: Vec<Vec<u8>>) -> Result<Option<Self>, SerializationTransactionError> {
        if value.is_empty() {
            return Ok(None);
        }
        if value.len() != 2 || value[0].len() != 20 {
            return Err(SerializationTransactionError::InvalidPaymasterParams);
        }
        let result = Some(Self {
            paymaster: Address::from_slice(&value[0]),
            paymaster_input: value[1].clone(),
        });
        Ok(result)
    }
}

/// Rollup-specific part of an EIP-712 transaction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Meta {
    pub gas_per_pubdata: U256,
    /// Raw code of the contracts the transaction may deploy.
    #[serde(default)]
    pub factory_deps: Option<Vec<Vec<u8>>>,
    #[serde(default)]
    pub custom_signature: Option<Vec<u8>>,
    #[serde(default)]
    pub paymaster_params: Option<PaymasterParams>,
}

impl Default for Eip712Meta {
    fn default() -> Self {
        Self {
            gas_per_pubdata: DEFAULT_L2_GAS_PER_PUBDATA_LIMIT.into(),
            factory_deps: None,
            custom_signature: None,
            paymaster_params: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub nonce: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub value: U256,
    pub gas_price: U256,
    pub gas: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    pub input: Bytes,
    /// `v` exactly as it appears on the wire: the recovery id for typed transactions,
    /// `27 + recovery id` or its EIP-155 form for legacy ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Bytes>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_list: Option<AccessList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip712_meta: Option<Eip712Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

/// Typed data actually signed for an EIP-712 transaction.
///
/// Every optional field of the request is replaced with its default, and factory dependencies
/// are replaced with their versioned bytecode hashes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eip712Transaction {
    pub tx_type: U256,
    pub from: Address,
    pub to: Address,
    pub gas_limit: U256,
    pub gas_per_pubdata_byte_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster: Address,
    pub nonce: U256,
    pub value: U256,
    pub data: Vec<u8>,
    pub factory_deps: Vec<H256>,
    pub paymaster_input: Vec<u8>,
}

impl EIP712TypedStructure for Eip712Transaction {
    const TYPE_NAME: &'static str = "Transaction";

    fn build_structure<BUILDER: StructBuilder>(&self, builder: &mut BUILDER) {
        builder.add_member("txType", &self.tx_type);
        builder.add_member("from", &address_to_u256(&self.from));
        builder.add_member("to", &address_to_u256(&self.to));
        builder.add_member("gasLimit", &self.gas_limit);
        builder.add_member("gasPerPubdataByteLimit", &self.gas_per_pubdata_byte_limit);
        builder.add_member("maxFeePerGas", &self.max_fee_per_gas);
        builder.add_member("maxPriorityFeePerGas", &self.max_priority_fee_per_gas);
        builder.add_member("paymaster", &address_to_u256(&self.paymaster));
        builder.add_member("nonce", &self.nonce);
        builder.add_member("value", &self.value);
        builder.add_member("data", &self.data);
        builder.add_member("factoryDeps", &self.factory_deps);
        builder.add_member("paymasterInput", &self.paymaster_input);
    }
}

/// Hash of a signed EIP-712 transaction: `keccak(signedDigest || keccak(signature))`.
pub fn eip712_tx_hash(signed_digest: H256, signature: &[u8]) -> H256 {
    let mut bytes = signed_digest.as_bytes().to_vec();
    bytes.extend_from_slice(hash_bytes(signature).as_bytes());
    hash_bytes(&bytes)
}

pub fn validate_factory_deps(
    factory_deps: &[Vec<u8>],
) -> Result<(), SerializationTransactionError> {
    for (i, dep) in factory_deps.iter().enumerate() {
        validate_bytecode(dep)
            .map_err(|err| SerializationTransactionError::InvalidFactoryDependencies(i, err))?;
    }

    Ok(())
}

impl TransactionRequest {
    pub fn is_eip712_tx(&self) -> bool {
        self.eip712_meta.is_some() || self.transaction_type == Some(EIP_712_TX_TYPE.into())
    }

    fn standard_tx_type(&self) -> Result<u8, SerializationTransactionError> {
        let tx_type = self
            .transaction_type
            .map(|tx_type| tx_type.low_u64())
            .unwrap_or(LEGACY_TX_TYPE as u64);
        match tx_type {
            tx_type if tx_type == LEGACY_TX_TYPE as u64 => Ok(LEGACY_TX_TYPE),
            tx_type if tx_type == EIP_2930_TX_TYPE as u64 => Ok(EIP_2930_TX_TYPE),
            tx_type if tx_type == EIP_1559_TX_TYPE as u64 => Ok(EIP_1559_TX_TYPE),
            other => Err(SerializationTransactionError::UnknownTransactionFormat(other as u8)),
        }
    }

    pub fn get_nonce_checked(&self) -> Result<Nonce, SerializationTransactionError> {
        if self.nonce <= U256::from(u32::MAX) {
            Ok(Nonce(self.nonce.as_u32()))
        } else {
            Err(SerializationTransactionError::TooBigNonce)
        }
    }

    fn effective_max_fee_per_gas(&self) -> U256 {
        self.max_fee_per_gas.unwrap_or(self.gas_price)
    }

    fn effective_max_priority_fee_per_gas(&self) -> U256 {
        self.max_priority_fee_per_gas.unwrap_or_default()
    }

    /// EIP-712 structure signed by the sender of a rollup transaction.
    pub fn signing_input(&self) -> Result<Eip712Transaction, SerializationTransactionError> {
        let meta = self.eip712_meta.clone().unwrap_or_default();
        let factory_deps = meta
            .factory_deps
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, dep)| {
                hash_bytecode(dep)
                    .map_err(|err| SerializationTransactionError::InvalidFactoryDependencies(i, err))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let paymaster_params = meta.paymaster_params.unwrap_or_default();

        Ok(Eip712Transaction {
            tx_type: EIP_712_TX_TYPE.into(),
            from: self.from.unwrap_or_default(),
            to: self.to.unwrap_or_default(),
            gas_limit: self.gas,
            gas_per_pubdata_byte_limit: meta.gas_per_pubdata,
            max_fee_per_gas: self.effective_max_fee_per_gas(),
            max_priority_fee_per_gas: self.effective_max_priority_fee_per_gas(),
            paymaster: paymaster_params.paymaster,
            nonce: self.nonce,
            value: self.value,
            data: self.input.0.clone(),
            factory_deps,
            paymaster_input: paymaster_params.paymaster_input,
        })
    }

    /// Digest the sender signs.
    ///
    /// For rollup transactions it's the EIP-712 digest under the `zkSync` domain, for
    /// standard ones the keccak hash of the unsigned encoding.
    pub fn get_signed_digest(&self) -> Result<H256, SerializationTransactionError> {
        if self.is_eip712_tx() {
            let chain_id = self
                .chain_id
                .ok_or(SerializationTransactionError::MissingChainId)?;
            let domain = Eip712Domain::new(L2ChainId(chain_id));
            Ok(PackedEthSignature::typed_data_to_signed_bytes(
                &domain,
                &self.signing_input()?,
            ))
        } else {
            Ok(hash_bytes(&self.get_signed_bytes(None)?))
        }
    }

    /// Wire encoding of the transaction, signed with `signature` if provided.
    pub fn get_signed_bytes(
        &self,
        signature: Option<&PackedEthSignature>,
    ) -> Result<Vec<u8>, SerializationTransactionError> {
        if self.is_eip712_tx() {
            self.encode_eip712(signature)
        } else {
            self.encode_standard(signature)
        }
    }

    /// Signature attached to the request, either decoded or set by the caller.
    pub fn attached_signature(&self) -> Option<PackedEthSignature> {
        let (v, r, s) = (self.v?, self.r?, self.s?);
        let v = v.as_u64();
        let recovery_id = if self.is_eip712_tx() || self.transaction_type.is_some() {
            v
        } else if v >= 35 {
            (v - 35) % 2
        } else {
            v.saturating_sub(27)
        };
        Some(PackedEthSignature::from_rsv(
            &u256_to_h256(r),
            &u256_to_h256(s),
            recovery_id as u8,
        ))
    }

    /// Hash the network assigns to the transaction.
    pub fn get_tx_hash(&self) -> Result<H256, SerializationTransactionError> {
        if !self.is_eip712_tx() {
            let bytes = match &self.raw {
                Some(raw) => raw.0.clone(),
                None => self.get_signed_bytes(self.attached_signature().as_ref())?,
            };
            return Ok(hash_bytes(&bytes));
        }

        let signed_digest = self.get_signed_digest()?;
        let custom_signature = self
            .eip712_meta
            .as_ref()
            .and_then(|meta| meta.custom_signature.as_ref())
            .filter(|signature| !signature.is_empty());
        let hash = match (custom_signature, self.attached_signature()) {
            (Some(signature), _) => eip712_tx_hash(signed_digest, signature),
            (None, Some(signature)) => eip712_tx_hash(signed_digest, &signature.serialize_packed()),
            (None, None) => signed_digest,
        };
        Ok(hash)
    }

    fn encode_eip712(
        &self,
        signature: Option<&PackedEthSignature>,
    ) -> Result<Vec<u8>, SerializationTransactionError> {
        let chain_id = self
            .chain_id
            .ok_or(SerializationTransactionError::MissingChainId)?;
        let from = self.from.ok_or(SerializationTransactionError::MissingFrom)?;
        let meta = self.eip712_meta.clone().unwrap_or_default();
        if matches!(&meta.custom_signature, Some(signature) if signature.is_empty()) {
            return Err(SerializationTransactionError::EmptySignatureNotAllowed);
        }

        let mut rlp = RlpStream::new_list(EIP712_TX_FIELDS);
        append_u256(&mut rlp, &self.nonce);
        append_u256(&mut rlp, &self.effective_max_priority_fee_per_gas());
        append_u256(&mut rlp, &self.effective_max_fee_per_gas());
        append_u256(&mut rlp, &self.gas);
        append_optional_address(&mut rlp, self.to);
        append_u256(&mut rlp, &self.value);
        rlp.append(&self.input.0);
        match signature {
            Some(signature) => {
                rlp.append(&(signature.v() as u64));
                append_signature_rs(&mut rlp, signature);
            }
            None => {
                rlp.append(&chain_id);
                rlp.append_empty_data();
                rlp.append_empty_data();
            }
        }
        rlp.append(&chain_id);
        rlp.append(&from.as_bytes().to_vec());
        append_u256(&mut rlp, &meta.gas_per_pubdata);
        let factory_deps = meta.factory_deps.unwrap_or_default();
        rlp.begin_list(factory_deps.len());
        for dep in &factory_deps {
            rlp.append(dep);
        }
        rlp.append(&meta.custom_signature.unwrap_or_default());
        match meta.paymaster_params {
            Some(params) => {
                rlp.begin_list(2);
                rlp.append(&params.paymaster.as_bytes().to_vec());
                rlp.append(&params.paymaster_input);
            }
            None => {
                rlp.begin_list(0);
            }
        }

        Ok(with_type_prefix(EIP_712_TX_TYPE, &rlp.out()))
    }

    fn encode_standard(
        &self,
        signature: Option<&PackedEthSignature>,
    ) -> Result<Vec<u8>, SerializationTransactionError> {
        let tx_type = self.standard_tx_type()?;
        let mut rlp = RlpStream::new();
        rlp.begin_unbounded_list();

        if tx_type == LEGACY_TX_TYPE {
            append_u256(&mut rlp, &self.nonce);
            append_u256(&mut rlp, &self.gas_price);
            append_u256(&mut rlp, &self.gas);
            append_optional_address(&mut rlp, self.to);
            append_u256(&mut rlp, &self.value);
            rlp.append(&self.input.0);
            match (signature, self.chain_id) {
                (Some(signature), chain_id) => {
                    rlp.append(&signature.v_with_chain_id(chain_id));
                    append_signature_rs(&mut rlp, signature);
                }
                (None, Some(chain_id)) => {
                    rlp.append(&chain_id);
                    rlp.append_empty_data();
                    rlp.append_empty_data();
                }
                (None, None) => {}
            }
            rlp.finalize_unbounded_list();
            return Ok(rlp.out().to_vec());
        }

        let chain_id = self
            .chain_id
            .ok_or(SerializationTransactionError::MissingChainId)?;
        rlp.append(&chain_id);
        append_u256(&mut rlp, &self.nonce);
        if tx_type == EIP_1559_TX_TYPE {
            append_u256(&mut rlp, &self.effective_max_priority_fee_per_gas());
            append_u256(&mut rlp, &self.effective_max_fee_per_gas());
        } else {
            append_u256(&mut rlp, &self.gas_price);
        }
        append_u256(&mut rlp, &self.gas);
        append_optional_address(&mut rlp, self.to);
        append_u256(&mut rlp, &self.value);
        rlp.append(&self.input.0);
        append_access_list(&mut rlp, self.access_list.as_deref().unwrap_or_default());
        if let Some(signature) = signature {
            rlp.append(&(signature.v() as u64));
            append_signature_rs(&mut rlp, signature);
        }
        rlp.finalize_unbounded_list();

        Ok(with_type_prefix(tx_type, &rlp.out()))
    }

    /// Decodes a transaction in any supported format and computes its hash.
    ///
    /// For standard signed transactions `from` is recovered from the signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, H256), SerializationTransactionError> {
        let first_byte = *bytes.first().ok_or(DecoderError::RlpIsTooShort)?;
        let mut tx = match first_byte {
            EIP_712_TX_TYPE => Self::decode_eip712(&bytes[1..])?,
            EIP_1559_TX_TYPE | EIP_2930_TX_TYPE => {
                Self::decode_typed_standard(first_byte, &bytes[1..])?
            }
            byte if byte >= 0xc0 => Self::decode_legacy(bytes)?,
            byte => return Err(SerializationTransactionError::UnknownTransactionFormat(byte)),
        };
        tx.raw = Some(Bytes(bytes.to_vec()));

        if !tx.is_eip712_tx() {
            if let Some(signature) = tx.attached_signature() {
                let signer = signature
                    .signature_recover_signer(&tx.get_signed_digest()?)
                    .map_err(|err| SerializationTransactionError::MalformedSignature(err.to_string()))?;
                tx.from = Some(signer);
            }
        }

        let hash = tx.get_tx_hash()?;
        Ok((tx, hash))
    }

    fn decode_eip712(payload: &[u8]) -> Result<Self, SerializationTransactionError> {
        let rlp = Rlp::new(payload);
        if rlp.item_count()? != EIP712_TX_FIELDS {
            return Err(DecoderError::RlpIncorrectListLen.into());
        }

        let factory_deps: Vec<Vec<u8>> = rlp.list_at(13)?;
        validate_factory_deps(&factory_deps)?;
        let custom_signature: Vec<u8> = rlp.val_at(14)?;
        let custom_signature = (!custom_signature.is_empty()).then_some(custom_signature);
        let paymaster_params = PaymasterParams::new(rlp.list_at(15)?)?;

        let mut tx = Self {
            nonce: decode_u256(&rlp, 0)?,
            max_priority_fee_per_gas: Some(decode_u256(&rlp, 1)?),
            max_fee_per_gas: Some(decode_u256(&rlp, 2)?),
            gas: decode_u256(&rlp, 3)?,
            to: decode_optional_address(&rlp, 4)?,
            value: decode_u256(&rlp, 5)?,
            input: Bytes(rlp.val_at(6)?),
            chain_id: Some(rlp.val_at(10)?),
            from: Some(
                decode_optional_address(&rlp, 11)?
                    .ok_or(SerializationTransactionError::MissingFrom)?,
            ),
            transaction_type: Some(EIP_712_TX_TYPE.into()),
            eip712_meta: Some(Eip712Meta {
                gas_per_pubdata: decode_u256(&rlp, 12)?,
                factory_deps: (!factory_deps.is_empty()).then_some(factory_deps),
                custom_signature,
                paymaster_params,
            }),
            ..Default::default()
        };

        let r: Vec<u8> = rlp.val_at(8)?;
        let s: Vec<u8> = rlp.val_at(9)?;
        let has_custom_signature = tx
            .eip712_meta
            .as_ref()
            .map_or(false, |meta| meta.custom_signature.is_some());
        if !has_custom_signature && !r.is_empty() && !s.is_empty() {
            let v = decode_u256(&rlp, 7)?;
            if v > U256::one() {
                return Err(SerializationTransactionError::InvalidSignature(v));
            }
            tx.v = Some(U64::from(v.low_u64()));
            tx.r = Some(u256_from_be(&r)?);
            tx.s = Some(u256_from_be(&s)?);
        }

        Ok(tx)
    }

    fn decode_typed_standard(tx_type: u8, payload: &[u8]) -> Result<Self, SerializationTransactionError> {
        let rlp = Rlp::new(payload);
        let fee_fields = if tx_type == EIP_1559_TX_TYPE { 2 } else { 1 };
        let unsigned_len = 7 + fee_fields;
        let item_count = rlp.item_count()?;
        if item_count != unsigned_len && item_count != unsigned_len + 3 {
            return Err(DecoderError::RlpIncorrectListLen.into());
        }

        let mut tx = Self {
            chain_id: Some(rlp.val_at(0)?),
            nonce: decode_u256(&rlp, 1)?,
            transaction_type: Some(tx_type.into()),
            ..Default::default()
        };
        if tx_type == EIP_1559_TX_TYPE {
            tx.max_priority_fee_per_gas = Some(decode_u256(&rlp, 2)?);
            tx.max_fee_per_gas = Some(decode_u256(&rlp, 3)?);
        } else {
            tx.gas_price = decode_u256(&rlp, 2)?;
        }
        let offset = 2 + fee_fields;
        tx.gas = decode_u256(&rlp, offset)?;
        tx.to = decode_optional_address(&rlp, offset + 1)?;
        tx.value = decode_u256(&rlp, offset + 2)?;
        tx.input = Bytes(rlp.val_at(offset + 3)?);
        tx.access_list = Some(decode_access_list(&rlp.at(offset + 4)?)?);
        if item_count == unsigned_len + 3 {
            tx.v = Some(U64::from(decode_u256(&rlp, unsigned_len)?.low_u64()));
            tx.r = Some(decode_u256(&rlp, unsigned_len + 1)?);
            tx.s = Some(decode_u256(&rlp, unsigned_len + 2)?);
        }

        Ok(tx)
    }

    fn decode_legacy(bytes: &[u8]) -> Result<Self, SerializationTransactionError> {
        let rlp = Rlp::new(bytes);
        let item_count = rlp.item_count()?;
        if item_count != 6 && item_count != 9 {
            return Err(DecoderError::RlpIncorrectListLen.into());
        }

        let mut tx = Self {
            nonce: decode_u256(&rlp, 0)?,
            gas_price: decode_u256(&rlp, 1)?,
            gas: decode_u256(&rlp, 2)?,
            to: decode_optional_address(&rlp, 3)?,
            value: decode_u256(&rlp, 4)?,
            input: Bytes(rlp.val_at(5)?),
            ..Default::default()
        };
        if item_count == 9 {
            let v: u64 = rlp.val_at(6)?;
            let r: Vec<u8> = rlp.val_at(7)?;
            let s: Vec<u8> = rlp.val_at(8)?;
            if r.is_empty() && s.is_empty() {
                // Unsigned EIP-155 payload.
                tx.chain_id = Some(v);
            } else {
                if v >= 35 {
                    tx.chain_id = Some((v - 35) / 2);
                }
                tx.v = Some(v.into());
                tx.r = Some(u256_from_be(&r)?);
                tx.s = Some(u256_from_be(&s)?);
            }
        }

        Ok(tx)
    }
}

fn with_type_prefix(tx_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(tx_type);
    bytes.extend_from_slice(payload);
    bytes
}

/// Integers are encoded as big-endian byte strings without leading zeros.
fn append_u256(rlp: &mut RlpStream, value: &U256) {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let start = buf.iter().position(|byte| *byte != 0).unwrap_or(buf.len());
    rlp.append(&buf[start..].to_vec());
}

fn append_optional_address(rlp: &mut RlpStream, address: Option<Address>) {
    match address {
        Some(address) => {
            rlp.append(&address.as_bytes().to_vec());
        }
        None => {
            rlp.append_empty_data();
        }
    }
}

fn append_signature_rs(rlp: &mut RlpStream, signature: &PackedEthSignature) {
    append_u256(rlp, &U256::from_big_endian(signature.r()));
    append_u256(rlp, &U256::from_big_endian(signature.s()));
}

fn append_access_list(rlp: &mut RlpStream, access_list: &[AccessListItem]) {
    rlp.begin_list(access_list.len());
    for item in access_list {
        rlp.begin_list(2);
        rlp.append(&item.address.as_bytes().to_vec());
        rlp.begin_list(item.storage_keys.len());
        for key in &item.storage_keys {
            rlp.append(&key.as_bytes().to_vec());
        }
    }
}

fn u256_from_be(bytes: &[u8]) -> Result<U256, SerializationTransactionError> {
    if bytes.len() > 32 {
        return Err(SerializationTransactionError::IntegerOverflow);
    }
    Ok(U256::from_big_endian(bytes))
}

fn decode_u256(rlp: &Rlp, index: usize) -> Result<U256, SerializationTransactionError> {
    let bytes: Vec<u8> = rlp.val_at(index)?;
    u256_from_be(&bytes)
}

fn decode_optional_address(
    rlp: &Rlp,
    index: usize,
) -> Result<Option<Address>, SerializationTransactionError> {
    let bytes: Vec<u8> = rlp.val_at(index)?;
    match bytes.len() {
        0 => Ok(None),
        20 => Ok(Some(Address::from_slice(&bytes))),
        len => Err(SerializationTransactionError::InvalidFieldLength(20, len)),
    }
}

fn decode_access_list(rlp: &Rlp) -> Result<AccessList, SerializationTransactionError> {
    let mut access_list = Vec::with_capacity(rlp.item_count()?);
    for item in rlp.iter() {
        let address = decode_optional_address(&item, 0)?
            .ok_or(SerializationTransactionError::InvalidFieldLength(20, 0))?;
        let storage_keys = item
            .at(1)?
            .iter()
            .map(|key| {
                let bytes: Vec<u8> = key.as_val()?;
                if bytes.len() != 32 {
                    return Err(SerializationTransactionError::InvalidFieldLength(32, bytes.len()));
                }
                Ok(H256::from_slice(&bytes))
            })
            .collect::<Result<Vec<_>, _>>()?;
        access_list.push(AccessListItem {
            address,
            storage_keys,
        });
    }
    Ok(access_list)
}

/// Request for `eth_call`, `eth_estimateGas` and `zks_estimateGasL1ToL2`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip712_meta: Option<Eip712Meta>,
}

impl CallRequest {
    pub fn builder() -> CallRequestBuilder {
        CallRequestBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct CallRequestBuilder {
    call_request: CallRequest,
}

impl CallRequestBuilder {
    pub fn from(mut self, from: Address) -> Self {
        self.call_request.from = Some(from);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.call_request.to = Some(to);
        self
    }

    pub fn gas(mut self, gas: U256) -> Self {
        self.call_request.gas = Some(gas);
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.call_request.gas_price = Some(gas_price);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.call_request.value = Some(value);
        self
    }

    pub fn data(mut self, data: Bytes) -> Self {
        self.call_request.data = Some(data);
        self
    }

    pub fn eip712_meta(mut self, eip712_meta: Eip712Meta) -> Self {
        self.call_request.eip712_meta = Some(eip712_meta);
        self
    }

    pub fn build(self) -> CallRequest {
        self.call_request
    }
}

impl From<&TransactionRequest> for CallRequest {
    fn from(tx: &TransactionRequest) -> Self {
        Self {
            from: tx.from,
            to: tx.to,
            gas: (!tx.gas.is_zero()).then_some(tx.gas),
            gas_price: (!tx.gas_price.is_zero()).then_some(tx.gas_price),
            max_fee_per_gas: tx.max_fee_per_gas,
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
            value: Some(tx.value),
            data: Some(tx.input.clone()),
            transaction_type: tx.transaction_type,
            eip712_meta: tx.eip712_meta.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const FIXTURE: &str = "71ea8080808080808082010e808082010e9436615cf349d7f6344891b1e7ca7c72883f5dc04982c350c080c0";

    fn private_key() -> H256 {
        H256::from_str("0x7726827caac94a7f9e1b160f7ea819f172f7b6f9d2a97f992c38edeab82d4110")
            .unwrap()
    }

    fn sender() -> Address {
        Address::from_str("0x36615Cf349d7F6344891B1e7CA7C72883F5dc049").unwrap()
    }

    fn valid_bytecode(fill: u8) -> Vec<u8> {
        vec![fill; 32]
    }

    fn populated_eip712_tx() -> TransactionRequest {
        TransactionRequest {
            nonce: 7.into(),
            from: Some(sender()),
            to: Some(Address::repeat_byte(0x42)),
            value: U256::exp10(18),
            gas: 1_000_000.into(),
            max_fee_per_gas: Some(250_000_000.into()),
            max_priority_fee_per_gas: Some(1.into()),
            input: Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
            transaction_type: Some(EIP_712_TX_TYPE.into()),
            eip712_meta: Some(Eip712Meta {
                gas_per_pubdata: 800.into(),
                factory_deps: Some(vec![valid_bytecode(1), valid_bytecode(2)]),
                custom_signature: None,
                paymaster_params: Some(PaymasterParams {
                    paymaster: Address::repeat_byte(0x99),
                    paymaster_input: vec![1, 2, 3],
                }),
            }),
            chain_id: Some(270),
            ..Default::default()
        }
    }

    fn sign(tx: &TransactionRequest) -> PackedEthSignature {
        PackedEthSignature::sign_raw(&private_key(), &tx.get_signed_digest().unwrap()).unwrap()
    }

    #[test]
    fn transaction_type_string() {
        assert_eq!(
            Eip712Transaction::default().encode_type(),
            "Transaction(uint256 txType,uint256 from,uint256 to,uint256 gasLimit,\
             uint256 gasPerPubdataByteLimit,uint256 maxFeePerGas,uint256 maxPriorityFeePerGas,\
             uint256 paymaster,uint256 nonce,uint256 value,bytes data,bytes32[] factoryDeps,\
             bytes paymasterInput)"
        );
    }

    #[test]
    fn minimal_transaction_matches_fixture() {
        let tx = TransactionRequest {
            chain_id: Some(270),
            from: Some(sender()),
            transaction_type: Some(EIP_712_TX_TYPE.into()),
            ..Default::default()
        };
        assert_eq!(hex::encode(tx.get_signed_bytes(None).unwrap()), FIXTURE);
    }

    #[test]
    fn fixture_decodes_without_signature() {
        let bytes = hex::decode(FIXTURE).unwrap();
        let (tx, hash) = TransactionRequest::from_bytes(&bytes).unwrap();
        assert_eq!(tx.chain_id, Some(270));
        assert_eq!(tx.from, Some(sender()));
        assert_eq!(tx.to, None);
        assert_eq!(tx.attached_signature(), None);
        let meta = tx.eip712_meta.clone().unwrap();
        assert_eq!(meta, Eip712Meta::default());
        assert_eq!(hash, tx.get_signed_digest().unwrap());
    }

    #[test]
    fn signing_input_applies_defaults() {
        let tx = TransactionRequest {
            gas_price: 100.into(),
            ..Default::default()
        };
        let input = tx.signing_input().unwrap();
        assert_eq!(input.tx_type, U256::from(EIP_712_TX_TYPE));
        assert_eq!(input.from, Address::zero());
        assert_eq!(input.to, Address::zero());
        assert_eq!(input.max_fee_per_gas, 100.into());
        assert_eq!(input.max_priority_fee_per_gas, U256::zero());
        assert_eq!(input.gas_per_pubdata_byte_limit, DEFAULT_L2_GAS_PER_PUBDATA_LIMIT.into());
        assert!(input.factory_deps.is_empty());
        assert!(input.paymaster_input.is_empty());
    }

    #[test]
    fn signing_input_hashes_factory_deps() {
        let tx = populated_eip712_tx();
        let input = tx.signing_input().unwrap();
        assert_eq!(
            input.factory_deps,
            vec![
                hash_bytecode(&valid_bytecode(1)).unwrap(),
                hash_bytecode(&valid_bytecode(2)).unwrap()
            ]
        );
        assert_eq!(input.paymaster, Address::repeat_byte(0x99));

        let mut invalid = tx;
        invalid.eip712_meta.as_mut().unwrap().factory_deps = Some(vec![vec![0; 64]]);
        assert_eq!(
            invalid.signing_input(),
            Err(SerializationTransactionError::InvalidFactoryDependencies(
                0,
                InvalidBytecodeError::EvenWordCount(2)
            ))
        );
    }

    #[test]
    fn eip712_requires_chain_id_and_from() {
        let mut tx = populated_eip712_tx();
        tx.chain_id = None;
        assert_eq!(
            tx.get_signed_digest(),
            Err(SerializationTransactionError::MissingChainId)
        );
        assert_eq!(
            tx.get_signed_bytes(None),
            Err(SerializationTransactionError::MissingChainId)
        );

        let mut tx = populated_eip712_tx();
        tx.from = None;
        assert_eq!(
            tx.get_signed_bytes(None),
            Err(SerializationTransactionError::MissingFrom)
        );
    }

    #[test]
    fn empty_custom_signature_is_rejected() {
        let mut tx = populated_eip712_tx();
        tx.eip712_meta.as_mut().unwrap().custom_signature = Some(vec![]);
        assert_eq!(
            tx.get_signed_bytes(None),
            Err(SerializationTransactionError::EmptySignatureNotAllowed)
        );
    }

    #[test]
    fn signed_eip712_round_trip() {
        let tx = populated_eip712_tx();
        let signature = sign(&tx);
        let bytes = tx.get_signed_bytes(Some(&signature)).unwrap();
        assert_eq!(bytes[0], EIP_712_TX_TYPE);

        let (decoded, hash) = TransactionRequest::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.nonce, tx.nonce);
        assert_eq!(decoded.from, tx.from);
        assert_eq!(decoded.to, tx.to);
        assert_eq!(decoded.value, tx.value);
        assert_eq!(decoded.gas, tx.gas);
        assert_eq!(decoded.max_fee_per_gas, tx.max_fee_per_gas);
        assert_eq!(decoded.max_priority_fee_per_gas, tx.max_priority_fee_per_gas);
        assert_eq!(decoded.input, tx.input);
        assert_eq!(decoded.chain_id, tx.chain_id);
        assert_eq!(decoded.eip712_meta, tx.eip712_meta);
        assert_eq!(decoded.attached_signature(), Some(signature.clone()));
        assert_eq!(decoded.raw, Some(Bytes(bytes)));

        let expected_hash =
            eip712_tx_hash(tx.get_signed_digest().unwrap(), &signature.serialize_packed());
        assert_eq!(hash, expected_hash);
        assert_eq!(
            signature
                .signature_recover_signer(&decoded.get_signed_digest().unwrap())
                .unwrap(),
            sender()
        );
    }

    #[test]
    fn custom_signature_round_trip() {
        let mut tx = populated_eip712_tx();
        let custom_signature = vec![0xab; 100];
        tx.eip712_meta.as_mut().unwrap().custom_signature = Some(custom_signature.clone());
        let bytes = tx.get_signed_bytes(None).unwrap();

        let (decoded, hash) = TransactionRequest::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.eip712_meta, tx.eip712_meta);
        assert_eq!(decoded.attached_signature(), None);
        assert_eq!(
            hash,
            eip712_tx_hash(tx.get_signed_digest().unwrap(), &custom_signature)
        );
    }

    #[test]
    fn signature_with_unexpected_v_is_rejected() {
        let tx = populated_eip712_tx();
        let bytes = tx.get_signed_bytes(Some(&sign(&tx))).unwrap();

        let rlp = Rlp::new(&bytes[1..]);
        let mut patched = RlpStream::new_list(EIP712_TX_FIELDS);
        for i in 0..EIP712_TX_FIELDS {
            if i == 7 {
                patched.append(&5u64);
            } else {
                patched.append_raw(rlp.at(i).unwrap().as_raw(), 1);
            }
        }
        let patched = with_type_prefix(EIP_712_TX_TYPE, &patched.out());

        assert_eq!(
            TransactionRequest::from_bytes(&patched),
            Err(SerializationTransactionError::InvalidSignature(5.into()))
        );
    }

    #[test]
    fn eip1559_round_trip_recovers_sender() {
        let tx = TransactionRequest {
            nonce: 3.into(),
            to: Some(Address::repeat_byte(0x10)),
            value: 1000.into(),
            gas: 21000.into(),
            max_fee_per_gas: Some(30_000_000_000u64.into()),
            max_priority_fee_per_gas: Some(1_000_000_000u64.into()),
            transaction_type: Some(EIP_1559_TX_TYPE.into()),
            access_list: Some(vec![AccessListItem {
                address: Address::repeat_byte(0x20),
                storage_keys: vec![H256::repeat_byte(0x30)],
            }]),
            chain_id: Some(9),
            ..Default::default()
        };
        let signature = sign(&tx);
        let bytes = tx.get_signed_bytes(Some(&signature)).unwrap();
        assert_eq!(bytes[0], EIP_1559_TX_TYPE);

        let (decoded, hash) = TransactionRequest::from_bytes(&bytes).unwrap();
        assert_eq!(hash, hash_bytes(&bytes));
        assert_eq!(decoded.from, Some(sender()));
        assert_eq!(decoded.access_list, tx.access_list);
        assert_eq!(decoded.max_fee_per_gas, tx.max_fee_per_gas);
        assert_eq!(decoded.chain_id, Some(9));
        assert_eq!(decoded.attached_signature(), Some(signature));
    }

    #[test]
    fn legacy_eip155_round_trip() {
        let tx = TransactionRequest {
            nonce: 1.into(),
            to: Some(Address::repeat_byte(0x10)),
            gas_price: 1_000_000_000u64.into(),
            gas: 21000.into(),
            chain_id: Some(5),
            ..Default::default()
        };
        let signature = sign(&tx);
        let bytes = tx.get_signed_bytes(Some(&signature)).unwrap();

        let (decoded, hash) = TransactionRequest::from_bytes(&bytes).unwrap();
        assert_eq!(hash, hash_bytes(&bytes));
        assert_eq!(decoded.chain_id, Some(5));
        assert_eq!(decoded.from, Some(sender()));
        assert_eq!(decoded.v, Some(signature.v_with_chain_id(Some(5)).into()));
        assert_eq!(decoded.attached_signature(), Some(signature));
    }

    #[test]
    fn typed_standard_transactions_require_chain_id() {
        let tx = TransactionRequest {
            transaction_type: Some(EIP_2930_TX_TYPE.into()),
            ..Default::default()
        };
        assert_eq!(
            tx.get_signed_bytes(None),
            Err(SerializationTransactionError::MissingChainId)
        );
    }

    #[test]
    fn unknown_leading_byte_is_rejected() {
        assert_eq!(
            TransactionRequest::from_bytes(&[0x05, 0xc0]),
            Err(SerializationTransactionError::UnknownTransactionFormat(0x05))
        );
    }
}

//! Resolution of withdrawal proofs and the routing of their finalization on L1.
//!
//! A withdrawal leaves two traces in its L2 receipt: an `L1MessageSent` event of the L1
//! messenger carrying the message itself, and an L2->L1 log sent by the messenger whose
//! position in the receipt is needed to request the Merkle proof. The n-th withdrawal of a
//! transaction is matched to the n-th trace of each kind.

use ethabi::{decode, Function, ParamType, Token};
use zkl2_config::constants::{is_eth, BOOTLOADER_ADDRESS, L1_MESSENGER_ADDRESS, L2_ETH_TOKEN_ADDRESS};
use zkl2_contracts::{
    claim_failed_deposit_function, finalize_deposit_function, finalize_eth_withdrawal_function,
    finalize_withdrawal_function, is_eth_withdrawal_finalized_function,
    is_withdrawal_finalized_function, l2_bridge_withdraw_function, l2_eth_withdraw_function,
};
use zkl2_types::{
    api::{L2ToL1Log, L2ToL1LogProof, Log, TransactionReceipt},
    events::is_l1_message_log,
    withdrawal::FinalizeWithdrawalParams,
    Address, H256, U256, U64,
};
use zkl2_utils::h256_to_account_address;

use crate::{errors::ClientError, utils::encode_call};

/// `index`-th `L1MessageSent` event of the receipt, with the position of the transaction in
/// its batch.
pub fn locate_withdrawal_log(
    receipt: &TransactionReceipt,
    index: usize,
) -> Result<(&Log, U64), ClientError> {
    let log = receipt
        .logs
        .iter()
        .filter(|log| is_l1_message_log(log))
        .nth(index)
        .ok_or(ClientError::WithdrawalLogNotFound(index))?;
    let l1_batch_tx_index = receipt
        .l1_batch_tx_index
        .ok_or_else(|| ClientError::MissingRequiredField("l1BatchTxIndex".into()))?;
    Ok((log, l1_batch_tx_index))
}

/// `index`-th L2->L1 log sent by the L1 messenger, with its position among all L2->L1 logs of
/// the receipt.
pub fn locate_l2_to_l1_log(
    receipt: &TransactionReceipt,
    index: usize,
) -> Result<(usize, &L2ToL1Log), ClientError> {
    receipt
        .l2_to_l1_logs
        .iter()
        .enumerate()
        .filter(|(_, log)| log.sender == L1_MESSENGER_ADDRESS)
        .nth(index)
        .ok_or(ClientError::WithdrawalLogNotFound(index))
}

pub fn build_finalize_withdrawal_params(
    log: &Log,
    l1_batch_tx_index: U64,
    proof: L2ToL1LogProof,
) -> Result<FinalizeWithdrawalParams, ClientError> {
    let sender = log
        .topics
        .get(1)
        .map(h256_to_account_address)
        .ok_or_else(|| ClientError::MalformedResponse("L1MessageSent without sender".into()))?;
    let message = decode(&[ParamType::Bytes], &log.data.0)?
        .into_iter()
        .next()
        .and_then(Token::into_bytes)
        .ok_or_else(|| ClientError::MalformedResponse("L1MessageSent without message".into()))?;
    let l1_batch_number = log
        .l1_batch_number
        .ok_or_else(|| ClientError::MissingRequiredField("l1BatchNumber".into()))?;
    let l2_tx_number_in_block = u16::try_from(l1_batch_tx_index.as_u64()).map_err(|_| {
        ClientError::MalformedResponse(format!("l1BatchTxIndex {l1_batch_tx_index} is too big"))
    })?;

    Ok(FinalizeWithdrawalParams {
        l1_batch_number,
        l2_message_index: proof.id,
        l2_tx_number_in_block,
        message,
        sender,
        proof: proof.proof,
    })
}

/// Contract a withdrawal is finalized or checked against on L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeTarget {
    /// ETH withdrawn to the L1 WETH bridge is unwrapped by the bridge itself.
    L1WethBridge(Address),
    MainContract(Address),
    /// Tokens go through the L1 counterpart of the L2 bridge that sent the message; it has to
    /// be asked from the L2 bridge.
    PairedL1Bridge { l2_bridge: Address },
}

impl FinalizeTarget {
    pub fn finalize_function(&self) -> Result<&'static Function, ethabi::Error> {
        match self {
            FinalizeTarget::MainContract(_) => finalize_eth_withdrawal_function(),
            _ => finalize_withdrawal_function(),
        }
    }

    pub fn is_finalized_function(&self) -> Result<&'static Function, ethabi::Error> {
        match self {
            FinalizeTarget::MainContract(_) => is_eth_withdrawal_finalized_function(),
            _ => is_withdrawal_finalized_function(),
        }
    }
}

/// Where to send the finalization of a withdrawal.
pub fn finalize_target(
    params: &FinalizeWithdrawalParams,
    main_contract: Address,
    l1_weth_bridge: Option<Address>,
) -> FinalizeTarget {
    if !is_eth(params.sender) {
        return FinalizeTarget::PairedL1Bridge {
            l2_bridge: params.sender,
        };
    }
    // The message starts with the selector of the L1 function followed by the receiver.
    let receiver = params
        .message
        .get(4..24)
        .map(Address::from_slice);
    match (receiver, l1_weth_bridge) {
        (Some(receiver), Some(weth_bridge)) if receiver == weth_bridge => {
            FinalizeTarget::L1WethBridge(weth_bridge)
        }
        _ => FinalizeTarget::MainContract(main_contract),
    }
}

/// Where to check whether a withdrawal was finalized. ETH withdrawals are always tracked by the
/// main contract.
pub fn finalization_check_target(sender: Address, main_contract: Address) -> FinalizeTarget {
    if is_eth(sender) {
        FinalizeTarget::MainContract(main_contract)
    } else {
        FinalizeTarget::PairedL1Bridge { l2_bridge: sender }
    }
}

fn proof_tokens(proof: &[H256]) -> Token {
    Token::Array(
        proof
            .iter()
            .map(|hash| Token::FixedBytes(hash.as_bytes().to_vec()))
            .collect(),
    )
}

/// Calldata of `finalizeWithdrawal`/`finalizeEthWithdrawal`; all targets take the same arguments.
pub fn finalize_withdrawal_calldata(
    target: &FinalizeTarget,
    params: &FinalizeWithdrawalParams,
) -> Result<Vec<u8>, ClientError> {
    encode_call(
        target.finalize_function()?,
        &[
            Token::Uint(params.l1_batch_number.as_u64().into()),
            Token::Uint(params.l2_message_index.into()),
            Token::Uint(params.l2_tx_number_in_block.into()),
            Token::Bytes(params.message.clone()),
            proof_tokens(&params.proof),
        ],
    )
}

pub fn is_finalized_calldata(
    target: &FinalizeTarget,
    params: &FinalizeWithdrawalParams,
) -> Result<Vec<u8>, ClientError> {
    encode_call(
        target.is_finalized_function()?,
        &[
            Token::Uint(params.l1_batch_number.as_u64().into()),
            Token::Uint(params.l2_message_index.into()),
        ],
    )
}

/// Position of the bootloader log reporting the outcome of a deposit.
///
/// A failed deposit is reported with a zero value; successful ones can't be claimed back.
pub fn locate_deposit_status_log(
    receipt: &TransactionReceipt,
    deposit_hash: H256,
) -> Result<usize, ClientError> {
    let (index, log) = receipt
        .l2_to_l1_logs
        .iter()
        .enumerate()
        .find(|(_, log)| log.sender == BOOTLOADER_ADDRESS && log.key == deposit_hash)
        .ok_or_else(|| {
            ClientError::MalformedResponse(format!("no status log of deposit {deposit_hash:?}"))
        })?;
    if !log.value.is_zero() {
        return Err(ClientError::NotAClaimableDeposit);
    }
    Ok(index)
}

/// Depositor and L1 token of a deposit, taken from the `finalizeDeposit` call it executed on L2.
pub fn decode_finalize_deposit(calldata: &[u8]) -> Result<(Address, Address), ClientError> {
    let function = finalize_deposit_function()?;
    if calldata.len() < 4 || calldata[..4] != function.short_signature() {
        return Err(ClientError::MalformedResponse(
            "deposit doesn't call finalizeDeposit".into(),
        ));
    }
    let tokens = function.decode_input(&calldata[4..])?;
    match (tokens.first(), tokens.get(2)) {
        (Some(Token::Address(l1_sender)), Some(Token::Address(l1_token))) => {
            Ok((*l1_sender, *l1_token))
        }
        _ => Err(ClientError::MalformedResponse(
            "unexpected finalizeDeposit arguments".into(),
        )),
    }
}

pub struct ClaimFailedDeposit<'a> {
    pub l1_sender: Address,
    pub l1_token: Address,
    pub deposit_hash: H256,
    pub l1_batch_number: U64,
    pub l1_batch_tx_index: U64,
    pub proof: &'a L2ToL1LogProof,
}

pub fn claim_failed_deposit_calldata(claim: &ClaimFailedDeposit) -> Result<Vec<u8>, ClientError> {
    let l2_tx_number_in_batch = u16::try_from(claim.l1_batch_tx_index.as_u64()).map_err(|_| {
        ClientError::MalformedResponse(format!(
            "l1BatchTxIndex {} is too big",
            claim.l1_batch_tx_index
        ))
    })?;
    encode_call(
        claim_failed_deposit_function()?,
        &[
            Token::Address(claim.l1_sender),
            Token::Address(claim.l1_token),
            Token::FixedBytes(claim.deposit_hash.as_bytes().to_vec()),
            Token::Uint(claim.l1_batch_number.as_u64().into()),
            Token::Uint(claim.proof.id.into()),
            Token::Uint(l2_tx_number_in_batch.into()),
            proof_tokens(&claim.proof.proof),
        ],
    )
}

/// Withdrawal from L2 to L1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// Token on L2; `ETH_ADDRESS` or the L2 ETH token for ether.
    pub token: Address,
    pub amount: U256,
    /// Receiver on L1, the wallet itself if not set.
    pub to: Option<Address>,
    /// L2 bridge to withdraw through, the default ERC-20 bridge if not set.
    pub bridge_address: Option<Address>,
}

/// Call to execute on L2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Call {
    pub contract: Address,
    pub calldata: Vec<u8>,
    pub value: U256,
}

pub fn withdraw_call(
    request: &WithdrawRequest,
    sender: Address,
    default_l2_bridge: Address,
) -> Result<L2Call, ClientError> {
    let to = request.to.unwrap_or(sender);
    if is_eth(request.token) {
        return Ok(L2Call {
            contract: L2_ETH_TOKEN_ADDRESS,
            calldata: encode_call(l2_eth_withdraw_function()?, &[Token::Address(to)])?,
            value: request.amount,
        });
    }

    Ok(L2Call {
        contract: request.bridge_address.unwrap_or(default_l2_bridge),
        calldata: encode_call(
            l2_bridge_withdraw_function()?,
            &[
                Token::Address(to),
                Token::Address(request.token),
                Token::Uint(request.amount),
            ],
        )?,
        value: U256::zero(),
    })
}

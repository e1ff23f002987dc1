//! Deposits and other priority operations requested from L1, and what they cost.

use ethabi::{encode, Token};
use zkl2_config::constants::{
    is_eth, ETHER_DECIMALS, L1_RECOMMENDED_MIN_ERC20_DEPOSIT_GAS_LIMIT,
    L1_RECOMMENDED_MIN_ETH_DEPOSIT_GAS_LIMIT, REQUIRED_L1_TO_L2_GAS_PER_PUBDATA_LIMIT,
};
use zkl2_contracts::{
    finalize_deposit_function, l1_bridge_deposit_function, request_l2_transaction_function,
};
use zkl2_types::{
    fee::FullDepositFee, Address, Bytes, CallRequest, Eip712Meta, TransactionRequest, U256,
};
use zkl2_utils::format_units;

use super::Overrides;
use crate::{errors::ClientError, utils::encode_call};

/// Amount used in place of the real one when a deposit is only estimated.
pub const DUMMY_DEPOSIT_AMOUNT: u64 = 1;

/// Deposit of ETH or an ERC-20 token from L1 to L2.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositRequest {
    /// Token on L1, `ETH_ADDRESS` for ether.
    pub token: Address,
    pub amount: U256,
    /// Receiver on L2, the wallet itself if not set.
    pub to: Option<Address>,
    pub operator_tip: Option<U256>,
    /// L1 bridge for tokens, the default ERC-20 bridge if not set.
    pub bridge_address: Option<Address>,
    /// Estimated with `zks_estimateGasL1ToL2` if not set.
    pub l2_gas_limit: Option<U256>,
    pub gas_per_pubdata_byte: Option<U256>,
    pub refund_recipient: Option<Address>,
    /// Approve the bridge to spend `amount` before depositing a token.
    pub approve_erc20: bool,
    pub overrides: Overrides,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDeposit {
    pub token: Address,
    pub amount: U256,
    pub to: Address,
    pub operator_tip: U256,
    pub bridge_address: Option<Address>,
    pub l2_gas_limit: Option<U256>,
    pub gas_per_pubdata_byte: U256,
    pub refund_recipient: Option<Address>,
    pub approve_erc20: bool,
    pub overrides: Overrides,
}

impl DepositRequest {
    pub fn new(token: Address, amount: U256) -> Self {
        Self {
            token,
            amount,
            ..Default::default()
        }
    }

    pub fn normalize(self, sender: Address) -> NormalizedDeposit {
        NormalizedDeposit {
            token: self.token,
            amount: self.amount,
            to: self.to.unwrap_or(sender),
            operator_tip: self.operator_tip.unwrap_or_default(),
            bridge_address: self.bridge_address,
            l2_gas_limit: self.l2_gas_limit,
            gas_per_pubdata_byte: self
                .gas_per_pubdata_byte
                .unwrap_or_else(|| REQUIRED_L1_TO_L2_GAS_PER_PUBDATA_LIMIT.into()),
            refund_recipient: self.refund_recipient,
            approve_erc20: self.approve_erc20,
            overrides: self.overrides,
        }
    }
}

impl NormalizedDeposit {
    pub fn is_eth(&self) -> bool {
        is_eth(self.token)
    }

    /// ETH deposits are plain priority operations transferring `amount` to the receiver.
    pub fn into_execute(self, l2_gas_limit: U256) -> ExecuteRequest {
        ExecuteRequest {
            contract_address: self.to,
            calldata: Vec::new(),
            l2_value: Some(self.amount),
            l2_gas_limit: Some(l2_gas_limit),
            operator_tip: Some(self.operator_tip),
            gas_per_pubdata_byte: Some(self.gas_per_pubdata_byte),
            refund_recipient: self.refund_recipient,
            factory_deps: None,
            overrides: self.overrides,
        }
    }
}

/// Arbitrary L2 call requested from L1 through the main contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteRequest {
    pub contract_address: Address,
    pub calldata: Vec<u8>,
    pub l2_value: Option<U256>,
    pub l2_gas_limit: Option<U256>,
    pub operator_tip: Option<U256>,
    pub gas_per_pubdata_byte: Option<U256>,
    pub refund_recipient: Option<Address>,
    pub factory_deps: Option<Vec<Vec<u8>>>,
    pub overrides: Overrides,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedExecute {
    pub contract_address: Address,
    pub calldata: Vec<u8>,
    pub l2_value: U256,
    pub l2_gas_limit: Option<U256>,
    pub operator_tip: U256,
    pub gas_per_pubdata_byte: U256,
    pub refund_recipient: Address,
    pub factory_deps: Vec<Vec<u8>>,
    pub overrides: Overrides,
}

impl ExecuteRequest {
    pub fn normalize(self, sender: Address) -> NormalizedExecute {
        NormalizedExecute {
            contract_address: self.contract_address,
            calldata: self.calldata,
            l2_value: self.l2_value.unwrap_or_default(),
            l2_gas_limit: self.l2_gas_limit,
            operator_tip: self.operator_tip.unwrap_or_default(),
            gas_per_pubdata_byte: self
                .gas_per_pubdata_byte
                .unwrap_or_else(|| REQUIRED_L1_TO_L2_GAS_PER_PUBDATA_LIMIT.into()),
            refund_recipient: self.refund_recipient.unwrap_or(sender),
            factory_deps: self.factory_deps.unwrap_or_default(),
            overrides: self.overrides,
        }
    }
}

pub fn check_base_cost(base_cost: U256, value: U256) -> Result<(), ClientError> {
    if base_cost > value {
        return Err(ClientError::InsufficientValue { base_cost, value });
    }
    Ok(())
}

/// Fails unless the L1 balance covers the L2 part of a deposit plus the dummy amount the fee
/// is estimated with, i.e. unless `balance >= base_cost + DUMMY_DEPOSIT_AMOUNT`.
pub fn check_deposit_balance(
    balance: U256,
    base_cost: U256,
    gas_price: U256,
    token: Address,
) -> Result<(), ClientError> {
    match base_cost.checked_add(DUMMY_DEPOSIT_AMOUNT.into()) {
        Some(required) if balance >= required => return Ok(()),
        _ => {}
    }
    let gas_limit = if is_eth(token) {
        L1_RECOMMENDED_MIN_ETH_DEPOSIT_GAS_LIMIT
    } else {
        L1_RECOMMENDED_MIN_ERC20_DEPOSIT_GAS_LIMIT
    };
    let recommended = U256::from(gas_limit)
        .saturating_mul(gas_price)
        .saturating_add(base_cost);
    Err(ClientError::InsufficientBalance {
        recommended: format_units(recommended, ETHER_DECIMALS),
    })
}

/// Fees of an L1 transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum L1FeeParams {
    Legacy {
        gas_price: U256,
    },
    Eip1559 {
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    },
}

impl L1FeeParams {
    /// Fees explicitly set by the caller, if any.
    pub fn from_overrides(overrides: &Overrides) -> Option<Self> {
        if let Some(gas_price) = overrides.gas_price {
            return Some(Self::Legacy { gas_price });
        }
        overrides.max_fee_per_gas.map(|max_fee_per_gas| Self::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas: overrides
                .max_priority_fee_per_gas
                .unwrap_or(max_fee_per_gas),
        })
    }

    /// Fees suggested by the node. Nodes without a base fee get a legacy transaction; others
    /// pay 1.5x the base fee, since the L2 part of a priority operation depends on it.
    pub fn from_fee_data(
        base_fee_per_gas: Option<U256>,
        max_priority_fee_per_gas: U256,
        gas_price: U256,
    ) -> Self {
        match base_fee_per_gas {
            Some(base_fee) => Self::Eip1559 {
                max_fee_per_gas: (base_fee.saturating_mul(3.into()) / 2)
                    .saturating_add(max_priority_fee_per_gas),
                max_priority_fee_per_gas,
            },
            None => Self::Legacy { gas_price },
        }
    }

    /// Gas price the L2 base cost is computed for.
    pub fn price_for_estimation(&self) -> U256 {
        match self {
            Self::Legacy { gas_price } => *gas_price,
            Self::Eip1559 {
                max_fee_per_gas, ..
            } => *max_fee_per_gas,
        }
    }

    pub fn apply(&self, tx: &mut TransactionRequest) {
        match *self {
            Self::Legacy { gas_price } => {
                tx.gas_price = gas_price;
                tx.transaction_type = None;
            }
            Self::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                tx.max_fee_per_gas = Some(max_fee_per_gas);
                tx.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
                tx.transaction_type = Some(2.into());
            }
        }
    }
}

/// Call to execute on L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1Call {
    pub to: Address,
    pub calldata: Vec<u8>,
    pub value: U256,
}

/// `requestL2Transaction` of the main contract paying `base_cost` for the L2 part.
pub fn request_execute_call(
    request: &NormalizedExecute,
    main_contract: Address,
    l2_gas_limit: U256,
    base_cost: U256,
) -> Result<L1Call, ClientError> {
    let value = request.overrides.value.unwrap_or_else(|| {
        base_cost
            .saturating_add(request.operator_tip)
            .saturating_add(request.l2_value)
    });
    check_base_cost(base_cost, value)?;

    let calldata = encode_call(
        request_l2_transaction_function()?,
        &[
            Token::Address(request.contract_address),
            Token::Uint(request.l2_value),
            Token::Bytes(request.calldata.clone()),
            Token::Uint(l2_gas_limit),
            Token::Uint(request.gas_per_pubdata_byte),
            Token::Array(
                request
                    .factory_deps
                    .iter()
                    .cloned()
                    .map(Token::Bytes)
                    .collect(),
            ),
            Token::Address(request.refund_recipient),
        ],
    )?;
    Ok(L1Call {
        to: main_contract,
        calldata,
        value,
    })
}

/// `deposit` of an L1 bridge. Tokens are refunded to the zero address unless a recipient is
/// set, which makes the bridge refund the sender.
pub fn erc20_deposit_call(
    deposit: &NormalizedDeposit,
    bridge: Address,
    l2_gas_limit: U256,
    base_cost: U256,
) -> Result<L1Call, ClientError> {
    let value = deposit
        .overrides
        .value
        .unwrap_or_else(|| base_cost.saturating_add(deposit.operator_tip));
    check_base_cost(base_cost, value)?;

    let calldata = encode_call(
        l1_bridge_deposit_function()?,
        &[
            Token::Address(deposit.to),
            Token::Address(deposit.token),
            Token::Uint(deposit.amount),
            Token::Uint(l2_gas_limit),
            Token::Uint(deposit.gas_per_pubdata_byte),
            Token::Address(deposit.refund_recipient.unwrap_or_default()),
        ],
    )?;
    Ok(L1Call {
        to: bridge,
        calldata,
        value,
    })
}

/// Request for `zks_estimateGasL1ToL2` describing the L2 side of a priority operation.
pub fn l1_to_l2_call_request(
    caller: Address,
    contract: Address,
    calldata: Vec<u8>,
    l2_value: U256,
    gas_per_pubdata_byte: U256,
    factory_deps: Option<Vec<Vec<u8>>>,
) -> CallRequest {
    CallRequest::builder()
        .from(caller)
        .to(contract)
        .value(l2_value)
        .data(Bytes(calldata))
        .eip712_meta(Eip712Meta {
            gas_per_pubdata: gas_per_pubdata_byte,
            factory_deps: factory_deps.filter(|deps| !deps.is_empty()),
            ..Default::default()
        })
        .build()
}

/// Token metadata the L2 bridge deploys a new token with. Every part is the raw ABI-encoded
/// output of the corresponding ERC-20 getter.
pub fn erc20_bridge_data(name: Vec<u8>, symbol: Vec<u8>, decimals: Vec<u8>) -> Vec<u8> {
    encode(&[
        Token::Bytes(name),
        Token::Bytes(symbol),
        Token::Bytes(decimals),
    ])
}

/// Call the L2 bridge executes when a token deposit reaches L2.
pub fn finalize_deposit_calldata(
    l1_sender: Address,
    l2_receiver: Address,
    l1_token: Address,
    amount: U256,
    bridge_data: Vec<u8>,
) -> Result<Vec<u8>, ClientError> {
    encode_call(
        finalize_deposit_function()?,
        &[
            Token::Address(l1_sender),
            Token::Address(l2_receiver),
            Token::Address(l1_token),
            Token::Uint(amount),
            Token::Bytes(bridge_data),
        ],
    )
}

pub fn full_deposit_fee(
    base_cost: U256,
    l1_gas_limit: U256,
    l2_gas_limit: U256,
    fees: &L1FeeParams,
) -> FullDepositFee {
    let mut fee = FullDepositFee {
        base_cost,
        l1_gas_limit,
        l2_gas_limit,
        ..Default::default()
    };
    match *fees {
        L1FeeParams::Legacy { gas_price } => fee.gas_price = Some(gas_price),
        L1FeeParams::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        } => {
            fee.max_fee_per_gas = Some(max_fee_per_gas);
            fee.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
        }
    }
    fee
}

use ethabi::{Function, Token};
use zkl2_config::constants::{L1_FEE_ESTIMATION_COEF_DENOMINATOR, L1_FEE_ESTIMATION_COEF_NUMERATOR};
use zkl2_types::{api::BlockNumber, Address, Bytes, CallRequest, H256, U256};
use zkl2_web3_decl::namespaces::EthNamespaceClient;

use crate::errors::ClientError;

/// Parses a big-endian hex string, left-padding it to 32 bytes.
pub fn h256_from_hex_be(value: &str) -> Result<H256, hex::FromHexError> {
    let value = value.trim_start_matches("0x");
    if value.len() > 64 {
        return Err(hex::FromHexError::InvalidStringLength);
    }
    let padded = format!("{value:0>64}");
    let mut buffer = [0u8; 32];
    hex::decode_to_slice(padded, &mut buffer)?;
    Ok(H256(buffer))
}

/// L1 gas estimations of priority operations are bumped by 20%.
pub fn scale_gas_limit(gas_limit: U256) -> U256 {
    gas_limit.saturating_mul(L1_FEE_ESTIMATION_COEF_NUMERATOR.into())
        / U256::from(L1_FEE_ESTIMATION_COEF_DENOMINATOR)
}

pub fn encode_call(function: &Function, args: &[Token]) -> Result<Vec<u8>, ClientError> {
    Ok(function.encode_input(args)?)
}

/// Executes a read-only call against the latest state and decodes its output.
pub async fn call_contract<P>(
    provider: &P,
    contract: Address,
    function: &Function,
    args: &[Token],
) -> Result<Vec<Token>, ClientError>
where
    P: EthNamespaceClient + Sync,
{
    let output = call_contract_raw(provider, contract, encode_call(function, args)?).await?;
    Ok(function.decode_output(&output.0)?)
}

pub async fn call_contract_raw<P>(
    provider: &P,
    contract: Address,
    calldata: Vec<u8>,
) -> Result<Bytes, ClientError>
where
    P: EthNamespaceClient + Sync,
{
    let request = CallRequest::builder()
        .to(contract)
        .data(Bytes(calldata))
        .build();
    Ok(provider.call(request, BlockNumber::Latest).await?)
}

pub(crate) fn expect_uint(tokens: Vec<Token>, what: &str) -> Result<U256, ClientError> {
    match tokens.into_iter().next() {
        Some(Token::Uint(value)) => Ok(value),
        other => Err(ClientError::MalformedResponse(format!(
            "{what}: expected uint, got {other:?}"
        ))),
    }
}

pub(crate) fn expect_address(tokens: Vec<Token>, what: &str) -> Result<Address, ClientError> {
    match tokens.into_iter().next() {
        Some(Token::Address(value)) => Ok(value),
        other => Err(ClientError::MalformedResponse(format!(
            "{what}: expected address, got {other:?}"
        ))),
    }
}

pub(crate) fn expect_bool(tokens: Vec<Token>, what: &str) -> Result<bool, ClientError> {
    match tokens.into_iter().next() {
        Some(Token::Bool(value)) => Ok(value),
        other => Err(ClientError::MalformedResponse(format!(
            "{what}: expected bool, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_is_left_padded() {
        let value = h256_from_hex_be("0x1f").unwrap();
        assert_eq!(value, H256::from_low_u64_be(0x1f));
        assert!(h256_from_hex_be(&"f".repeat(65)).is_err());
        assert!(h256_from_hex_be("0xzz").is_err());
    }

    #[test]
    fn gas_limit_is_scaled_up() {
        assert_eq!(scale_gas_limit(U256::from(100_000)), U256::from(120_000));
        assert_eq!(scale_gas_limit(U256::from(7)), U256::from(8));
        assert_eq!(scale_gas_limit(U256::MAX), U256::MAX / 10);
    }

    #[test]
    fn unexpected_tokens_are_reported() {
        assert_eq!(
            expect_uint(vec![Token::Uint(5.into())], "baseCost").unwrap(),
            U256::from(5)
        );
        assert!(matches!(
            expect_bool(vec![Token::Uint(5.into())], "isFinalized"),
            Err(ClientError::MalformedResponse(_))
        ));
        assert!(matches!(
            expect_address(vec![], "l1Bridge"),
            Err(ClientError::MalformedResponse(_))
        ));
    }
}

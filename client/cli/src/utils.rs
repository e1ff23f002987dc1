use std::str::FromStr;

use anyhow::Result;
use zkl2_config::{load_client_config, ClientConfig};
use zkl2_types::{Address, L2ChainId, H256};
use zkl2_wallet_sdk::{
    signer::Signer, utils::h256_from_hex_be, PrivateKeySigner, Wallet,
};
use zkl2_web3_decl::{
    jsonrpsee::http_client::{HttpClient, HttpClientBuilder},
    namespaces::EthNamespaceClient,
};

use crate::errors::Error;

pub(crate) fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let trimmed = value.trim().trim_start_matches("0x");
    Ok(hex::decode(trimmed).map_err(|_| Error::InvalidHex(value.to_string()))?)
}

pub(crate) fn parse_h256(value: &str) -> Result<H256> {
    Ok(h256_from_hex_be(value).map_err(|_| Error::InvalidHash(value.to_string()))?)
}

pub(crate) fn parse_address(value: &str) -> Result<Address> {
    Ok(Address::from_str(value).map_err(|_| Error::InvalidAddress(value.to_string()))?)
}

/// Configuration files first, plain environment variables as a fallback.
pub(crate) fn load_config() -> Result<ClientConfig> {
    match load_client_config() {
        Ok(config) => Ok(config),
        Err(file_err) => ClientConfig::try_from_env()
            .map_err(|env_err| Error::MissingConfig(format!("{file_err}; {env_err}")).into()),
    }
}

pub(crate) fn l2_client(config: &ClientConfig) -> Result<HttpClient> {
    Ok(HttpClientBuilder::default().build(&config.l2_rpc_url)?)
}

fn signing_key(private_key: Option<&str>) -> Result<H256> {
    match private_key {
        Some(key) => parse_h256(key),
        // Queries never sign, any valid key will do.
        None => Ok(H256::from_low_u64_be(1)),
    }
}

/// Wallet of `private_key`, or of a throwaway account for commands that only read state.
pub(crate) async fn wallet(
    config: &ClientConfig,
    private_key: Option<&str>,
) -> Result<Wallet<PrivateKeySigner, HttpClient>> {
    let eth_signer = PrivateKeySigner::new(signing_key(private_key)?)?;
    let chain_id = l2_client(config)?.chain_id().await?;
    let signer = Signer::new(
        eth_signer.clone(),
        eth_signer.address(),
        L2ChainId(chain_id.as_u64()),
    );
    Ok(Wallet::with_http_clients(config, signer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_inputs() {
        assert_eq!(decode_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex(" 0a\n").unwrap(), vec![10]);
        assert!(decode_hex("0x123").is_err());
        assert!(parse_address("0x36615Cf349d7F6344891B1e7CA7C72883F5dc049").is_ok());
        assert!(parse_address("36615Cf349").is_err());
        assert_eq!(parse_h256("0x01").unwrap(), H256::from_low_u64_be(1));
    }

    #[test]
    fn missing_key_falls_back_to_a_valid_one() {
        let key = signing_key(None).unwrap();
        assert!(PrivateKeySigner::new(key).is_ok());
        assert_eq!(
            signing_key(Some("0x02")).unwrap(),
            H256::from_low_u64_be(2)
        );
        assert!(signing_key(Some("zz")).is_err());
    }
}

use zkl2_basic_types::{web3::signing, H256};

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    signing::keccak256(bytes)
}

pub fn hash_bytes(bytes: &[u8]) -> H256 {
    H256(keccak256(bytes))
}

/// Topic of an event with the given canonical signature, e.g. `Transfer(address,address,uint256)`.
pub fn event_topic(signature: &str) -> H256 {
    hash_bytes(signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_known_values() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex::encode(event_topic("Transfer(address,address,uint256)")),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }
}

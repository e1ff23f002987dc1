use zkl2_basic_types::{Address, H160};

const fn system_address(low: u16) -> Address {
    let mut bytes = [0u8; 20];
    bytes[18] = (low >> 8) as u8;
    bytes[19] = low as u8;
    H160(bytes)
}

/// Sentinel used by the SDK and the bridges to denote the native asset on L1.
pub const ETH_ADDRESS: Address = H160([0u8; 20]);

/// The formal address of the bootloader. It is the sender of the
/// "deposit executed" L2->L1 logs of priority operations.
pub const BOOTLOADER_ADDRESS: Address = system_address(0x8001);
pub const CONTRACT_DEPLOYER_ADDRESS: Address = system_address(0x8006);
pub const L1_MESSENGER_ADDRESS: Address = system_address(0x8008);
/// The native asset as seen on L2. Withdrawals of ETH are sent to L1 by this contract.
pub const L2_ETH_TOKEN_ADDRESS: Address = system_address(0x800a);

/// Offset added to the address of an L1 contract when it calls L2.
pub const L1_TO_L2_ALIAS_OFFSET: Address = H160([
    0x11, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x11, 0x11,
]);

/// Both representations of the native asset are accepted wherever a token is expected.
pub fn is_eth(token: Address) -> bool {
    token == ETH_ADDRESS || token == L2_ETH_TOKEN_ADDRESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_addresses_are_left_padded() {
        assert_eq!(
            format!("{:?}", BOOTLOADER_ADDRESS),
            "0x0000000000000000000000000000000000008001"
        );
        assert_eq!(
            format!("{:?}", CONTRACT_DEPLOYER_ADDRESS),
            "0x0000000000000000000000000000000000008006"
        );
        assert_eq!(
            format!("{:?}", L1_MESSENGER_ADDRESS),
            "0x0000000000000000000000000000000000008008"
        );
        assert_eq!(
            format!("{:?}", L2_ETH_TOKEN_ADDRESS),
            "0x000000000000000000000000000000000000800a"
        );
        assert_eq!(
            format!("{:?}", L1_TO_L2_ALIAS_OFFSET),
            "0x1111000000000000000000000000000000001111"
        );
    }

    #[test]
    fn eth_has_two_representations() {
        assert!(is_eth(ETH_ADDRESS));
        assert!(is_eth(L2_ETH_TOKEN_ADDRESS));
        assert!(!is_eth(L1_MESSENGER_ADDRESS));
    }
}

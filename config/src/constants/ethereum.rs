/// Denotes the first byte of the rollup's EIP-712-signed transaction.
pub const EIP_712_TX_TYPE: u8 = 0x71;

/// Denotes the first byte of an `EIP-1559` transaction.
pub const EIP_1559_TX_TYPE: u8 = 0x02;

/// Denotes the first byte of an `EIP-2930` transaction.
pub const EIP_2930_TX_TYPE: u8 = 0x01;

/// Legacy transactions have no type byte; this value is used for `transaction_type`.
pub const LEGACY_TX_TYPE: u8 = 0x00;

pub const EIP712_DOMAIN_NAME: &str = "zkSync";
pub const EIP712_DOMAIN_VERSION: &str = "2";

pub const ETHER_DECIMALS: usize = 18;

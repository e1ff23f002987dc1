use zkl2_basic_types::{Address, H256, U256};

pub fn address_to_h256(address: &Address) -> H256 {
    let mut buffer = [0u8; 32];
    buffer[12..].copy_from_slice(address.as_bytes());
    H256(buffer)
}

/// Takes the lower 20 bytes of the word, as the EVM does for `address` values.
pub fn h256_to_account_address(value: &H256) -> Address {
    Address::from_slice(&value.as_bytes()[12..])
}

pub fn address_to_u256(address: &Address) -> U256 {
    U256::from_big_endian(address.as_bytes())
}

pub fn u256_to_account_address(value: &U256) -> Address {
    h256_to_account_address(&u256_to_h256(*value))
}

pub fn u256_to_h256(num: U256) -> H256 {
    let mut bytes = [0u8; 32];
    num.to_big_endian(&mut bytes);
    H256::from_slice(&bytes)
}

pub fn h256_to_u256(num: H256) -> U256 {
    U256::from_big_endian(num.as_bytes())
}

/// Renders `wei` as a decimal number of ether without losing precision.
pub fn format_units(wei: U256, decimals: usize) -> String {
    let digits = wei.to_string();
    let (integer, fraction) = if digits.len() > decimals {
        let (integer, fraction) = digits.split_at(digits.len() - decimals);
        (integer.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{integer}.0")
    } else {
        format!("{integer}.{fraction}")
    }
}

use sha2::{Digest, Sha256};
use zkl2_basic_types::H256;
use zkl2_config::constants::{BYTECODE_HASH_VERSION, MAX_BYTECODE_LENGTH_BYTES};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidBytecodeError {
    #[error("Bytecode length {0} is not divisible by 32")]
    InvalidBytecodeLength(usize),
    #[error("Bytecode too long: {0} bytes, while max {1} allowed")]
    BytecodeTooLong(usize, usize),
    #[error("Bytecode has even number of 32-byte words: {0}")]
    EvenWordCount(usize),
}

pub fn validate_bytecode(code: &[u8]) -> Result<(), InvalidBytecodeError> {
    let bytecode_len = code.len();

    if bytecode_len % 32 != 0 {
        return Err(InvalidBytecodeError::InvalidBytecodeLength(bytecode_len));
    }

    if bytecode_len > MAX_BYTECODE_LENGTH_BYTES {
        return Err(InvalidBytecodeError::BytecodeTooLong(
            bytecode_len,
            MAX_BYTECODE_LENGTH_BYTES,
        ));
    }

    let bytecode_len_words = bytecode_len / 32;
    if bytecode_len_words % 2 == 0 {
        return Err(InvalidBytecodeError::EvenWordCount(bytecode_len_words));
    }

    Ok(())
}

/// Versioned hash of deployable code.
///
/// Layout: `[version (2 bytes) | length in words (2 bytes, BE) | sha256(code)[4..32]]`.
pub fn hash_bytecode(code: &[u8]) -> Result<H256, InvalidBytecodeError> {
    validate_bytecode(code)?;

    let mut hash: [u8; 32] = Sha256::digest(code).into();
    // `validate_bytecode` bounds the word count by `u16::MAX`.
    let len_in_words = (code.len() / 32) as u16;
    hash[0..2].copy_from_slice(&BYTECODE_HASH_VERSION);
    hash[2..4].copy_from_slice(&len_in_words.to_be_bytes());

    Ok(H256(hash))
}

pub fn bytecode_len_in_words(bytecode_hash: &H256) -> u16 {
    u16::from_be_bytes([bytecode_hash[2], bytecode_hash[3]])
}

pub fn bytecode_len_in_bytes(bytecode_hash: &H256) -> usize {
    bytecode_len_in_words(bytecode_hash) as usize * 32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_length_not_divisible_by_32() {
        assert_eq!(
            hash_bytecode(&[0u8; 31]),
            Err(InvalidBytecodeError::InvalidBytecodeLength(31))
        );
    }

    #[test]
    fn rejects_even_word_count() {
        assert_eq!(
            hash_bytecode(&[0u8; 64]),
            Err(InvalidBytecodeError::EvenWordCount(2))
        );
    }

    #[test]
    fn rejects_too_long_bytecode() {
        let code = vec![0u8; MAX_BYTECODE_LENGTH_BYTES + 64];
        assert_eq!(
            validate_bytecode(&code),
            Err(InvalidBytecodeError::BytecodeTooLong(
                MAX_BYTECODE_LENGTH_BYTES + 64,
                MAX_BYTECODE_LENGTH_BYTES
            ))
        );
    }

    #[test]
    fn accepts_longest_possible_bytecode() {
        // 2^16 - 1 words is odd, so it is valid.
        let code = vec![0u8; MAX_BYTECODE_LENGTH_BYTES];
        let hash = hash_bytecode(&code).unwrap();
        assert_eq!(bytecode_len_in_words(&hash), u16::MAX);
    }

    #[test]
    fn hash_has_version_and_length_prefix() {
        let code = [0u8; 96];
        let hash = hash_bytecode(&code).unwrap();
        assert_eq!(hash[0], 1);
        assert_eq!(hash[1], 0);
        assert_eq!(&hash[2..4], &[0, 3]);
        assert_eq!(bytecode_len_in_bytes(&hash), 96);

        let digest: [u8; 32] = Sha256::digest(code).into();
        assert_eq!(&hash[4..], &digest[4..]);
    }

    #[test]
    fn different_code_gives_different_hash() {
        let mut code = [0u8; 32];
        let first = hash_bytecode(&code).unwrap();
        code[31] = 1;
        let second = hash_bytecode(&code).unwrap();
        assert_ne!(first, second);
        assert_eq!(first[..4], second[..4]);
    }
}

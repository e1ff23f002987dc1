pub mod contracts;
pub mod ethereum;
pub mod fees;

pub use contracts::*;
pub use ethereum::*;
pub use fees::*;

/// Version marker written into the first two bytes of every bytecode hash.
pub const BYTECODE_HASH_VERSION: [u8; 2] = [1, 0];

pub const MAX_BYTECODE_LENGTH_IN_WORDS: usize = (1 << 16) - 1;
pub const MAX_BYTECODE_LENGTH_BYTES: usize = MAX_BYTECODE_LENGTH_IN_WORDS * 32;

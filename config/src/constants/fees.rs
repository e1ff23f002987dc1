/// `gasPerPubdataByteLimit` used for L2 transactions unless the caller overrides it.
pub const DEFAULT_L2_GAS_PER_PUBDATA_LIMIT: u64 = 50_000;

/// The minimal `gasPerPubdataByteLimit` the main contract accepts for priority operations.
pub const REQUIRED_L1_TO_L2_GAS_PER_PUBDATA_LIMIT: u64 = 800;

/// Gas limits used to compute the balance recommended to a user that can't afford a deposit.
pub const L1_RECOMMENDED_MIN_ETH_DEPOSIT_GAS_LIMIT: u64 = 200_000;
pub const L1_RECOMMENDED_MIN_ERC20_DEPOSIT_GAS_LIMIT: u64 = 200_000;

/// L1 gas estimations for deposits are scaled by `NUMERATOR / DENOMINATOR`.
pub const L1_FEE_ESTIMATION_COEF_NUMERATOR: u64 = 12;
pub const L1_FEE_ESTIMATION_COEF_DENOMINATOR: u64 = 10;

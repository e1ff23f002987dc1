//! Primitive types shared by every crate of the workspace.
//!
//! Hash and integer types come from `web3`; the newtypes below only exist so
//! that a batch number can't be passed where a nonce is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, Deref, DerefMut, Sub};
use std::str::FromStr;

pub use web3::{
    self,
    types::{AccessList, AccessListItem, Address, Bytes, H160, H256, U128, U256, U64},
};

#[macro_use]
mod macros;

basic_type!(
    /// Chain id of the settlement layer.
    L1ChainId,
    u64
);

basic_type!(
    /// Chain id of the rollup.
    L2ChainId,
    u64
);

basic_type!(
    /// Account nonce on L2.
    Nonce,
    u32
);

basic_type!(
    /// Number of an L1 batch, i.e. the unit the rollup settles on L1.
    L1BatchNumber,
    u32
);

basic_type!(
    /// Number of an L2 block.
    MiniblockNumber,
    u32
);

basic_type!(
    /// Serial id of a priority operation in the L1 priority queue.
    PriorityOpId,
    u64
);

impl From<L2ChainId> for U256 {
    fn from(chain_id: L2ChainId) -> Self {
        U256::from(chain_id.0)
    }
}

pub use convert::*;

pub mod address_alias;
pub mod bytecode;
pub mod convert;
pub mod deployment;
pub mod hash;

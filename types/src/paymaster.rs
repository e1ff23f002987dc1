//! Inputs of the paymaster flows supported by the network.

use ethabi::{encode, short_signature, ParamType, Token};
use zkl2_basic_types::{Address, U256};

use crate::transaction_request::PaymasterParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymasterInput {
    /// The paymaster is allowed to pull at least `minimal_allowance` of `token` from the sender.
    ApprovalBased {
        token: Address,
        minimal_allowance: U256,
        inner_input: Vec<u8>,
    },
    General {
        inner_input: Vec<u8>,
    },
}

impl PaymasterInput {
    pub fn encode(&self) -> Vec<u8> {
        let (selector, tokens) = match self {
            Self::ApprovalBased {
                token,
                minimal_allowance,
                inner_input,
            } => (
                short_signature(
                    "approvalBased",
                    &[ParamType::Address, ParamType::Uint(256), ParamType::Bytes],
                ),
                vec![
                    Token::Address(*token),
                    Token::Uint(*minimal_allowance),
                    Token::Bytes(inner_input.clone()),
                ],
            ),
            Self::General { inner_input } => (
                short_signature("general", &[ParamType::Bytes]),
                vec![Token::Bytes(inner_input.clone())],
            ),
        };
        let mut input = selector.to_vec();
        input.extend(encode(&tokens));
        input
    }

    pub fn into_params(self, paymaster: Address) -> PaymasterParams {
        PaymasterParams {
            paymaster,
            paymaster_input: self.encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_flow_layout() {
        let input = PaymasterInput::General {
            inner_input: vec![],
        }
        .encode();
        assert_eq!(&input[..4], &short_signature("general", &[ParamType::Bytes]));
        // Offset word and zero length word.
        assert_eq!(input.len(), 4 + 64);
    }

    #[test]
    fn approval_based_flow_layout() {
        let token = Address::repeat_byte(0x0a);
        let params = PaymasterInput::ApprovalBased {
            token,
            minimal_allowance: 1.into(),
            inner_input: vec![1],
        }
        .into_params(Address::repeat_byte(0x0b));
        assert_eq!(params.paymaster, Address::repeat_byte(0x0b));

        let input = &params.paymaster_input;
        assert_eq!(&input[16..36], token.as_bytes());
        assert_eq!(input[67], 1);
    }
}

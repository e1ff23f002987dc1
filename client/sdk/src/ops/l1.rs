use async_trait::async_trait;
use ethabi::Token;
use zkl2_contracts::{
    erc20_allowance_function, erc20_approve_function, erc20_contract,
    l1_bridge_l2_bridge_function, l2_bridge_l1_bridge_function,
    l2_transaction_base_cost_function,
};
use zkl2_logs::{debug, info};
use zkl2_types::{
    api::{BlockNumber, BridgeAddresses},
    fee::FullDepositFee,
    withdrawal::FinalizeWithdrawalParams,
    Address, H256, U256,
};
use zkl2_utils::address_alias::{apply_l1_to_l2_alias, undo_l1_to_l2_alias};
use zkl2_web3_decl::namespaces::{EthNamespaceClient, ZksNamespaceClient};

use super::L1Ops;
use crate::{
    errors::ClientError,
    operation::{
        deposit::{
            check_deposit_balance, erc20_bridge_data, erc20_deposit_call,
            finalize_deposit_calldata, full_deposit_fee, l1_to_l2_call_request,
            request_execute_call, DepositRequest, ExecuteRequest, L1Call, L1FeeParams,
            NormalizedDeposit, NormalizedExecute, DUMMY_DEPOSIT_AMOUNT,
        },
        priority_op::PriorityOpHandle,
        withdrawal::{
            build_finalize_withdrawal_params, claim_failed_deposit_calldata,
            decode_finalize_deposit, finalization_check_target, finalize_target,
            finalize_withdrawal_calldata, is_finalized_calldata, locate_deposit_status_log,
            locate_l2_to_l1_log, locate_withdrawal_log, ClaimFailedDeposit, FinalizeTarget,
        },
        Overrides,
    },
    utils::{
        call_contract, call_contract_raw, encode_call, expect_address, expect_bool, expect_uint,
        scale_gas_limit,
    },
    wallet::Wallet,
    EthereumSigner,
};

impl<S, P> Wallet<S, P>
where
    S: EthereumSigner,
    P: EthNamespaceClient + ZksNamespaceClient + Clone + Send + Sync,
{
    /// L1 bridge a token deposit goes through.
    async fn l1_bridge_for(&self, deposit: &NormalizedDeposit) -> Result<Address, ClientError> {
        match deposit.bridge_address {
            Some(bridge) => Ok(bridge),
            None => Ok(self.contract_addresses().await?.bridges.l1_erc20_default_bridge),
        }
    }

    /// L1 counterpart of an L2 bridge.
    async fn paired_l1_bridge(&self, l2_bridge: Address) -> Result<Address, ClientError> {
        let output =
            call_contract(&self.l2, l2_bridge, l2_bridge_l1_bridge_function()?, &[]).await?;
        expect_address(output, "l1Bridge")
    }

    async fn resolve_target(&self, target: FinalizeTarget) -> Result<Address, ClientError> {
        match target {
            FinalizeTarget::L1WethBridge(address) | FinalizeTarget::MainContract(address) => {
                Ok(address)
            }
            FinalizeTarget::PairedL1Bridge { l2_bridge } => self.paired_l1_bridge(l2_bridge).await,
        }
    }

    async fn erc20_metadata(&self, token: Address) -> Result<Vec<u8>, ClientError> {
        let contract = erc20_contract()?;
        let getter = |name: &str| encode_call(contract.function(name)?, &[]);

        let name = call_contract_raw(&self.l1, token, getter("name")?).await?;
        let symbol = call_contract_raw(&self.l1, token, getter("symbol")?).await?;
        let decimals = call_contract_raw(&self.l1, token, getter("decimals")?).await?;
        Ok(erc20_bridge_data(name.0, symbol.0, decimals.0))
    }

    /// L2 gas the deposit needs, estimated by the L2 node.
    pub async fn estimate_l2_gas_for_deposit(
        &self,
        deposit: &NormalizedDeposit,
    ) -> Result<U256, ClientError> {
        if deposit.is_eth() {
            let request = l1_to_l2_call_request(
                self.address(),
                deposit.to,
                Vec::new(),
                deposit.amount,
                deposit.gas_per_pubdata_byte,
                None,
            );
            return Ok(self.l2.estimate_gas_l1_to_l2(request).await?);
        }

        let bridges = self.contract_addresses().await?.bridges;
        let (l1_bridge, l2_bridge) = match deposit.bridge_address {
            Some(l1_bridge) => {
                let l2_bridge_function = l1_bridge_l2_bridge_function()?;
                let output = call_contract(&self.l1, l1_bridge, l2_bridge_function, &[]).await?;
                (l1_bridge, expect_address(output, "l2Bridge")?)
            }
            None => (
                bridges.l1_erc20_default_bridge,
                bridges.l2_erc20_default_bridge,
            ),
        };
        let bridge_data = self.erc20_metadata(deposit.token).await?;
        let calldata = finalize_deposit_calldata(
            self.address(),
            deposit.to,
            deposit.token,
            deposit.amount,
            bridge_data,
        )?;
        // On L2 the deposit is executed by the aliased L1 bridge.
        let request = l1_to_l2_call_request(
            apply_l1_to_l2_alias(l1_bridge),
            l2_bridge,
            calldata,
            U256::zero(),
            deposit.gas_per_pubdata_byte,
            None,
        );
        Ok(self.l2.estimate_gas_l1_to_l2(request).await?)
    }

    pub async fn estimate_l2_gas_for_execute(
        &self,
        request: &NormalizedExecute,
    ) -> Result<U256, ClientError> {
        let call = l1_to_l2_call_request(
            self.address(),
            request.contract_address,
            request.calldata.clone(),
            request.l2_value,
            request.gas_per_pubdata_byte,
            Some(request.factory_deps.clone()),
        );
        Ok(self.l2.estimate_gas_l1_to_l2(call).await?)
    }

    async fn priority_op_call(
        &self,
        request: &NormalizedExecute,
        fees: &L1FeeParams,
    ) -> Result<L1Call, ClientError> {
        let l2_gas_limit = match request.l2_gas_limit {
            Some(gas_limit) => gas_limit,
            None => self.estimate_l2_gas_for_execute(request).await?,
        };
        let base_cost = self
            .base_cost(
                l2_gas_limit,
                request.gas_per_pubdata_byte,
                fees.price_for_estimation(),
            )
            .await?;
        let main_contract = self.main_contract_address().await?;
        request_execute_call(request, main_contract, l2_gas_limit, base_cost)
    }

    async fn deposit_call(
        &self,
        deposit: &NormalizedDeposit,
        fees: &L1FeeParams,
    ) -> Result<L1Call, ClientError> {
        let l2_gas_limit = match deposit.l2_gas_limit {
            Some(gas_limit) => gas_limit,
            None => self.estimate_l2_gas_for_deposit(deposit).await?,
        };
        if deposit.is_eth() {
            let request = deposit
                .clone()
                .into_execute(l2_gas_limit)
                .normalize(self.address());
            return self.priority_op_call(&request, fees).await;
        }

        let base_cost = self
            .base_cost(
                l2_gas_limit,
                deposit.gas_per_pubdata_byte,
                fees.price_for_estimation(),
            )
            .await?;
        let bridge = self.l1_bridge_for(deposit).await?;
        erc20_deposit_call(deposit, bridge, l2_gas_limit, base_cost)
    }

    /// Lets the bridge spend `amount` of the token, unless it already can. Returns the nonce
    /// to use for the next L1 transaction.
    async fn approve_erc20(
        &self,
        deposit: &NormalizedDeposit,
    ) -> Result<Option<U256>, ClientError> {
        let bridge = self.l1_bridge_for(deposit).await?;
        if self.l1_allowance(deposit.token, bridge).await? >= deposit.amount {
            return Ok(None);
        }

        let call = L1Call {
            to: deposit.token,
            calldata: encode_call(
                erc20_approve_function()?,
                &[Token::Address(bridge), Token::Uint(deposit.amount)],
            )?,
            value: U256::zero(),
        };
        let overrides = Overrides {
            value: None,
            gas_limit: None,
            ..deposit.overrides.clone()
        };
        let fees = self.l1_fee_params(&overrides).await?;
        let tx = self
            .populate_l1_transaction(&call, &overrides, &fees, false)
            .await?;
        let hash = self.send_l1_transaction(&tx).await?;
        info!(
            "Approved {:?} to spend {} of {:?} in {:?}",
            bridge, deposit.amount, deposit.token, hash
        );
        Ok(Some(tx.nonce + 1))
    }
}

#[async_trait]
impl<S, P> L1Ops for Wallet<S, P>
where
    S: EthereumSigner,
    P: EthNamespaceClient + ZksNamespaceClient + Clone + Send + Sync,
{
    type Provider = P;

    async fn main_contract_address(&self) -> Result<Address, ClientError> {
        Ok(self.contract_addresses().await?.main_contract)
    }

    async fn bridge_contracts(&self) -> Result<BridgeAddresses, ClientError> {
        Ok(self.contract_addresses().await?.bridges)
    }

    async fn base_cost(
        &self,
        l2_gas_limit: U256,
        gas_per_pubdata_byte: U256,
        gas_price: U256,
    ) -> Result<U256, ClientError> {
        let main_contract = self.main_contract_address().await?;
        let output = call_contract(
            &self.l1,
            main_contract,
            l2_transaction_base_cost_function()?,
            &[
                Token::Uint(gas_price),
                Token::Uint(l2_gas_limit),
                Token::Uint(gas_per_pubdata_byte),
            ],
        )
        .await?;
        expect_uint(output, "l2TransactionBaseCost")
    }

    async fn l1_allowance(&self, token: Address, spender: Address) -> Result<U256, ClientError> {
        let output = call_contract(
            &self.l1,
            token,
            erc20_allowance_function()?,
            &[Token::Address(self.address()), Token::Address(spender)],
        )
        .await?;
        expect_uint(output, "allowance")
    }

    async fn full_required_deposit_fee(
        &self,
        request: DepositRequest,
    ) -> Result<FullDepositFee, ClientError> {
        let deposit = request.normalize(self.address());
        let fees = self.l1_fee_params(&deposit.overrides).await?;
        let gas_price = fees.price_for_estimation();

        let dummy_amount = U256::from(DUMMY_DEPOSIT_AMOUNT);
        let estimation = NormalizedDeposit {
            amount: dummy_amount,
            ..deposit.clone()
        };
        let l2_gas_limit = match deposit.l2_gas_limit {
            Some(gas_limit) => gas_limit,
            None => self.estimate_l2_gas_for_deposit(&estimation).await?,
        };
        let base_cost = self
            .base_cost(l2_gas_limit, deposit.gas_per_pubdata_byte, gas_price)
            .await?;

        let balance = self
            .l1
            .get_balance(self.address(), BlockNumber::Latest)
            .await?;
        check_deposit_balance(balance, base_cost, gas_price, deposit.token)?;

        if !deposit.is_eth() {
            let bridge = self.l1_bridge_for(&deposit).await?;
            let allowance = self.l1_allowance(deposit.token, bridge).await?;
            if allowance < dummy_amount {
                return Err(ClientError::InsufficientAllowance {
                    allowance,
                    required: dummy_amount,
                });
            }
        }

        let estimation = NormalizedDeposit {
            l2_gas_limit: Some(l2_gas_limit),
            overrides: deposit.overrides.without_fees(),
            ..estimation
        };
        let estimation_fees = self.l1_fee_params(&estimation.overrides).await?;
        let call = self.deposit_call(&estimation, &estimation_fees).await?;
        let l1_gas_limit = scale_gas_limit(self.estimate_l1_gas(&call).await?);

        let fee = full_deposit_fee(base_cost, l1_gas_limit, l2_gas_limit, &fees);
        debug!("Full deposit fee: {:?}", fee);
        Ok(fee)
    }

    async fn deposit(
        &self,
        request: DepositRequest,
    ) -> Result<PriorityOpHandle<P>, ClientError> {
        let mut deposit = request.normalize(self.address());
        if !deposit.is_eth() && deposit.approve_erc20 {
            if let Some(nonce) = self.approve_erc20(&deposit).await? {
                deposit.overrides.nonce = Some(nonce);
            }
        }

        let fees = self.l1_fee_params(&deposit.overrides).await?;
        let call = self.deposit_call(&deposit, &fees).await?;
        let tx = self
            .populate_l1_transaction(&call, &deposit.overrides, &fees, true)
            .await?;
        let hash = self.send_l1_transaction(&tx).await?;
        info!(
            "Deposit of {} {:?} to {:?} requested in {:?}",
            deposit.amount, deposit.token, deposit.to, hash
        );

        let main_contract = self.main_contract_address().await?;
        Ok(self.priority_op_handle(hash, main_contract))
    }

    async fn request_execute(
        &self,
        request: ExecuteRequest,
    ) -> Result<PriorityOpHandle<P>, ClientError> {
        let request = request.normalize(self.address());
        let fees = self.l1_fee_params(&request.overrides).await?;
        let call = self.priority_op_call(&request, &fees).await?;
        let tx = self
            .populate_l1_transaction(&call, &request.overrides, &fees, true)
            .await?;
        let hash = self.send_l1_transaction(&tx).await?;

        let main_contract = self.main_contract_address().await?;
        Ok(self.priority_op_handle(hash, main_contract))
    }

    async fn finalize_withdrawal_params(
        &self,
        l2_tx_hash: H256,
        index: usize,
    ) -> Result<FinalizeWithdrawalParams, ClientError> {
        let receipt = self
            .l2
            .get_transaction_receipt(l2_tx_hash)
            .await?
            .ok_or(ClientError::TransactionNotFound(l2_tx_hash))?;
        let (log, l1_batch_tx_index) = locate_withdrawal_log(&receipt, index)?;
        let (log_position, _) = locate_l2_to_l1_log(&receipt, index)?;

        let proof = self
            .l2
            .get_l2_to_l1_log_proof(l2_tx_hash, Some(log_position))
            .await?
            .ok_or(ClientError::ProofNotFound)?;
        build_finalize_withdrawal_params(log, l1_batch_tx_index, proof)
    }

    async fn finalize_withdrawal(
        &self,
        params: FinalizeWithdrawalParams,
        overrides: Overrides,
    ) -> Result<H256, ClientError> {
        let addresses = self.contract_addresses().await?;
        let target = finalize_target(
            &params,
            addresses.main_contract,
            addresses.bridges.l1_weth_bridge,
        );
        let to = self.resolve_target(target).await?;
        debug!("Finalizing withdrawal from {:?} via {:?}", params.sender, target);

        let call = L1Call {
            to,
            calldata: finalize_withdrawal_calldata(&target, &params)?,
            value: U256::zero(),
        };
        self.execute_l1_call(&call, &overrides).await
    }

    async fn is_withdrawal_finalized(
        &self,
        l2_tx_hash: H256,
        index: usize,
    ) -> Result<bool, ClientError> {
        let params = self.finalize_withdrawal_params(l2_tx_hash, index).await?;
        let main_contract = self.main_contract_address().await?;
        let target = finalization_check_target(params.sender, main_contract);
        let to = self.resolve_target(target).await?;

        let output =
            call_contract_raw(&self.l1, to, is_finalized_calldata(&target, &params)?).await?;
        let tokens = target.is_finalized_function()?.decode_output(&output.0)?;
        expect_bool(tokens, "isWithdrawalFinalized")
    }

    async fn claim_failed_deposit(
        &self,
        deposit_hash: H256,
        overrides: Overrides,
    ) -> Result<H256, ClientError> {
        let receipt = self
            .l2
            .get_transaction_receipt(deposit_hash)
            .await?
            .ok_or(ClientError::TransactionNotFound(deposit_hash))?;
        let log_position = locate_deposit_status_log(&receipt, deposit_hash)?;

        let tx = self
            .l2
            .get_transaction_by_hash(deposit_hash)
            .await?
            .ok_or(ClientError::TransactionNotFound(deposit_hash))?;
        let (l1_sender, l1_token) = decode_finalize_deposit(&tx.input.0)?;
        // The deposit was executed on behalf of the aliased L1 bridge.
        let l1_bridge = undo_l1_to_l2_alias(receipt.from);

        let proof = self
            .l2
            .get_l2_to_l1_log_proof(deposit_hash, Some(log_position))
            .await?
            .ok_or(ClientError::ProofNotFound)?;
        let l1_batch_number = receipt
            .l1_batch_number
            .ok_or_else(|| ClientError::MissingRequiredField("l1BatchNumber".into()))?;
        let l1_batch_tx_index = receipt
            .l1_batch_tx_index
            .ok_or_else(|| ClientError::MissingRequiredField("l1BatchTxIndex".into()))?;

        let call = L1Call {
            to: l1_bridge,
            calldata: claim_failed_deposit_calldata(&ClaimFailedDeposit {
                l1_sender,
                l1_token,
                deposit_hash,
                l1_batch_number,
                l1_batch_tx_index,
                proof: &proof,
            })?,
            value: U256::zero(),
        };
        info!("Claiming failed deposit {:?} from {:?}", deposit_hash, l1_bridge);
        self.execute_l1_call(&call, &overrides).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ethabi::encode;
    use serde_json::{json, Value};
    use zkl2_config::constants::{BOOTLOADER_ADDRESS, L1_MESSENGER_ADDRESS, L2_ETH_TOKEN_ADDRESS};
    use zkl2_contracts::{
        claim_failed_deposit_function, is_eth_withdrawal_finalized_function,
        is_withdrawal_finalized_function,
    };
    use zkl2_types::{
        api::{Block, L2ToL1Log, L2ToL1LogProof, Log, Transaction, TransactionReceipt},
        events::L1_MESSAGE_EVENT_SIGNATURE,
        Bytes, CallRequest, L2ChainId, TransactionRequest, U64,
    };
    use zkl2_utils::address_to_h256;

    use super::*;
    use crate::{
        errors::RpcError, private_key_signer::PrivateKeySigner, signer::Signer,
        testonly::MockClient,
    };

    const WITHDRAWAL_HASH: H256 = H256::repeat_byte(0x42);

    fn test_wallet(l1: MockClient, l2: MockClient) -> Wallet<PrivateKeySigner, MockClient> {
        let eth_signer = PrivateKeySigner::new(
            H256::from_str("0x7726827caac94a7f9e1b160f7ea819f172f7b6f9d2a97f992c38edeab82d4110")
                .unwrap(),
        )
        .unwrap();
        let signer = Signer::new(eth_signer.clone(), eth_signer.address(), L2ChainId(270));
        Wallet::new(l1, l2, signer)
    }

    fn message_log(sender: Address, message: Vec<u8>) -> Log {
        Log {
            address: L1_MESSENGER_ADDRESS,
            topics: vec![
                *L1_MESSAGE_EVENT_SIGNATURE,
                address_to_h256(&sender),
                H256::repeat_byte(0xaa),
            ],
            data: Bytes(encode(&[Token::Bytes(message)])),
            l1_batch_number: Some(U64::from(77)),
            ..Default::default()
        }
    }

    fn l2_to_l1_log(sender: Address, key: H256) -> L2ToL1Log {
        L2ToL1Log {
            sender,
            key,
            ..Default::default()
        }
    }

    /// ETH withdrawal followed by a withdrawal through `token_bridge`.
    fn withdrawal_receipt(token_bridge: Address) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: WITHDRAWAL_HASH,
            l1_batch_tx_index: Some(U64::from(5)),
            logs: vec![
                message_log(L2_ETH_TOKEN_ADDRESS, vec![1; 56]),
                message_log(token_bridge, vec![2; 76]),
            ],
            l2_to_l1_logs: vec![
                l2_to_l1_log(BOOTLOADER_ADDRESS, H256::zero()),
                l2_to_l1_log(L1_MESSENGER_ADDRESS, H256::repeat_byte(1)),
                l2_to_l1_log(L1_MESSENGER_ADDRESS, H256::repeat_byte(2)),
            ],
            ..Default::default()
        }
    }

    fn proof(id: u32) -> L2ToL1LogProof {
        L2ToL1LogProof {
            proof: vec![H256::repeat_byte(0x10), H256::repeat_byte(0x11)],
            id,
            root: H256::repeat_byte(0x12),
        }
    }

    fn l2_node(token_bridge: Address, main_contract: Address) -> MockClient {
        MockClient::default()
            .respond("eth_getTransactionReceipt", withdrawal_receipt(token_bridge))
            .respond("zks_getL2ToL1LogProof", proof(3))
            .respond("zks_getMainContract", main_contract)
            .respond("zks_getBridgeContracts", BridgeAddresses::default())
    }

    /// Contract and calldata of an `eth_call` request.
    fn call_target(params: &Value) -> (Address, Vec<u8>) {
        let request: CallRequest = serde_json::from_value(params[0].clone()).unwrap();
        (request.to.unwrap(), request.data.unwrap().0)
    }

    #[tokio::test]
    async fn withdrawal_proof_is_requested_at_log_position() {
        let token_bridge = Address::repeat_byte(0xb2);
        let l2 = l2_node(token_bridge, Address::repeat_byte(0xc0));
        let wallet = test_wallet(MockClient::default(), l2.clone());

        let params = wallet
            .finalize_withdrawal_params(WITHDRAWAL_HASH, 1)
            .await
            .unwrap();
        assert_eq!(params.sender, token_bridge);
        assert_eq!(params.message, vec![2; 76]);
        assert_eq!(params.l1_batch_number, U64::from(77));
        assert_eq!(params.l2_message_index, 3);
        assert_eq!(params.l2_tx_number_in_block, 5);
        // The bootloader log comes first, so the second withdrawal sits at position 2.
        assert_eq!(
            l2.requests("zks_getL2ToL1LogProof"),
            vec![json!([WITHDRAWAL_HASH, 2])]
        );
    }

    #[tokio::test]
    async fn missing_receipt_or_proof_is_reported() {
        let l2 = MockClient::default()
            .respond("eth_getTransactionReceipt", withdrawal_receipt(Address::repeat_byte(0xb2)))
            .respond("zks_getL2ToL1LogProof", Value::Null);
        let wallet = test_wallet(MockClient::default(), l2);
        assert!(matches!(
            wallet.finalize_withdrawal_params(WITHDRAWAL_HASH, 0).await,
            Err(ClientError::ProofNotFound)
        ));

        let l2 = MockClient::default().respond("eth_getTransactionReceipt", Value::Null);
        let wallet = test_wallet(MockClient::default(), l2.clone());
        assert!(matches!(
            wallet.finalize_withdrawal_params(WITHDRAWAL_HASH, 0).await,
            Err(ClientError::TransactionNotFound(hash)) if hash == WITHDRAWAL_HASH
        ));
        assert!(l2.requests("zks_getL2ToL1LogProof").is_empty());
    }

    #[tokio::test]
    async fn node_errors_are_rpc_errors() {
        let wallet = test_wallet(MockClient::default(), MockClient::default());
        assert!(matches!(
            wallet.finalize_withdrawal_params(WITHDRAWAL_HASH, 0).await,
            Err(ClientError::RpcError(RpcError::Custom(_)))
        ));
    }

    #[tokio::test]
    async fn eth_withdrawal_is_checked_against_main_contract() {
        let main_contract = Address::repeat_byte(0xc0);
        let l2 = l2_node(Address::repeat_byte(0xb2), main_contract);
        let l1 = MockClient::default().respond("eth_call", Bytes(encode(&[Token::Bool(true)])));
        let wallet = test_wallet(l1.clone(), l2.clone());

        assert!(wallet.is_withdrawal_finalized(WITHDRAWAL_HASH, 0).await.unwrap());

        let calls = l1.requests("eth_call");
        assert_eq!(calls.len(), 1);
        let (to, data) = call_target(&calls[0]);
        assert_eq!(to, main_contract);
        let function = is_eth_withdrawal_finalized_function().unwrap();
        assert_eq!(data[..4], function.short_signature());
        assert_eq!(
            function.decode_input(&data[4..]).unwrap(),
            vec![Token::Uint(77.into()), Token::Uint(3.into())]
        );
        assert!(l2.requests("eth_call").is_empty());
    }

    #[tokio::test]
    async fn token_withdrawal_is_checked_against_paired_bridge() {
        let token_bridge = Address::repeat_byte(0xb2);
        let l1_bridge = Address::repeat_byte(0xb1);
        let l2 = l2_node(token_bridge, Address::repeat_byte(0xc0))
            .respond("eth_call", Bytes(encode(&[Token::Address(l1_bridge)])));
        let l1 = MockClient::default().respond("eth_call", Bytes(encode(&[Token::Bool(false)])));
        let wallet = test_wallet(l1.clone(), l2.clone());

        assert!(!wallet.is_withdrawal_finalized(WITHDRAWAL_HASH, 1).await.unwrap());

        let (to, data) = call_target(&l2.requests("eth_call")[0]);
        assert_eq!(to, token_bridge);
        assert_eq!(data, l2_bridge_l1_bridge_function().unwrap().short_signature());

        let (to, data) = call_target(&l1.requests("eth_call")[0]);
        assert_eq!(to, l1_bridge);
        assert_eq!(
            data[..4],
            is_withdrawal_finalized_function().unwrap().short_signature()
        );
    }

    #[tokio::test]
    async fn withdrawal_check_rejects_non_bool_output() {
        let l2 = l2_node(Address::repeat_byte(0xb2), Address::repeat_byte(0xc0));
        let l1 = MockClient::default().respond("eth_call", Bytes(Vec::new()));
        let wallet = test_wallet(l1, l2);
        assert!(wallet.is_withdrawal_finalized(WITHDRAWAL_HASH, 0).await.is_err());
    }

    #[tokio::test]
    async fn failed_deposit_is_claimed_from_unaliased_sender() {
        let l1_bridge = Address::repeat_byte(0xb1);
        let depositor = Address::repeat_byte(0xd0);
        let l1_token = Address::repeat_byte(0x70);
        let deposit_hash = H256::repeat_byte(0xde);
        let sent_hash = H256::repeat_byte(0x5e);

        let receipt = TransactionReceipt {
            transaction_hash: deposit_hash,
            from: apply_l1_to_l2_alias(l1_bridge),
            l1_batch_number: Some(U64::from(9)),
            l1_batch_tx_index: Some(U64::from(4)),
            l2_to_l1_logs: vec![l2_to_l1_log(BOOTLOADER_ADDRESS, deposit_hash)],
            ..Default::default()
        };
        let deposit = Transaction {
            hash: deposit_hash,
            input: Bytes(
                finalize_deposit_calldata(depositor, depositor, l1_token, 10.into(), Vec::new())
                    .unwrap(),
            ),
            ..Default::default()
        };
        let l2 = MockClient::default()
            .respond("eth_getTransactionReceipt", receipt)
            .respond("eth_getTransactionByHash", deposit)
            .respond("zks_getL2ToL1LogProof", proof(6));
        let l1 = MockClient::default()
            .respond(
                "eth_getBlockByNumber",
                Block {
                    base_fee_per_gas: Some(100.into()),
                    ..Default::default()
                },
            )
            .respond("eth_maxPriorityFeePerGas", U256::from(2))
            .respond("eth_getTransactionCount", U256::from(7))
            .respond("eth_chainId", U64::from(9))
            .respond("eth_estimateGas", U256::from(100_000))
            .respond("eth_sendRawTransaction", sent_hash);
        let wallet = test_wallet(l1.clone(), l2.clone());

        let hash = wallet
            .claim_failed_deposit(deposit_hash, Overrides::default())
            .await
            .unwrap();
        assert_eq!(hash, sent_hash);
        assert_eq!(
            l2.requests("zks_getL2ToL1LogProof"),
            vec![json!([deposit_hash, 0])]
        );

        let sent = l1.requests("eth_sendRawTransaction");
        let bytes: Bytes = serde_json::from_value(sent[0][0].clone()).unwrap();
        let (tx, _) = TransactionRequest::from_bytes(&bytes.0).unwrap();
        assert_eq!(tx.to, Some(l1_bridge));
        assert_eq!(tx.from, Some(wallet.address()));
        assert_eq!(tx.nonce, U256::from(7));
        assert_eq!(tx.gas, U256::from(100_000));

        let claim = claim_failed_deposit_function().unwrap();
        assert_eq!(tx.input.0[..4], claim.short_signature());
        let args = claim.decode_input(&tx.input.0[4..]).unwrap();
        assert_eq!(args[0], Token::Address(depositor));
        assert_eq!(args[1], Token::Address(l1_token));
        assert_eq!(args[2], Token::FixedBytes(deposit_hash.as_bytes().to_vec()));
        assert_eq!(args[3], Token::Uint(9.into()));
        assert_eq!(args[4], Token::Uint(6.into()));
        assert_eq!(args[5], Token::Uint(4.into()));
    }

    #[tokio::test]
    async fn successful_deposit_is_not_claimable() {
        let deposit_hash = H256::repeat_byte(0xde);
        let receipt = TransactionReceipt {
            l2_to_l1_logs: vec![L2ToL1Log {
                value: H256::from_low_u64_be(1),
                ..l2_to_l1_log(BOOTLOADER_ADDRESS, deposit_hash)
            }],
            ..Default::default()
        };
        let l2 = MockClient::default().respond("eth_getTransactionReceipt", receipt);
        let l1 = MockClient::default();
        let wallet = test_wallet(l1.clone(), l2);

        assert!(matches!(
            wallet
                .claim_failed_deposit(deposit_hash, Overrides::default())
                .await,
            Err(ClientError::NotAClaimableDeposit)
        ));
        assert!(l1.requests("eth_sendRawTransaction").is_empty());
    }
}

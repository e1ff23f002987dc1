//! In-memory JSON-RPC client answering with canned responses and recording every request.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use zkl2_web3_decl::{
    jsonrpsee::core::{
        client::{BatchResponse, ClientT},
        params::BatchRequestBuilder,
        traits::ToRpcParams,
    },
    RpcError,
};

type Handler = Box<dyn Fn(&Value) -> Value + Send + Sync>;

#[derive(Default)]
struct MockState {
    handlers: HashMap<String, Handler>,
    requests: Vec<(String, Value)>,
}

#[derive(Clone, Default)]
pub(crate) struct MockClient {
    state: Arc<Mutex<MockState>>,
}

impl fmt::Debug for MockClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockClient").finish_non_exhaustive()
    }
}

impl MockClient {
    /// Answers every `method` request with `response`.
    pub fn respond(self, method: &str, response: impl Serialize) -> Self {
        let response = serde_json::to_value(response).unwrap();
        self.handle(method, move |_| response.clone())
    }

    /// Answers `method` requests with the result of `handler` applied to their params.
    pub fn handle(
        self,
        method: &str,
        handler: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .handlers
            .insert(method.to_owned(), Box::new(handler));
        self
    }

    /// Params of the `method` requests received so far, oldest first.
    pub fn requests(&self, method: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(name, _)| name == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    fn answer(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push((method.to_owned(), params.clone()));
        let handler = state
            .handlers
            .get(method)
            .ok_or_else(|| RpcError::Custom(format!("unexpected request {method}")))?;
        Ok(handler(&params))
    }
}

#[async_trait]
impl ClientT for MockClient {
    async fn notification<Params>(&self, method: &str, _params: Params) -> Result<(), RpcError>
    where
        Params: ToRpcParams + Send,
    {
        Err(RpcError::Custom(format!("unexpected notification {method}")))
    }

    async fn request<R, Params>(&self, method: &str, params: Params) -> Result<R, RpcError>
    where
        R: DeserializeOwned,
        Params: ToRpcParams + Send,
    {
        let params = match params
            .to_rpc_params()
            .map_err(|err| RpcError::Custom(err.to_string()))?
        {
            Some(raw) => serde_json::from_str(raw.get())
                .map_err(|err| RpcError::Custom(err.to_string()))?,
            None => Value::Array(Vec::new()),
        };
        let response = self.answer(method, params)?;
        serde_json::from_value(response).map_err(|err| RpcError::Custom(err.to_string()))
    }

    async fn batch_request<'a, R>(
        &self,
        _batch: BatchRequestBuilder<'a>,
    ) -> Result<BatchResponse<'a, R>, RpcError>
    where
        R: DeserializeOwned + fmt::Debug + 'a,
    {
        Err(RpcError::Custom("batch requests are not supported".into()))
    }
}

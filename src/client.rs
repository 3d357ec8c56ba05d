use alloy::primitives::{hex, Address, Bytes};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ArrayParams;
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::OracleError;

/// Anything that can run a read-only contract call against the latest block.
#[allow(async_fn_in_trait)]
pub trait ContractCaller {
    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, OracleError>;
}

enum Transport {
    Http { client: Client, url: Url },
    Ws(WsClient),
}

/// JSON-RPC connection to an EVM node over HTTP(S) or WebSocket.
pub struct NodeClient {
    transport: Transport,
}

impl NodeClient {
    /// Open a connection and make sure the node answers before returning.
    pub async fn connect(node_url: &str) -> Result<Self, OracleError> {
        let url = Url::parse(node_url)
            .map_err(|e| OracleError::Connection(format!("Invalid node URL: {}", e)))?;
        let host = url.host_str().unwrap_or_default().to_string();

        let transport = match url.scheme() {
            "http" | "https" => Transport::Http {
                client: Client::new(),
                url,
            },
            "ws" | "wss" => {
                let ws = WsClientBuilder::default()
                    .build(url.as_str())
                    .await
                    .map_err(|e| {
                        OracleError::Connection(format!("WebSocket handshake failed: {}", e))
                    })?;
                Transport::Ws(ws)
            }
            other => {
                return Err(OracleError::Connection(format!(
                    "Unsupported URL scheme '{}', expected http, https, ws or wss",
                    other
                )))
            }
        };

        let client = NodeClient { transport };
        let chain_id = client
            .request("eth_chainId", Vec::new())
            .await
            .map_err(|e| {
                OracleError::Connection(format!("Node at {} is unreachable: {}", host, e))
            })?;
        info!(
            "Connected to node at {} (chain id {})",
            host,
            chain_id.as_str().unwrap_or("unknown")
        );

        Ok(client)
    }

    /// `eth_call` against the `latest` block, returning the raw output bytes.
    pub async fn eth_call(&self, to: Address, calldata: Bytes) -> Result<Bytes, OracleError> {
        let params = vec![
            json!({
                "to": to.to_string(),
                "data": hex::encode_prefixed(&calldata),
            }),
            json!("latest"),
        ];

        let result = self.request("eth_call", params).await?;
        let output = result.as_str().ok_or_else(|| {
            OracleError::Decode(format!("Expected hex string from eth_call, got {}", result))
        })?;
        let bytes = hex::decode(output)
            .map_err(|e| OracleError::Decode(format!("eth_call result is not hex: {}", e)))?;
        debug!("eth_call returned {} bytes", bytes.len());

        Ok(Bytes::from(bytes))
    }

    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, OracleError> {
        match &self.transport {
            Transport::Http { client, url } => {
                let request_body = json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "method": method,
                    "params": params,
                });

                let response = client
                    .post(url.clone())
                    .header("Content-Type", "application/json")
                    .json(&request_body)
                    .send()
                    .await
                    .map_err(|e| {
                        OracleError::RemoteCall(format!("Failed to send {} request: {}", method, e))
                    })?;

                let response_body: Value = response.json().await.map_err(|e| {
                    OracleError::RemoteCall(format!("Failed to parse {} response: {}", method, e))
                })?;

                if let Some(error) = response_body.get("error") {
                    return Err(OracleError::RemoteCall(format!("Node RPC error: {}", error)));
                }

                response_body
                    .get("result")
                    .cloned()
                    .ok_or_else(|| OracleError::RemoteCall("No result in RPC response".to_string()))
            }
            Transport::Ws(ws) => {
                let mut ws_params = ArrayParams::new();
                for param in params {
                    ws_params.insert(param).map_err(|e| {
                        OracleError::RemoteCall(format!(
                            "Failed to encode {} params: {}",
                            method, e
                        ))
                    })?;
                }

                ws.request::<Value, _>(method, ws_params)
                    .await
                    .map_err(|e| OracleError::RemoteCall(format!("Node RPC error: {}", e)))
            }
        }
    }
}

impl ContractCaller for NodeClient {
    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, OracleError> {
        self.eth_call(to, calldata).await
    }
}

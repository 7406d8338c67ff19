use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::AppConfig;
use crate::domain::gateway::{ContractGateway, GatewayError, PaymentBreakdown};
use crate::domain::ids;
use crate::infrastructure::gateway::abi;

/// Contract read gateway over JSON-RPC `eth_call`.
///
/// No retries: a revert is accepted as a permanent miss for the event being
/// projected, redelivery is the event source's concern.
pub struct EthGateway {
    client: Client,
    rpc_url: String,
    marketplace: String,
    platform_token: String,
}

impl EthGateway {
    /// Create a new gateway from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                GatewayError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(EthGateway {
            client,
            rpc_url: config.rpc.url.clone(),
            marketplace: config.marketplace.address.clone(),
            platform_token: config.marketplace.platform_token.clone(),
        })
    }

    /// Issue one read-only call and return the raw return data
    async fn eth_call(&self, to: &str, data: String) -> Result<Vec<u8>, GatewayError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": to, "data": data }, "latest"],
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        // Reverts surface as a JSON-RPC error object
        if let Some(error) = value.get("error") {
            debug!("eth_call to {} reverted: {}", to, error);
            return Err(GatewayError::Reverted);
        }

        let result = value
            .get("result")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GatewayError::Rpc("response carries no result".to_string()))?;
        if result == "0x" {
            return Err(GatewayError::Reverted);
        }

        hex::decode(abi::strip_hex(result)).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContractGateway for EthGateway {
    async fn token_symbol(&self, token_address: &str) -> Result<String, GatewayError> {
        let data = abi::encode_call("symbol()", &[]);
        let returned = self.eth_call(token_address, data).await?;
        abi::decode_string(&returned)
    }

    async fn token_name(&self, token_address: &str) -> Result<String, GatewayError> {
        let data = abi::encode_call("name()", &[]);
        let returned = self.eth_call(token_address, data).await?;
        abi::decode_string(&returned)
    }

    async fn token_uri(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<String, GatewayError> {
        let data = abi::encode_call("tokenURI(uint256)", &[abi::uint_word(token_id)?]);
        let returned = self.eth_call(contract_address, data).await?;
        abi::decode_string(&returned)
    }

    async fn category(&self, auction_id: &str) -> Result<u64, GatewayError> {
        let data = abi::encode_call("category(bytes32)", &[abi::bytes32_word(auction_id)?]);
        let returned = self.eth_call(&self.marketplace, data).await?;
        abi::decode_u64(&returned)
    }

    async fn payment_breakdown(
        &self,
        contract_address: &str,
        auction_id: &str,
    ) -> Result<PaymentBreakdown, GatewayError> {
        let data =
            abi::encode_call("getPlatformCut(bytes32)", &[abi::bytes32_word(auction_id)?]);
        let returned = self.eth_call(contract_address, data).await?;
        let values = abi::decode_uint_words(&returned, 4)?;
        let [platform_cut, referral_bonus, cash_back, total_value]: [_; 4] = values
            .try_into()
            .map_err(|_| GatewayError::Decode("expected 4 return words".to_string()))?;
        Ok(PaymentBreakdown {
            platform_cut,
            referral_bonus,
            cash_back,
            total_value,
        })
    }

    fn is_platform_token(&self, token_address: &str) -> bool {
        ids::payment_method_id(token_address) == self.platform_token
    }
}

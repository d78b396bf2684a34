//! Top-level client.

use serde_json::Value;
use std::sync::Arc;
use tradeking_core::error::ApiResult;

use crate::account::AccountApi;
use crate::config::ClientConfig;
use crate::market::MarketApi;
use crate::transport::{dig, Api};

/// The TradeKing API client.
///
/// Holds the credential set and the HTTP client; resource groups obtained
/// from it share both. Cloning the groups is cheap and every call is
/// independent, so one instance can serve many tasks concurrently.
pub struct TradeKing {
    api: Arc<Api>,
}

impl TradeKing {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self {
            api: Arc::new(Api::new(config)?),
        })
    }

    /// Construct from `TRADEKING_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.api.config().base_url
    }

    /// Market data resources.
    pub fn market(&self) -> MarketApi {
        MarketApi::new(self.api.clone())
    }

    /// Resources for one account.
    pub fn account(&self, account_id: impl Into<String>) -> AccountApi {
        AccountApi::new(self.api.clone(), account_id.into())
    }

    /// Summaries of every account visible to the credentials.
    pub async fn accounts(&self) -> ApiResult<Value> {
        let raw = self.api.get(&["accounts"], &[]).await?;
        dig(&raw, &["response", "accounts", "accountsummary"])
    }
}

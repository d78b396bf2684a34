//! Account resources.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use tradeking_core::error::ApiResult;

use crate::transport::{dig, Api};

const FIXML_CONTENT_TYPE: &str = "text/xml";

/// Resource group bound to one account id.
pub struct AccountApi {
    api: Arc<Api>,
    account_id: String,
}

impl AccountApi {
    pub(crate) fn new(api: Arc<Api>, account_id: String) -> Self {
        Self { api, account_id }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Current account balances.
    pub async fn balances(&self) -> ApiResult<Value> {
        let raw = self.get(Some("balances"), &[]).await?;
        dig(&raw, &["response", "accountbalance"])
    }

    /// Transaction history. `date_range` and `transactions` filter by the
    /// API's named windows and transaction kinds; `all` is the default for
    /// both.
    pub async fn history(&self, date_range: &str, transactions: &str) -> ApiResult<Value> {
        let query = vec![
            ("range".to_string(), date_range.to_string()),
            ("transactions".to_string(), transactions.to_string()),
        ];
        let raw = self.get(Some("history"), &query).await?;
        dig(&raw, &["response", "transactions", "transaction"])
    }

    /// Current holdings.
    pub async fn holdings(&self) -> ApiResult<Value> {
        let raw = self.get(Some("holdings"), &[]).await?;
        dig(&raw, &["response", "accountholdings", "holding"])
    }

    /// Status of existing orders.
    pub async fn orders(&self) -> ApiResult<Value> {
        let raw = self.get(Some("orders"), &[]).await?;
        dig(&raw, &["response", "orderstatus"])
    }

    /// Preview a FIXML order document without committing it. Build the
    /// document with [`tradeking_core::fixml::OrderBuilder`].
    pub async fn preview_order(&self, fixml: &str) -> ApiResult<Value> {
        let raw = self
            .api
            .post_raw(
                &["accounts", &self.account_id, "orders", "preview"],
                fixml.to_string(),
                FIXML_CONTENT_TYPE,
            )
            .await?;
        dig(&raw, &["response"])
    }

    /// Submit a FIXML order document.
    pub async fn place_order(&self, fixml: &str) -> ApiResult<Value> {
        let raw = self
            .api
            .post_raw(
                &["accounts", &self.account_id, "orders"],
                fixml.to_string(),
                FIXML_CONTENT_TYPE,
            )
            .await?;
        info!(account_id = %self.account_id, "order submitted");
        dig(&raw, &["response"])
    }

    async fn get(&self, what: Option<&str>, query: &[(String, String)]) -> ApiResult<Value> {
        let mut segments = vec!["accounts", self.account_id.as_str()];
        if let Some(what) = what {
            segments.push(what);
        }
        self.api.get(&segments, query).await
    }
}

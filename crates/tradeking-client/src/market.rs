//! Market data resources.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tradeking_core::error::{ApiError, ApiResult};
use tradeking_core::quote::{self, QuoteValue};

use crate::news::NewsApi;
use crate::options::OptionsApi;
use crate::transport::{dig, Api};

/// Market resource group: quotes, the exchange clock, and toplists, with
/// accessors for the news and options subgroups.
pub struct MarketApi {
    api: Arc<Api>,
}

impl MarketApi {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// News articles and search.
    pub fn news(&self) -> NewsApi {
        NewsApi::new(self.api.clone())
    }

    /// Option chains, strikes, and expirations.
    pub fn options(&self) -> OptionsApi {
        OptionsApi::new(self.api.clone())
    }

    /// Exchange clock and current market state.
    pub async fn clock(&self) -> ApiResult<Value> {
        let raw = self.api.get(&["market", "clock"], &[]).await?;
        let mut clock = dig(&raw, &["response"])?;
        if let Some(envelope) = clock.as_object_mut() {
            envelope.remove("@id");
        }
        Ok(clock)
    }

    /// Quotes for one or more symbols, optionally restricted to specific
    /// fields (`fids`).
    pub async fn quotes(&self, symbols: &[&str], fields: Option<&[&str]>) -> ApiResult<Value> {
        if symbols.is_empty() || symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(ApiError::Validation(
                "at least one non-empty symbol is required".into(),
            ));
        }

        let mut form = vec![("symbols".to_string(), symbols.join(","))];
        if let Some(fields) = fields {
            form.push(("fids".to_string(), fields.join(",")));
        }

        let raw = self.api.post_form(&["market", "ext", "quotes"], &form).await?;
        dig(&raw, &["response", "quotes", "quote"])
    }

    /// [`Self::quotes`] with the key-driven type coercion applied: one map
    /// of typed values per returned record.
    pub async fn typed_quotes(
        &self,
        symbols: &[&str],
        fields: Option<&[&str]>,
    ) -> ApiResult<Vec<BTreeMap<String, QuoteValue>>> {
        Ok(quote::typed_quotes(&self.quotes(symbols, fields).await?))
    }

    /// One of the market toplists, e.g. `toppctgainers` (the API default),
    /// `toplosers`, `topvolume`, `topactive`.
    pub async fn toplist(&self, kind: &str) -> ApiResult<Value> {
        let raw = self.api.get(&["market", "toplists", kind], &[]).await?;
        dig(&raw, &["response", "quotes", "quote"])
    }
}

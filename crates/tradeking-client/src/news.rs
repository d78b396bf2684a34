//! Market news resources.

use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tradeking_core::error::{ApiError, ApiResult};

use crate::transport::{dig, Api};

/// Search arguments for [`NewsApi::search`]. At least one of `keywords` or
/// `symbols` is required, and the two dates only make sense as a pair.
#[derive(Debug, Clone, Default)]
pub struct NewsSearch<'a> {
    pub keywords: &'a [&'a str],
    pub symbols: &'a [&'a str],
    pub maxhits: Option<u32>,
    pub startdate: Option<NaiveDate>,
    pub enddate: Option<NaiveDate>,
}

/// News resource group.
pub struct NewsApi {
    api: Arc<Api>,
}

impl NewsApi {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Fetch a single article by id.
    pub async fn article(&self, article_id: &str) -> ApiResult<Value> {
        let raw = self.api.get(&["market", "news", article_id], &[]).await?;
        dig(&raw, &["response", "article"])
    }

    /// Search articles by keyword and/or symbol.
    pub async fn search(&self, search: &NewsSearch<'_>) -> ApiResult<Value> {
        if search.keywords.is_empty() && search.symbols.is_empty() {
            return Err(ApiError::Validation(
                "either keywords or symbols are required".into(),
            ));
        }
        if search.startdate.is_some() != search.enddate.is_some() {
            return Err(ApiError::Validation(
                "startdate and enddate are required together".into(),
            ));
        }

        let mut form = Vec::new();
        if !search.keywords.is_empty() {
            form.push(("keywords".to_string(), search.keywords.join(",")));
        }
        if !search.symbols.is_empty() {
            form.push(("symbols".to_string(), search.symbols.join(",")));
        }
        if let Some(maxhits) = search.maxhits {
            form.push(("maxhits".to_string(), maxhits.to_string()));
        }
        if let (Some(start), Some(end)) = (search.startdate, search.enddate) {
            form.push(("startdate".to_string(), start.format("%m/%d/%Y").to_string()));
            form.push(("enddate".to_string(), end.format("%m/%d/%Y").to_string()));
        }

        let raw = self.api.post_form(&["market", "news", "search"], &form).await?;
        dig(&raw, &["response", "articles", "article"])
    }
}

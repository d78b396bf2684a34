//! Option chain resources.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tradeking_core::error::{ApiError, ApiResult};
use tradeking_core::option::OptionQuery;

use crate::transport::{dig, Api};

/// Options resource group.
pub struct OptionsApi {
    api: Arc<Api>,
}

impl OptionsApi {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Expiration dates available for an underlying.
    pub async fn expirations(&self, symbol: &str) -> ApiResult<Vec<NaiveDate>> {
        let query = vec![("symbol".to_string(), symbol.to_string())];
        let raw = self
            .api
            .get(&["market", "options", "expirations"], &query)
            .await?;
        let dates = dig(&raw, &["response", "expirationdates", "date"])?;

        as_string_array(&dates)?
            .iter()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| ApiError::Decode(format!("bad expiration date {s:?}")))
            })
            .collect()
    }

    /// Strike prices available for an underlying.
    pub async fn strikes(&self, symbol: &str) -> ApiResult<Vec<Decimal>> {
        let query = vec![("symbol".to_string(), symbol.to_string())];
        let raw = self
            .api
            .get(&["market", "options", "strikes"], &query)
            .await?;
        let prices = dig(&raw, &["response", "prices", "price"])?;

        as_string_array(&prices)?
            .iter()
            .map(|s| {
                s.parse::<Decimal>()
                    .map_err(|_| ApiError::Decode(format!("bad strike price {s:?}")))
            })
            .collect()
    }

    /// Search the chain for an underlying with an [`OptionQuery`]
    /// conjunction, optionally restricting the returned fields.
    pub async fn search(
        &self,
        symbol: &str,
        query: &OptionQuery,
        fields: Option<&[&str]>,
    ) -> ApiResult<Value> {
        if query.is_empty() {
            return Err(ApiError::Validation("query must not be empty".into()));
        }

        let mut form = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("query".to_string(), query.to_string()),
        ];
        if let Some(fields) = fields {
            form.push(("fids".to_string(), fields.join(",")));
        }

        let raw = self
            .api
            .post_form(&["market", "options", "search"], &form)
            .await?;
        dig(&raw, &["response", "quotes", "quote"])
    }
}

/// The API renders scalar lists as strings, and single-element lists as a
/// bare value rather than an array.
fn as_string_array(value: &Value) -> ApiResult<Vec<String>> {
    let to_text = |v: &Value| -> ApiResult<String> {
        match v {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(ApiError::Decode(format!("expected scalar, got {other}"))),
        }
    };

    match value {
        Value::Array(items) => items.iter().map(to_text).collect(),
        other => Ok(vec![to_text(other)?]),
    }
}

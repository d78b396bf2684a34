//! Signed request dispatch.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;
use tradeking_core::error::{ApiError, ApiResult};
use url::Url;

use crate::config::ClientConfig;
use crate::oauth;

/// Response body format suffix appended to every resource path.
const FORMAT: &str = "json";

/// The dispatcher shared by every resource group: builds the URL, signs,
/// sends, and decodes. One outbound call per invocation; no caching and no
/// retries.
pub(crate) struct Api {
    http: Client,
    config: ClientConfig,
}

impl Api {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Join resource path segments onto the API base and append the
    /// format suffix: `["market", "clock"]` becomes `<base>/market/clock.json`.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let path: Vec<&str> = segments.iter().map(|s| s.trim_matches('/')).collect();
        let full = format!(
            "{}/{}.{}",
            self.config.base_url.trim_end_matches('/'),
            path.join("/"),
            FORMAT
        );
        Url::parse(&full).map_err(|e| ApiError::Config(format!("bad endpoint {full}: {e}")))
    }

    pub async fn get(&self, segments: &[&str], query: &[(String, String)]) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        let auth = oauth::authorization_header(&self.config.credentials, "GET", &url, query);
        debug!(%url, "GET");

        let mut request = self.http.get(url).header(AUTHORIZATION, auth);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn post_form(
        &self,
        segments: &[&str],
        form: &[(String, String)],
    ) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        let auth = oauth::authorization_header(&self.config.credentials, "POST", &url, form);
        debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, auth)
            .form(form)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST a non-form body (FIXML documents). Only the protocol
    /// parameters enter the signature, per RFC 5849 section 3.4.1.3.
    pub async fn post_raw(
        &self,
        segments: &[&str],
        body: String,
        content_type: &str,
    ) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        let auth = oauth::authorization_header(&self.config.credentials, "POST", &url, &[]);
        debug!(%url, content_type, "POST");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> ApiResult<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Authentication {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            return Err(ApiError::Request {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Drill into the response envelope, failing with a decode error on any
/// missing key.
pub(crate) fn dig(value: &Value, path: &[&str]) -> ApiResult<Value> {
    let mut current = value;
    for key in path {
        current = current
            .get(key)
            .ok_or_else(|| ApiError::Decode(format!("missing `{key}` in response")))?;
    }
    Ok(current.clone())
}

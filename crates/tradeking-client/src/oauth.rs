//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! The API authenticates every call with a signed `Authorization` header:
//! protocol parameters plus all query/body parameters are percent-encoded,
//! sorted, and folded into a signature base string, which is HMAC-SHA1
//! signed under a key derived from the two secrets.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use url::Url;
use uuid::Uuid;

use crate::config::Credentials;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

// RFC 5849 section 3.6: ALPHA, DIGIT, '-', '.', '_', '~' stay literal;
// everything else is encoded with uppercase hex digits.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one parameter key or value.
pub(crate) fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_SET).to_string()
}

/// Produce the `Authorization` header value for one request.
///
/// `params` is every query or form parameter the request carries; the
/// nonce and timestamp are freshly generated.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &Url,
    params: &[(String, String)],
) -> String {
    header_with_parts(
        credentials,
        method,
        url,
        params,
        &Uuid::new_v4().to_string(),
        Utc::now().timestamp(),
    )
}

pub(crate) fn header_with_parts(
    credentials: &Credentials,
    method: &str,
    url: &Url,
    params: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> String {
    let oauth_params = protocol_params(credentials, nonce, timestamp);

    let mut all: Vec<(String, String)> = oauth_params.clone();
    for (key, value) in url.query_pairs() {
        all.push((key.into_owned(), value.into_owned()));
    }
    all.extend(params.iter().cloned());

    let base = signature_base_string(method, url, &all);
    let signature = sign(
        &base,
        credentials.consumer_secret(),
        credentials.oauth_secret(),
    );

    let mut fields = oauth_params;
    fields.push(("oauth_signature".to_string(), signature));
    let rendered: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!(r#"{}="{}""#, percent_encode(key), percent_encode(value)))
        .collect();
    format!("OAuth {}", rendered.join(", "))
}

fn protocol_params(credentials: &Credentials, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".to_string(), credentials.consumer_key().to_string()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), credentials.oauth_token().to_string()),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ]
}

/// RFC 5849 section 3.4.1: `METHOD&enc(base-url)&enc(sorted-params)`.
pub(crate) fn signature_base_string(
    method: &str,
    url: &Url,
    params: &[(String, String)],
) -> String {
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded.sort();

    let param_string: Vec<String> = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(base_url.as_str()),
        percent_encode(&param_string.join("&"))
    )
}

/// Sign a base string under `consumer_secret` and `token_secret`.
pub(crate) fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

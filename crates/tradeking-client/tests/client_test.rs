//! Client behavior against a mocked HTTP transport.

use serde_json::json;
use tradeking_client::{ApiError, ClientConfig, Credentials, TradeKing};
use wiremock::matchers::{body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TradeKing {
    let credentials = Credentials::new("ckey", "csecret", "otoken", "osecret").unwrap();
    TradeKing::new(ClientConfig::new(credentials).with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn quote_returns_decoded_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/market/ext/quotes.json"))
        .and(header_exists("authorization"))
        .and(body_string_contains("symbols=IBM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "quotes": {
                    "quote": {"symbol": "IBM", "last": 150.0}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quotes = client(&server).market().quotes(&["IBM"], None).await.unwrap();
    assert_eq!(quotes, json!({"symbol": "IBM", "last": 150.0}));
}

#[tokio::test]
async fn unauthorized_status_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/market/ext/quotes.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("oauth problem"))
        .mount(&server)
        .await;

    let err = client(&server)
        .market()
        .quotes(&["IBM"], None)
        .await
        .unwrap_err();
    match err {
        ApiError::Authentication { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "oauth problem");
        }
        other => panic!("expected an authentication error, got {other}"),
    }
}

#[tokio::test]
async fn forbidden_status_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/market/ext/quotes.json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server)
        .market()
        .quotes(&["IBM"], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authentication { status: 403, .. }));
}

#[tokio::test]
async fn server_error_is_a_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/market/ext/quotes.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .market()
        .quotes(&["IBM"], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 500, .. }));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/market/ext/quotes.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .market()
        .quotes(&["IBM"], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn clock_drops_the_envelope_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/clock.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "@id": "abc123",
                "status": {"current": "open"},
                "date": "2014-01-17 09:30:01"
            }
        })))
        .mount(&server)
        .await;

    let clock = client(&server).market().clock().await.unwrap();
    assert!(clock.get("@id").is_none());
    assert_eq!(clock["status"]["current"], "open");
}

#[tokio::test]
async fn empty_symbols_fail_before_any_request() {
    let server = MockServer::start().await;
    let err = client(&server).market().quotes(&[], None).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn balances_drills_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/12345678/balances.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "accountbalance": {"accountvalue": "10000.00", "money": {"cash": "5000.00"}}
            }
        })))
        .mount(&server)
        .await;

    let balances = client(&server).account("12345678").balances().await.unwrap();
    assert_eq!(balances["accountvalue"], "10000.00");
}

#[tokio::test]
async fn history_passes_filter_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/12345678/history.json"))
        .and(query_param("range", "last_month"))
        .and(query_param("transactions", "trade"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"transactions": {"transaction": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = client(&server)
        .account("12345678")
        .history("last_month", "trade")
        .await
        .unwrap();
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn accounts_lists_summaries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "accounts": {
                    "accountsummary": [{"account": "12345678"}, {"account": "87654321"}]
                }
            }
        })))
        .mount(&server)
        .await;

    let accounts = client(&server).accounts().await.unwrap();
    assert_eq!(accounts.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn news_search_validates_before_any_request() {
    use tradeking_client::news::NewsSearch;

    let server = MockServer::start().await;
    let news = client(&server).market().news();

    let err = news.search(&NewsSearch::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let unpaired = NewsSearch {
        symbols: &["IBM"],
        startdate: chrono::NaiveDate::from_ymd_opt(2014, 1, 1),
        ..Default::default()
    };
    let err = news.search(&unpaired).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn option_expirations_parse_into_dates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/options/expirations.json"))
        .and(query_param("symbol", "IBM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "expirationdates": {"date": ["2014-01-18", "2014-02-22"]}
            }
        })))
        .mount(&server)
        .await;

    let expirations = client(&server)
        .market()
        .options()
        .expirations("IBM")
        .await
        .unwrap();
    assert_eq!(
        expirations,
        vec![
            chrono::NaiveDate::from_ymd_opt(2014, 1, 18).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2014, 2, 22).unwrap(),
        ]
    );
}

#[tokio::test]
async fn option_search_sends_the_rendered_query() {
    use tradeking_core::option::{OptionQuery, QueryField, QueryOp};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/market/options/search.json"))
        .and(body_string_contains("strikeprice-gte%3A100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"quotes": {"quote": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = OptionQuery::new().and(QueryField::StrikePrice, QueryOp::Gte, "100");
    let found = client(&server)
        .market()
        .options()
        .search("IBM", &query, None)
        .await
        .unwrap();
    assert_eq!(found, json!([]));
}

#[tokio::test]
async fn place_order_posts_the_fixml_document() {
    use rust_decimal_macros::dec;
    use tradeking_core::fixml::{OrderBuilder, TimeInForce};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/12345678/orders.json"))
        .and(body_string_contains("<FIXML"))
        .and(body_string_contains(r#"Sym="F""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"clientorderid": "abc", "orderstatus": "accepted"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fixml = OrderBuilder::buy("12345678", "F", dec!(1))
        .time_in_force(TimeInForce::Day)
        .build();
    let placed = client(&server)
        .account("12345678")
        .place_order(&fixml)
        .await
        .unwrap();
    assert_eq!(placed["orderstatus"], "accepted");
}

mod common;

use applemusic_api::{Context, Error, Options, ResourceObject};
use common::setup;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn taiwan() -> serde_json::Value {
    json!({
        "id": "tw",
        "type": "storefronts",
        "href": "/v1/storefronts/tw",
        "attributes": {
            "defaultLanguageTag": "zh-tw",
            "name": "Taiwan",
            "supportedLanguageTags": ["zh-tw", "en-gb"]
        }
    })
}

#[tokio::test]
async fn storefront_by_id() {
    let (client, server) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/storefronts/tw"))
        .and(query_param("l", "en-gb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [taiwan()]})))
        .expect(1)
        .mount(&server)
        .await;

    let opts = Options::new().language("en-gb");
    let page = client
        .storefront(&Context::background(), "tw", Some(&opts))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    let sf = &page.data[0];
    assert_eq!(sf.attributes.default_language_tag, "zh-tw");
    assert_eq!(sf.href(), Some("/v1/storefronts/tw"));
}

#[tokio::test]
async fn storefronts_by_ids_keeps_ids_ahead_of_options() {
    let (client, server) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/storefronts"))
        .and(query_param("ids", "tw,jp"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [taiwan()]})))
        .expect(1)
        .mount(&server)
        .await;

    let opts = Options::new().limit(2);
    client
        .storefronts_by_ids(&Context::background(), &["tw", "jp"], Some(&opts))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("ids=tw,jp&limit=2"));
}

#[tokio::test]
async fn all_storefronts_pages() {
    let (client, server) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/storefronts"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [taiwan()],
            "next": "/v1/storefronts?offset=2"
        })))
        .mount(&server)
        .await;

    let page = client
        .all_storefronts(&Context::background(), Some(&Options::new().offset(1)))
        .await
        .unwrap();
    assert_eq!(page.next.as_deref(), Some("/v1/storefronts?offset=2"));
}

#[tokio::test]
async fn me_storefront_without_user_token() {
    let (client, server) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/storefront"))
        .and(header("authorization", "Bearer TOKEN"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{
                "id": "X3OUDY6LHVBMLDP5W6XQRCWKVE",
                "title": "Forbidden",
                "detail": "Invalid authentication",
                "status": "403",
                "code": "40300"
            }]
        })))
        .mount(&server)
        .await;

    let err = client
        .me_storefront(&Context::background(), None)
        .await
        .unwrap_err();
    let Error::Api { status, errors, url, .. } = err else {
        panic!("expected Api error, got {err:?}");
    };
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(url.path(), "/v1/me/storefront");
    assert_eq!(errors[0].code, "40300");
}

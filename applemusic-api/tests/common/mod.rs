#![allow(dead_code)]

use std::sync::Mutex;

use applemusic_api::transport::BoxFuture;
use applemusic_api::{Client, Request, Result, Transport};
use reqwest::header::HeaderMap;
use wiremock::MockServer;

/// Client authenticated with `TOKEN`, pointed at a fresh mock server.
pub async fn setup() -> (Client, MockServer) {
    let server = MockServer::start().await;
    let client = Client::builder()
        .base_url(server.uri())
        .developer_token("TOKEN")
        .build()
        .unwrap();
    (client, server)
}

/// Transport that records the headers of every request and answers with an
/// empty 200.
#[derive(Default)]
pub struct Recorder {
    pub seen: Mutex<Vec<HeaderMap>>,
}

impl Transport for Recorder {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            self.seen.lock().unwrap().push(request.headers.clone());
            Ok(reqwest::Response::from(http::Response::new("")))
        })
    }
}

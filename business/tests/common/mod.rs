//! Shared mock-server fixture for the business integration tests.

use newsletter_admin_business::{BusinessConfig, ReqwestTransport};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// A mock newsletter service plus a config pointing at it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub config: BusinessConfig,
    pub transport: ReqwestTransport,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri());

        Self {
            mock_server,
            config,
            transport: ReqwestTransport,
        }
    }

    /// Answer `GET route` with `status` and a JSON body.
    pub async fn mock_get_json(&self, route: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    /// Answer `GET route` with a raw body.
    pub async fn mock_get_raw(&self, route: &str, status: u16, body: &str, mime: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), mime))
            .mount(&self.mock_server)
            .await;
    }

    /// Number of requests the mock server has seen.
    pub async fn request_count(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

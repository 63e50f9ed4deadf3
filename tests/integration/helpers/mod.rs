// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use github_telex::config::settings::Settings;
use github_telex::domain::services::event_translator::EventTranslator;
use github_telex::domain::services::signature_service::sign_payload;
use github_telex::infrastructure::services::telex_relay_service_impl::TelexRelayServiceImpl;
use github_telex::presentation::routes;
use github_telex::workers::spawn_relay_worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_SECRET: &str = "integration-secret";
pub const TELEX_PATH: &str = "/v1/webhooks/test-channel";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub telex: MockServer,
    pub settings: Arc<Settings>,
    pub worker: JoinHandle<()>,
}

/// 构建指向给定 Telex 地址的配置
pub fn test_settings(telex_url: &str) -> Settings {
    Settings::from_builder(
        Settings::defaults()
            .unwrap()
            .set_override("telex.webhook_url", telex_url)
            .unwrap()
            .set_override("telex.timeout_secs", 5)
            .unwrap()
            .set_override("github.secret", TEST_SECRET)
            .unwrap()
            .set_override("integration.app_url", "https://relay.example.com")
            .unwrap(),
    )
    .unwrap()
}

/// 启动完整应用，下游 Telex 由 wiremock 模拟并固定返回 `telex_status`
pub async fn create_test_app(telex_status: u16) -> TestApp {
    let telex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TELEX_PATH))
        .respond_with(ResponseTemplate::new(telex_status))
        .mount(&telex)
        .await;

    let settings = Arc::new(test_settings(&format!("{}{}", telex.uri(), TELEX_PATH)));
    let relay = Arc::new(TelexRelayServiceImpl::new(settings.telex.timeout()).unwrap());
    let (dispatcher, worker) = spawn_relay_worker(relay, &settings.relay);

    let app = routes::routes(
        settings.clone(),
        Arc::new(EventTranslator::default()),
        dispatcher,
    );
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        telex,
        settings,
        worker,
    }
}

pub fn sign(body: &[u8]) -> String {
    sign_payload(body, TEST_SECRET)
}

/// 等待下游收到至少 `count` 个请求
pub async fn wait_for_requests(telex: &MockServer, count: usize) -> Vec<Request> {
    for _ in 0..100 {
        let requests = telex.received_requests().await.unwrap_or_default();
        if requests.len() >= count {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("Telex mock did not receive {} request(s) in time", count);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::process_webhook::ProcessWebhookUseCase;
use crate::config::settings::Settings;
use crate::domain::services::event_translator::EventTranslator;
use crate::presentation::handlers::{integration_handler, webhook_handler};
use crate::workers::RelayDispatcher;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `settings` - 只读配置
/// * `translator` - 事件转换器
/// * `dispatcher` - 后台转发调度器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(
    settings: Arc<Settings>,
    translator: Arc<EventTranslator>,
    dispatcher: RelayDispatcher,
) -> Router {
    let use_case = Arc::new(ProcessWebhookUseCase::new(
        settings.clone(),
        translator,
        dispatcher,
    ));

    Router::new()
        .route("/", get(integration_handler::get_integration_manifest))
        .route("/webhook", post(webhook_handler::receive_github_webhook))
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .layer(DefaultBodyLimit::max(settings.server.max_body_bytes))
        .layer(Extension(use_case))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

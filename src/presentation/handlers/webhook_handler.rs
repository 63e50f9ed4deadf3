// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::application::use_cases::process_webhook::ProcessWebhookUseCase;
use crate::domain::models::inbound_event::InboundEvent;
use crate::utils::errors::WebhookError;
use axum::{body::Bytes, http::HeaderMap, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const EVENT_HEADER: &str = "x-github-event";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

pub const ACK_DETAIL: &str = "Event processed and forwarded to Telex";

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub detail: &'static str,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// 接收 GitHub webhook
///
/// 响应只反映入站校验结果，下游投递在后台完成
pub async fn receive_github_webhook(
    Extension(use_case): Extension<Arc<ProcessWebhookUseCase>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookError> {
    let event = InboundEvent::new(
        body,
        header_value(&headers, EVENT_HEADER),
        header_value(&headers, SIGNATURE_HEADER),
        header_value(&headers, DELIVERY_HEADER),
    );

    use_case.execute(event)?;

    Ok(Json(WebhookAck {
        detail: ACK_DETAIL,
    }))
}

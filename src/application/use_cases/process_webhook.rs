// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::inbound_event::InboundEvent;
use crate::domain::services::event_translator::EventTranslator;
use crate::domain::services::signature_service::verify_signature;
use crate::utils::errors::WebhookError;
use crate::workers::RelayDispatcher;
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedWebhook {
    pub event_type: String,
    /// 转发任务ID，移交失败时为 `None`
    pub job_id: Option<Uuid>,
}

/// 处理 GitHub webhook 的用例
///
/// 依次校验签名、解析负载、转换消息并移交给后台转发，
/// 只有通过签名校验且能解析为 JSON 的事件才会生成出站消息。
pub struct ProcessWebhookUseCase {
    settings: Arc<Settings>,
    translator: Arc<EventTranslator>,
    dispatcher: RelayDispatcher,
}

impl ProcessWebhookUseCase {
    pub fn new(
        settings: Arc<Settings>,
        translator: Arc<EventTranslator>,
        dispatcher: RelayDispatcher,
    ) -> Self {
        Self {
            settings,
            translator,
            dispatcher,
        }
    }

    pub fn execute(&self, event: InboundEvent) -> Result<ProcessedWebhook, WebhookError> {
        let result = self.process(&event);
        match &result {
            Ok(processed) => {
                counter!("github_webhooks_received_total", "event" => processed.event_type.clone())
                    .increment(1);
            }
            Err(e) => {
                warn!(
                    event = %event.event_type,
                    delivery = event.delivery_id.as_deref().unwrap_or("-"),
                    "Rejected GitHub webhook: {}",
                    e
                );
                counter!("github_webhooks_rejected_total", "reason" => e.reason()).increment(1);
            }
        }
        result
    }

    fn process(&self, event: &InboundEvent) -> Result<ProcessedWebhook, WebhookError> {
        let signature = event
            .signature
            .as_deref()
            .ok_or(WebhookError::MissingSignature)?;

        if !verify_signature(&event.payload, signature, &self.settings.github.secret) {
            return Err(WebhookError::InvalidSignature);
        }

        let payload: Value =
            serde_json::from_slice(&event.payload).map_err(WebhookError::MalformedPayload)?;

        let message = self.translator.translate(&event.event_type, &payload);

        // Delivery problems never reach the webhook sender
        let job_id = match self
            .dispatcher
            .dispatch(message, &self.settings.telex.webhook_url)
        {
            Ok(id) => {
                info!(
                    event = %event.event_type,
                    delivery = event.delivery_id.as_deref().unwrap_or("-"),
                    job_id = %id,
                    "GitHub event queued for Telex"
                );
                Some(id)
            }
            Err(e) => {
                error!(
                    event = %event.event_type,
                    delivery = event.delivery_id.as_deref().unwrap_or("-"),
                    "Failed to queue message for Telex: {}",
                    e
                );
                counter!("relay_dispatch_dropped_total", "reason" => e.reason()).increment(1);
                None
            }
        };

        Ok(ProcessedWebhook {
            event_type: event.event_type.clone(),
            job_id,
        })
    }
}

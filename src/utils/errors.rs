// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 下游投递错误类型
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("downstream rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    /// 用于指标标签的失败原因
    pub fn reason(&self) -> &'static str {
        match self {
            RelayError::Rejected { .. } => "http_error",
            RelayError::Transport(e) if e.is_timeout() => "timeout",
            RelayError::Transport(_) => "network_error",
        }
    }
}

/// 转发任务移交错误类型
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    #[error("relay queue is full")]
    QueueFull,

    #[error("relay worker has shut down")]
    QueueClosed,
}

impl DispatchError {
    pub fn reason(&self) -> &'static str {
        match self {
            DispatchError::QueueFull => "queue_full",
            DispatchError::QueueClosed => "queue_closed",
        }
    }
}

/// Webhook 入站校验错误类型
///
/// 均在转发之前同步返回给调用方
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Missing GitHub signature header")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid JSON payload")]
    MalformedPayload(#[source] serde_json::Error),
}

impl WebhookError {
    pub fn reason(&self) -> &'static str {
        match self {
            WebhookError::MissingSignature => "missing_signature",
            WebhookError::InvalidSignature => "invalid_signature",
            WebhookError::MalformedPayload(_) => "malformed_payload",
        }
    }
}

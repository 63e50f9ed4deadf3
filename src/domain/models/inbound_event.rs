// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use bytes::Bytes;

/// 未携带 `X-GitHub-Event` 头时使用的事件类型
pub const UNKNOWN_EVENT_TYPE: &str = "unknown";

/// 入站事件
///
/// 表示一次 GitHub webhook 推送的原始内容。构造后不可变，
/// 在转换为出站消息之后即被丢弃。
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// 原始请求体，签名基于这些字节计算
    pub payload: Bytes,
    /// 事件类型，如 `push`、`issues`
    pub event_type: String,
    /// `X-Hub-Signature-256` 头的值，缺失时为 `None`
    pub signature: Option<String>,
    /// `X-GitHub-Delivery` 头的值，仅用于日志关联
    pub delivery_id: Option<String>,
}

impl InboundEvent {
    /// 创建新的入站事件
    ///
    /// 事件类型为空时回退为 `unknown`；空签名视为缺失。
    pub fn new(
        payload: Bytes,
        event_type: Option<String>,
        signature: Option<String>,
        delivery_id: Option<String>,
    ) -> Self {
        let event_type = event_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_EVENT_TYPE.to_string());
        let signature = signature.filter(|s| !s.is_empty());

        Self {
            payload,
            event_type,
            signature,
            delivery_id,
        }
    }
}

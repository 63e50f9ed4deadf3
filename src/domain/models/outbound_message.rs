// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 出站消息
///
/// 发送给 Telex 频道 webhook 的消息体。每个通过校验的入站事件
/// 只生成一条消息，之后由转发任务独占。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// GitHub 事件类型
    pub event_name: String,
    /// 可读的消息正文
    pub message: String,
    /// 消息状态
    pub status: MessageStatus,
    /// 触发事件的用户
    pub username: String,
}

impl OutboundMessage {
    pub fn new(event_name: impl Into<String>, message: String, username: String) -> Self {
        Self {
            event_name: event_name.into(),
            message,
            status: MessageStatus::Success,
            username,
        }
    }
}

/// 消息状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// 转换成功
    #[default]
    Success,
}

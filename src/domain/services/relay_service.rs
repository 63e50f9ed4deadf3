// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outbound_message::OutboundMessage;
use crate::utils::errors::RelayError;
use async_trait::async_trait;

/// 转发服务特质
///
/// 定义向下游频道投递出站消息的核心逻辑
#[async_trait]
pub trait RelayService: Send + Sync {
    /// 投递出站消息
    ///
    /// # 参数
    ///
    /// * `message` - 出站消息
    /// * `destination_url` - 下游频道的 webhook 地址
    ///
    /// # 返回值
    ///
    /// * `Ok(u16)` - 投递成功，返回下游响应状态码
    /// * `Err(RelayError)` - 投递失败
    async fn deliver(
        &self,
        message: &OutboundMessage,
        destination_url: &str,
    ) -> Result<u16, RelayError>;
}

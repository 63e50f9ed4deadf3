// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outbound_message::OutboundMessage;
use crate::domain::services::relay_service::RelayService;
use crate::utils::errors::RelayError;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("github-telex/", env!("CARGO_PKG_VERSION"));

/// Telex 转发服务实现
pub struct TelexRelayServiceImpl {
    /// HTTP 客户端
    client: Client,
}

impl TelexRelayServiceImpl {
    /// 创建新的 Telex 转发服务
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次投递的超时时间
    pub fn new(timeout: Duration) -> Result<Self, RelayError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

/// 下游视为成功的状态码
fn is_accepted(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::ACCEPTED
}

#[async_trait]
impl RelayService for TelexRelayServiceImpl {
    async fn deliver(
        &self,
        message: &OutboundMessage,
        destination_url: &str,
    ) -> Result<u16, RelayError> {
        let response = self
            .client
            .post(destination_url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if is_accepted(status) {
            Ok(status.as_u16())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 启动时加载一次，之后只读共享
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Telex 下游配置
    pub telex: TelexSettings,
    /// GitHub 配置
    pub github: GitHubSettings,
    /// 集成描述信息
    pub integration: IntegrationSettings,
    /// 后台转发配置
    pub relay: RelaySettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 请求体大小上限（字节）
    pub max_body_bytes: usize,
}

/// Telex 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TelexSettings {
    /// Telex 频道 webhook 地址
    pub webhook_url: String,
    /// 下游请求超时时间（秒）
    pub timeout_secs: u64,
}

impl TelexSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// GitHub 配置设置
#[derive(Clone, Deserialize)]
pub struct GitHubSettings {
    /// Webhook 签名密钥
    pub secret: String,
}

impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// 集成描述配置
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationSettings {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 集成类型，如 `Output`
    pub integration_type: String,
    pub enabled: bool,
    /// 本服务对外的访问地址，用于生成清单中的 target_url
    pub app_url: Option<String>,
}

/// 后台转发配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
    /// 待转发队列容量
    pub queue_capacity: usize,
    /// 同时进行的最大投递数
    pub max_concurrency: usize,
    /// 关闭时等待队列清空的时间（秒）
    pub shutdown_grace_secs: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub address: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// `GITHUB_TELEX__*` 环境变量，最后是 `TELEX_WEBHOOK_URL` 与 `GITHUB_SECRET`。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载并校验的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("GITHUB_TELEX")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("telex.webhook_url", std::env::var("TELEX_WEBHOOK_URL").ok())?
            .set_override_option("github.secret", std::env::var("GITHUB_SECRET").ok())?;

        Self::from_builder(builder)
    }

    /// 内置默认值
    ///
    /// `telex.webhook_url` 与 `github.secret` 没有默认值，必须由外部提供。
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // GitHub caps webhook payloads at 25 MB
            .set_default("server.max_body_bytes", 25 * 1024 * 1024)?
            .set_default("telex.timeout_secs", 10)?
            .set_default("integration.id", "github-telex-integration")?
            .set_default("integration.name", "GitHub to Telex Integration")?
            .set_default(
                "integration.description",
                "Sends GitHub events to a Telex channel",
            )?
            .set_default("integration.integration_type", "Output")?
            .set_default("integration.enabled", true)?
            .set_default("relay.queue_capacity", 1024)?
            .set_default("relay.max_concurrency", 8)?
            .set_default("relay.shutdown_grace_secs", 15)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.address", "0.0.0.0:9000")
    }

    /// 从构建器生成配置并校验
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.secret.is_empty() {
            return Err(ConfigError::Message(
                "github.secret must not be empty".to_string(),
            ));
        }

        let url = url::Url::parse(&self.telex.webhook_url).map_err(|e| {
            ConfigError::Message(format!(
                "telex.webhook_url is not a valid URL: {}",
                e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "telex.webhook_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.relay.queue_capacity == 0 || self.relay.max_concurrency == 0 {
            return Err(ConfigError::Message(
                "relay.queue_capacity and relay.max_concurrency must be greater than zero"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::IntegrationSettings;
use serde::{Deserialize, Serialize};

const BACKGROUND_COLOR: &str = "#24292e";

const KEY_FEATURES: [&str; 4] = [
    "Verifies GitHub webhook signatures (HMAC-SHA256)",
    "Summarises push events with their commit messages",
    "Summarises issue activity with title, link and description",
    "Forwards every other GitHub event as formatted JSON",
];

/// 集成清单
///
/// `GET /` 返回的发现文档，向 Telex 描述本集成以及需要填写的配置项。
/// 不包含任何密钥或下游地址。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationManifest {
    pub data: ManifestData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestData {
    pub integration_id: String,
    pub descriptions: ManifestDescriptions,
    pub integration_type: String,
    pub is_active: bool,
    pub key_features: Vec<String>,
    pub settings: Vec<ManifestSetting>,
    pub target_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDescriptions {
    pub app_name: String,
    pub app_description: String,
    pub app_url: String,
    pub background_color: String,
}

/// 集成所需的单个配置项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSetting {
    pub label: String,
    #[serde(rename = "type")]
    pub setting_type: String,
    pub required: bool,
    pub default: String,
}

impl ManifestSetting {
    fn required_text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            setting_type: "text".to_string(),
            required: true,
            default: String::new(),
        }
    }
}

impl IntegrationManifest {
    /// 根据集成配置生成清单
    pub fn from_settings(integration: &IntegrationSettings) -> Self {
        let app_url = integration
            .app_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default();
        let target_url = if app_url.is_empty() {
            String::new()
        } else {
            format!("{}/webhook", app_url)
        };

        Self {
            data: ManifestData {
                integration_id: integration.id.clone(),
                descriptions: ManifestDescriptions {
                    app_name: integration.name.clone(),
                    app_description: integration.description.clone(),
                    app_url,
                    background_color: BACKGROUND_COLOR.to_string(),
                },
                integration_type: integration.integration_type.to_lowercase(),
                is_active: integration.enabled,
                key_features: KEY_FEATURES.iter().map(|f| f.to_string()).collect(),
                settings: vec![
                    ManifestSetting::required_text("webhook_url"),
                    ManifestSetting::required_text("github_secret"),
                ],
                target_url,
            },
        }
    }
}

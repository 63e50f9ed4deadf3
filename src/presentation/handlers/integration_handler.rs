// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::integration_manifest::IntegrationManifest;
use axum::{Extension, Json};
use std::sync::Arc;

/// 集成清单端点
pub async fn get_integration_manifest(
    Extension(settings): Extension<Arc<Settings>>,
) -> Json<IntegrationManifest> {
    Json(IntegrationManifest::from_settings(&settings.integration))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 入站事件（inbound_event）：GitHub 推送过来的原始事件
/// - 出站消息（outbound_message）：发送给 Telex 频道的消息
/// - 集成清单（integration_manifest）：对外公布的集成描述
pub mod inbound_event;
pub mod integration_manifest;
pub mod outbound_message;

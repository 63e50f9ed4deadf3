// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 签名服务（signature_service）：校验 GitHub HMAC 签名
/// - 事件转换（event_translator）：把 GitHub 事件转换为可读消息
/// - 转发服务（relay_service）：向下游频道投递消息的抽象接口
pub mod event_translator;
pub mod relay_service;
pub mod signature_service;

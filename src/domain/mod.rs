// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：入站事件、出站消息等数据结构
/// - 服务（services）：签名校验、事件转换和消息转发接口
///
/// 领域层不依赖任何 HTTP 框架，只描述业务规则。
pub mod models;
pub mod services;

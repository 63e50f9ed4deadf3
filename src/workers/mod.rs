// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台转发任务，把出站消息与 HTTP 请求的生命周期解耦
pub mod relay_worker;

pub use relay_worker::{spawn_relay_worker, RelayDispatcher, RelayJob, RelayWorker};

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

use crate::config::settings::RelaySettings;
use crate::domain::models::outbound_message::OutboundMessage;
use crate::domain::services::relay_service::RelayService;
use crate::utils::errors::{DispatchError, RelayError};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

/// 转发任务
///
/// 移交给工作器之后由工作器独占，直到投递完成或失败
#[derive(Debug, Clone)]
pub struct RelayJob {
    pub id: Uuid,
    pub message: OutboundMessage,
    pub destination_url: String,
    pub enqueued_at: DateTime<Utc>,
}

impl RelayJob {
    pub fn new(message: OutboundMessage, destination_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            destination_url: destination_url.into(),
            enqueued_at: Utc::now(),
        }
    }
}

/// 单次投递的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 下游返回 200 或 202
    Delivered { status: u16 },
    /// 下游拒绝或网络失败
    Failed { status: Option<u16>, reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

/// 转发调度器
///
/// 请求处理器持有的句柄，只负责把任务放入队列，从不等待投递结果
#[derive(Clone, Debug)]
pub struct RelayDispatcher {
    sender: mpsc::Sender<RelayJob>,
}

impl RelayDispatcher {
    /// 创建调度器与对应的任务接收端
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RelayJob>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// 将出站消息放入转发队列
    ///
    /// # 参数
    ///
    /// * `message` - 出站消息，所有权移交给转发任务
    /// * `destination_url` - 下游 webhook 地址
    ///
    /// # 返回值
    ///
    /// * `Ok(Uuid)` - 任务ID
    /// * `Err(DispatchError)` - 队列已满或工作器已关闭
    pub fn dispatch(
        &self,
        message: OutboundMessage,
        destination_url: &str,
    ) -> Result<Uuid, DispatchError> {
        let job = RelayJob::new(message, destination_url);
        let id = job.id;

        self.sender.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::QueueClosed,
        })?;

        debug!(job_id = %id, "Relay job enqueued");
        Ok(id)
    }
}

/// 转发工作器
pub struct RelayWorker {
    /// 投递服务
    service: Arc<dyn RelayService>,
    /// 最大并发投递数
    max_concurrency: usize,
}

impl RelayWorker {
    pub fn new(service: Arc<dyn RelayService>, max_concurrency: usize) -> Self {
        Self {
            service,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// 运行转发工作器
    ///
    /// 持续消费队列，所有调度器被释放后清空剩余任务并退出
    pub async fn run(&self, receiver: mpsc::Receiver<RelayJob>) {
        info!(
            max_concurrency = self.max_concurrency,
            "Relay worker started"
        );

        let jobs = futures::stream::unfold(receiver, |mut rx| async move {
            rx.recv().await.map(|job| (job, rx))
        });

        jobs.for_each_concurrent(self.max_concurrency, |job| async move {
            self.deliver(job).await;
        })
        .await;

        info!("Relay worker stopped");
    }

    /// 投递单个任务并记录结果
    ///
    /// 失败只记录日志和指标，不重试
    pub async fn deliver(&self, job: RelayJob) -> DeliveryOutcome {
        let RelayJob {
            id,
            message,
            destination_url,
            enqueued_at,
        } = job;

        let queued_ms = (Utc::now() - enqueued_at).num_milliseconds();
        info!(
            job_id = %id,
            event = %message.event_name,
            queued_ms,
            "Delivering message to Telex"
        );
        counter!("relay_delivery_attempts_total").increment(1);

        let start = Instant::now();
        let result = self.service.deliver(&message, &destination_url).await;
        histogram!("relay_delivery_duration_seconds").record(start.elapsed().as_secs_f64());

        match result {
            Ok(status) => {
                info!(job_id = %id, status, "Message sent to Telex successfully");
                counter!("relay_delivery_success_total").increment(1);
                DeliveryOutcome::Delivered { status }
            }
            Err(e) => {
                error!(job_id = %id, reason = e.reason(), "Failed to send message to Telex: {}", e);
                counter!("relay_delivery_failed_total", "reason" => e.reason()).increment(1);
                let status = match &e {
                    RelayError::Rejected { status, .. } => Some(*status),
                    RelayError::Transport(_) => None,
                };
                DeliveryOutcome::Failed {
                    status,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// 创建转发队列并启动后台工作器
///
/// # 返回值
///
/// 返回调度器句柄和工作器任务句柄
pub fn spawn_relay_worker(
    service: Arc<dyn RelayService>,
    settings: &RelaySettings,
) -> (RelayDispatcher, JoinHandle<()>) {
    let (dispatcher, receiver) = RelayDispatcher::channel(settings.queue_capacity);
    let worker = RelayWorker::new(service, settings.max_concurrency);

    let handle = tokio::spawn(async move {
        worker.run(receiver).await;
    });

    (dispatcher, handle)
}

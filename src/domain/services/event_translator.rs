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

use crate::domain::models::outbound_message::OutboundMessage;
use serde_json::Value;
use std::collections::HashMap;

/// 无法识别用户时使用的用户名
pub const UNKNOWN_USER: &str = "unknown";

/// Issue 描述保留的最大字符数
pub const MAX_ISSUE_BODY_CHARS: usize = 200;

/// 单条规则的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEvent {
    pub username: String,
    pub message: String,
}

/// 事件规则特质
///
/// 每种 GitHub 事件类型对应一条规则，负责提取用户名并生成消息正文。
/// 规则永远不会失败，缺失字段一律使用默认值。
pub trait EventRule: Send + Sync {
    fn render(&self, event_type: &str, payload: &Value) -> RenderedEvent;
}

/// 事件转换器
///
/// 按事件类型查找已注册的规则，未注册的类型交给回退规则处理。
/// 新增事件类型只需要注册一条新规则，不需要修改已有规则。
pub struct EventTranslator {
    rules: HashMap<String, Box<dyn EventRule>>,
    fallback: Box<dyn EventRule>,
}

impl EventTranslator {
    /// 创建只包含回退规则的转换器
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: Box::new(GenericRule),
        }
    }

    /// 注册（或替换）某个事件类型的规则
    pub fn with_rule(mut self, event_type: impl Into<String>, rule: impl EventRule + 'static) -> Self {
        self.rules.insert(event_type.into(), Box::new(rule));
        self
    }

    /// 替换回退规则
    pub fn with_fallback(mut self, rule: impl EventRule + 'static) -> Self {
        self.fallback = Box::new(rule);
        self
    }

    /// 是否存在针对该事件类型的专用规则
    pub fn has_rule(&self, event_type: &str) -> bool {
        self.rules.contains_key(event_type)
    }

    /// 将 GitHub 事件转换为出站消息
    ///
    /// # 参数
    ///
    /// * `event_type` - `X-GitHub-Event` 头的值
    /// * `payload` - 已解析的事件负载
    ///
    /// # 返回值
    ///
    /// 返回状态为 `success` 的出站消息
    pub fn translate(&self, event_type: &str, payload: &Value) -> OutboundMessage {
        let rule: &dyn EventRule = match self.rules.get(event_type) {
            Some(rule) => rule.as_ref(),
            None => self.fallback.as_ref(),
        };
        let rendered = rule.render(event_type, payload);
        OutboundMessage::new(event_type, rendered.message, rendered.username)
    }
}

impl Default for EventTranslator {
    fn default() -> Self {
        Self::empty()
            .with_rule("push", PushRule)
            .with_rule("issues", IssuesRule)
            .with_rule("pull_request", PullRequestRule)
    }
}

/// push 事件：列出每个提交的消息
pub struct PushRule;

impl EventRule for PushRule {
    fn render(&self, _event_type: &str, payload: &Value) -> RenderedEvent {
        let username = str_at(payload, "/pusher/name").unwrap_or(UNKNOWN_USER);
        let commit_lines = payload
            .get("commits")
            .and_then(Value::as_array)
            .map(|commits| {
                commits
                    .iter()
                    .map(|c| format!("- {}", str_at(c, "/message").unwrap_or_default()))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        RenderedEvent {
            username: username.to_string(),
            message: format!("GitHub Push Event by {}:\n{}", username, commit_lines),
        }
    }
}

/// issues 事件：动作、标题、链接和截断后的描述
pub struct IssuesRule;

impl EventRule for IssuesRule {
    fn render(&self, _event_type: &str, payload: &Value) -> RenderedEvent {
        let username = str_at(payload, "/issue/user/login").unwrap_or(UNKNOWN_USER);
        let action = str_at(payload, "/action").unwrap_or("unknown");
        let title = str_at(payload, "/issue/title").unwrap_or("No title");
        let html_url = str_at(payload, "/issue/html_url").unwrap_or_default();
        let body = truncate_chars(
            str_at(payload, "/issue/body").unwrap_or_default(),
            MAX_ISSUE_BODY_CHARS,
        );

        RenderedEvent {
            username: username.to_string(),
            message: format!(
                "GitHub Issue {} by {}:\nTitle: {}\nURL: {}\nDescription: {}",
                action, username, title, html_url, body
            ),
        }
    }
}

/// pull_request 事件：识别作者，消息沿用通用格式
pub struct PullRequestRule;

impl EventRule for PullRequestRule {
    fn render(&self, event_type: &str, payload: &Value) -> RenderedEvent {
        RenderedEvent {
            username: str_at(payload, "/pull_request/user/login")
                .unwrap_or(UNKNOWN_USER)
                .to_string(),
            message: generic_message(event_type, payload),
        }
    }
}

/// 回退规则：输出格式化后的完整负载
pub struct GenericRule;

impl EventRule for GenericRule {
    fn render(&self, event_type: &str, payload: &Value) -> RenderedEvent {
        RenderedEvent {
            username: UNKNOWN_USER.to_string(),
            message: generic_message(event_type, payload),
        }
    }
}

fn generic_message(event_type: &str, payload: &Value) -> String {
    // Serializing a Value cannot fail
    let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    format!("GitHub Event: {}\nPayload: {}", event_type, pretty)
}

/// 按 JSON Pointer 取字符串字段，非字符串（含 null）视为缺失
fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

/// 截断到 `max_chars` 个字符并追加省略号，不会切断多字节字符
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

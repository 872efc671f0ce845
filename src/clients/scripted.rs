//! 内存脚本传输
//!
//! 按顺序回放预先设定的响应（可带延迟），并记录收到的每个请求。
//! 用于离线演示和测试，不触达网络。

use serde_json::Value;
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

use crate::clients::generator_client::TaskTransport;
use crate::error::{AppError, AppResult};
use crate::models::task_type::TaskType;
use crate::models::GenerationRequest;

const SCRIPTED_ENDPOINT: &str = "scripted:/api/generate";

/// 预设响应
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// 成功，返回 JSON 体
    Body { delay: Duration, body: Value },
    /// 非成功状态码
    Status {
        delay: Duration,
        status: u16,
        body: Option<Value>,
    },
    /// 网络失败
    NetworkError { delay: Duration, message: String },
}

impl ScriptedReply {
    pub fn body(body: Value) -> Self {
        ScriptedReply::Body {
            delay: Duration::ZERO,
            body,
        }
    }

    pub fn status(status: u16) -> Self {
        ScriptedReply::Status {
            delay: Duration::ZERO,
            status,
            body: None,
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        ScriptedReply::NetworkError {
            delay: Duration::ZERO,
            message: message.into(),
        }
    }

    pub fn after(self, delay: Duration) -> Self {
        match self {
            ScriptedReply::Body { body, .. } => ScriptedReply::Body { delay, body },
            ScriptedReply::Status { status, body, .. } => {
                ScriptedReply::Status { delay, status, body }
            }
            ScriptedReply::NetworkError { message, .. } => {
                ScriptedReply::NetworkError { delay, message }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn next_reply(&self, request: &GenerationRequest) -> Option<ScriptedReply> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }
}

impl TaskTransport for ScriptedTransport {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Value> {
        let reply = self
            .next_reply(request)
            .unwrap_or_else(|| ScriptedReply::network_error("no scripted reply left"));

        match reply {
            ScriptedReply::Body { delay, body } => {
                sleep(delay).await;
                Ok(body)
            }
            ScriptedReply::Status {
                delay,
                status,
                body,
            } => {
                sleep(delay).await;
                Err(AppError::Response {
                    endpoint: SCRIPTED_ENDPOINT.to_string(),
                    status,
                    message: body
                        .as_ref()
                        .and_then(crate::clients::generator_client::extract_error_message),
                })
            }
            ScriptedReply::NetworkError { delay, message } => {
                sleep(delay).await;
                Err(AppError::transport(
                    SCRIPTED_ENDPOINT,
                    io::Error::new(io::ErrorKind::ConnectionRefused, message),
                ))
            }
        }
    }

    async fn task_types(&self) -> AppResult<Vec<(String, String)>> {
        Ok(TaskType::static_options())
    }
}

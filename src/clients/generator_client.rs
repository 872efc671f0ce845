//! 任务生成服务客户端
//!
//! 封装所有与生成服务相关的 HTTP 调用
use serde_json::Value;
use std::future::Future;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::GenerationRequest;

/// 生成服务的传输层
///
/// 请求控制器只依赖这个 trait，真实网络与内存脚本可以互换。
pub trait TaskTransport: Send + Sync {
    /// 提交生成请求，返回成功响应的 JSON 体
    ///
    /// 网络失败、非成功状态码、响应体不是 JSON 都返回错误。
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = AppResult<Value>> + Send;

    /// 获取服务端支持的任务类型（key, 名称），保持服务端给出的顺序
    fn task_types(&self) -> impl Future<Output = AppResult<Vec<(String, String)>>> + Send;
}

/// 生成服务 HTTP 客户端
pub struct GeneratorClient {
    http: reqwest::Client,
    generate_url: String,
    task_types_url: String,
}

impl GeneratorClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            http,
            generate_url: config.generate_url(),
            task_types_url: config.task_types_url(),
        })
    }

    /// 非成功响应：尝试读取 `{"error": "..."}` 作为补充说明
    async fn response_error(endpoint: &str, response: reqwest::Response) -> AppError {
        let status = response.status().as_u16();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(extract_error_message);

        AppError::Response {
            endpoint: endpoint.to_string(),
            status,
            message,
        }
    }

    /// 读取完整响应体并解析为 JSON
    async fn read_json(endpoint: &str, response: reqwest::Response) -> AppResult<Value> {
        let text = response
            .text()
            .await
            .map_err(|e| AppError::transport(endpoint, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl TaskTransport for GeneratorClient {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Value> {
        debug!("POST {} {:?}", self.generate_url, request);

        let response = self
            .http
            .post(&self.generate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::transport(&self.generate_url, e))?;

        if !response.status().is_success() {
            return Err(Self::response_error(&self.generate_url, response).await);
        }

        let body = Self::read_json(&self.generate_url, response).await?;

        debug!("生成接口返回成功");
        Ok(body)
    }

    async fn task_types(&self) -> AppResult<Vec<(String, String)>> {
        debug!("GET {}", self.task_types_url);

        let response = self
            .http
            .get(&self.task_types_url)
            .send()
            .await
            .map_err(|e| AppError::transport(&self.task_types_url, e))?;

        if !response.status().is_success() {
            return Err(Self::response_error(&self.task_types_url, response).await);
        }

        let body = Self::read_json(&self.task_types_url, response).await?;

        parse_task_types(&body)
    }
}

/// 提取服务端错误说明
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// 解析 `{"task_types": {key: label}}`
pub fn parse_task_types(body: &Value) -> AppResult<Vec<(String, String)>> {
    let types = body
        .get("task_types")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::malformed("missing `task_types` object"))?;

    Ok(types
        .iter()
        .filter_map(|(key, label)| label.as_str().map(|label| (key.clone(), label.to_string())))
        .collect())
}

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 任务生成服务地址
    pub api_base_url: String,
    /// 生成接口路径
    pub generate_path: String,
    /// 任务类型列表接口路径
    pub task_types_path: String,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 提示框自动消失时间（毫秒）
    pub alert_dismiss_ms: u64,
    /// 卡片依次出现前的初始延迟（毫秒）
    pub reveal_initial_delay_ms: u64,
    /// 相邻卡片出现的间隔（毫秒）
    pub reveal_step_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 渲染结果输出文件
    pub output_html_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            generate_path: "/api/generate".to_string(),
            task_types_path: "/api/task-types".to_string(),
            request_timeout_secs: 30,
            alert_dismiss_ms: 5000,
            reveal_initial_delay_ms: 10,
            reveal_step_ms: 100,
            verbose_logging: false,
            output_html_file: "tasks.html".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            generate_path: std::env::var("GENERATE_PATH").unwrap_or(default.generate_path),
            task_types_path: std::env::var("TASK_TYPES_PATH").unwrap_or(default.task_types_path),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            alert_dismiss_ms: std::env::var("ALERT_DISMISS_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.alert_dismiss_ms),
            reveal_initial_delay_ms: std::env::var("REVEAL_INITIAL_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reveal_initial_delay_ms),
            reveal_step_ms: std::env::var("REVEAL_STEP_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reveal_step_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_html_file: std::env::var("OUTPUT_HTML_FILE").unwrap_or(default.output_html_file),
        }
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 生成接口完整地址
    pub fn generate_url(&self) -> String {
        join_url(&self.api_base_url, &self.generate_path)
    }

    /// 任务类型接口完整地址
    pub fn task_types_url(&self) -> String {
        join_url(&self.api_base_url, &self.task_types_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn alert_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn reveal_initial_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_initial_delay_ms)
    }

    pub fn reveal_step(&self) -> Duration {
        Duration::from_millis(self.reveal_step_ms)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

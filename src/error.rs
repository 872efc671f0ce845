use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验错误（不会触达网络层）
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// 网络请求失败
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 服务端返回非成功状态码
    #[error("{endpoint} responded with status {status}{}", message_suffix(.message))]
    Response {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },

    /// 响应体无法解析为任务批次
    #[error("malformed response: {reason}")]
    MalformedData { reason: String },

    /// 配置错误
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// 写出结果文件失败
    #[error("failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The number of tasks must be between {min} and {max} (got {count})")]
    CountOutOfRange { count: i64, min: i64, max: i64 },

    #[error("The number of tasks must be a whole number (got {raw:?})")]
    CountNotANumber { raw: String },

    #[error("A difficulty level must be selected")]
    MissingDifficulty,

    #[error("Unknown difficulty level: {value}")]
    UnknownDifficulty { value: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("failed to read config file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("failed to parse config file {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// HTTP 客户端构建失败
    #[error("failed to build http client: {0}")]
    ClientBuildFailed(String),
}

/// 提示框样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Warning,
    Danger,
}

impl AlertLevel {
    /// 对应的 CSS 后缀（`alert-{}`）
    pub fn css_suffix(self) -> &'static str {
        match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络请求失败错误
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建响应体解析失败错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        AppError::MalformedData {
            reason: reason.into(),
        }
    }

    /// 校验错误以警告样式展示，其余错误以危险样式展示
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            AppError::Validation(_) => AlertLevel::Warning,
            _ => AlertLevel::Danger,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::malformed(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
